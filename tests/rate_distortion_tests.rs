use codec_charts::core::{ScaleKind, Series};
use codec_charts::geometry::{Point, Rectangle};
use codec_charts::plot::PlotTransform;
use codec_charts::render::{CanvasLayerKind, Color, NullRenderer};
use codec_charts::{Plot, RateDistortionPlot, ScatterPlot};

const LINEAR: (ScaleKind, ScaleKind) = (ScaleKind::Linear, ScaleKind::Linear);

// Axis space equals device space with Y flipped: device (x, 100 - y).
fn unit_transform() -> PlotTransform {
    PlotTransform::new(
        Rectangle::new(0.0, 0.0, 400.0, 100.0),
        LINEAR,
        Rectangle::new(0.0, 0.0, 400.0, 100.0),
    )
    .expect("transform")
}

fn crossing_pair() -> Vec<Series> {
    vec![
        Series::from_pairs("x264", Color::rgb8(0xDB, 0x44, 0x37), &[(100.0, 30.0), (300.0, 40.0)]),
        Series::from_pairs("x265", Color::rgb8(0x0F, 0x9D, 0x58), &[(100.0, 34.0), (300.0, 38.0)]),
    ]
}

#[test]
fn samples_are_sorted_by_bitrate() {
    let plot = RateDistortionPlot::new(vec![Series::from_pairs(
        "av1",
        Color::BLACK,
        &[(300.0, 40.0), (100.0, 30.0), (200.0, 36.0)],
    )]);
    let xs: Vec<f64> = plot.series()[0].values.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![100.0, 200.0, 300.0]);
}

#[test]
fn probes_report_hits_and_neighbour_deltas() {
    let plot = RateDistortionPlot::new(crossing_pair());
    let result = plot.probe_intersections(&unit_transform(), Point::new(200.0, 65.0));

    assert_eq!(result.vertical.len(), 2);
    assert_eq!(result.vertical[0].series_index, 0);
    assert!((result.vertical[0].point.y - 35.0).abs() <= 1e-9);
    assert_eq!(result.vertical[1].series_index, 1);
    assert!((result.vertical[1].point.y - 36.0).abs() <= 1e-9);

    assert_eq!(result.vertical_deltas.len(), 1);
    let quality = result.vertical_deltas[0];
    assert!((quality.absolute - 1.0).abs() <= 1e-9);
    let percent = quality.percent.expect("non-zero base");
    assert!((percent - 100.0 / 35.0).abs() <= 1e-9);

    assert_eq!(result.horizontal.len(), 2);
    assert_eq!(result.horizontal[0].series_index, 1);
    assert!((result.horizontal[0].point.x - 150.0).abs() <= 1e-9);
    assert!((result.horizontal[1].point.x - 200.0).abs() <= 1e-9);

    let bitrate = result.horizontal_deltas[0];
    assert!((bitrate.absolute - 50.0).abs() <= 1e-9);
    assert!((bitrate.percent.expect("non-zero base") - 100.0 / 3.0).abs() <= 1e-9);
}

#[test]
fn shared_vertex_is_counted_once() {
    let plot = RateDistortionPlot::new(vec![Series::from_pairs(
        "vp9",
        Color::BLACK,
        &[(100.0, 30.0), (200.0, 35.0), (300.0, 40.0)],
    )]);
    let result = plot.probe_intersections(&unit_transform(), Point::new(200.0, 65.0));
    assert_eq!(result.vertical.len(), 1);
    assert_eq!(result.horizontal.len(), 1);
    assert!((result.vertical[0].point.x - 200.0).abs() <= 1e-9);
}

#[test]
fn last_sample_on_the_probe_is_a_hit() {
    let plot = RateDistortionPlot::new(vec![Series::from_pairs(
        "vp9",
        Color::BLACK,
        &[(100.0, 30.0), (200.0, 35.0)],
    )]);
    let result = plot.probe_intersections(&unit_transform(), Point::new(200.0, 65.0));
    assert_eq!(result.vertical.len(), 1);
}

#[test]
fn zero_base_has_no_percentage() {
    let plot = RateDistortionPlot::new(vec![
        Series::from_pairs("flat", Color::BLACK, &[(100.0, 0.0), (300.0, 0.0)]),
        Series::from_pairs("raised", Color::WHITE, &[(100.0, 10.0), (300.0, 10.0)]),
    ]);
    let result = plot.probe_intersections(&unit_transform(), Point::new(200.0, 65.0));

    assert!(result.horizontal.is_empty());
    assert_eq!(result.vertical_deltas.len(), 1);
    assert!((result.vertical_deltas[0].absolute - 10.0).abs() <= 1e-9);
    assert_eq!(result.vertical_deltas[0].percent, None);
}

#[test]
fn hits_of_the_same_series_are_not_compared() {
    let plot = RateDistortionPlot::new(vec![Series::from_pairs(
        "peak",
        Color::BLACK,
        &[(100.0, 30.0), (200.0, 40.0), (300.0, 30.0)],
    )]);
    let result = plot.probe_intersections(&unit_transform(), Point::new(200.0, 65.0));
    assert_eq!(result.horizontal.len(), 2);
    assert!(result.horizontal_deltas.is_empty());
}

#[test]
fn probe_outside_every_series_is_empty() {
    let plot = RateDistortionPlot::new(crossing_pair());
    let result = plot.probe_intersections(&unit_transform(), Point::new(50.0, 95.0));
    assert!(result.is_empty());
}

#[test]
fn overlay_is_off_by_default_and_matches_scatter() {
    let mut rd = Plot::new(RateDistortionPlot::new(crossing_pair()), NullRenderer::default());
    let mut scatter = Plot::new(ScatterPlot::new(crossing_pair()), NullRenderer::default());
    assert!(!rd.chart().intersection_overlay());

    rd.mount(400.0, 300.0, 1.0).expect("mount");
    scatter.mount(400.0, 300.0, 1.0).expect("mount");
    let pointer = rd.transform_point(Point::new(200.0, 35.0)).expect("map");
    rd.pointer_move(pointer.x, pointer.y).expect("move");
    scatter.pointer_move(pointer.x, pointer.y).expect("move");

    assert_eq!(rd.renderer().last_frame, scatter.renderer().last_frame);
}

#[test]
fn enabled_overlay_marks_hits_and_prints_deltas() {
    let chart = RateDistortionPlot::new(crossing_pair()).with_intersection_overlay(true);
    let mut plot = Plot::new(chart, NullRenderer::default());
    plot.mount(400.0, 300.0, 1.0).expect("mount");

    let pointer = plot.transform_point(Point::new(200.0, 35.0)).expect("map");
    plot.pointer_move(pointer.x, pointer.y).expect("move");

    let frame = plot.renderer().last_frame.as_ref().expect("frame");
    let overlay = frame.layer(CanvasLayerKind::Overlay);
    assert_eq!(overlay.circles.len(), 4);
    // Two legend rows, one quality delta, one bitrate delta.
    assert_eq!(overlay.texts.len(), 4);
    assert!(overlay.texts.iter().any(|text| text.text == "1.00 (+2.86%)"));
    assert!(overlay.texts.iter().any(|text| text.text == "50.00 (+33.33%)"));

    plot.pointer_leave().expect("leave");
    let frame = plot.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.layer(CanvasLayerKind::Overlay).circles.len(), 0);
}
