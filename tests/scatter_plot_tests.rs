use codec_charts::core::{AxisHint, Series};
use codec_charts::geometry::{Point, Rectangle};
use codec_charts::render::{CanvasLayerKind, Color, NullRenderer, RenderFrame};
use codec_charts::{Plot, PlotError, ScatterPlot};

fn psnr_series() -> Series {
    Series::from_pairs(
        "x264",
        Color::rgb8(0x42, 0x85, 0xF4),
        &[(0.0, 10.0), (1.0, 20.0), (2.0, 15.0)],
    )
}

fn last_frame(plot: &Plot<ScatterPlot, NullRenderer>) -> &RenderFrame {
    plot.renderer().last_frame.as_ref().expect("rendered frame")
}

#[test]
fn scatter_plot_draws_polyline_and_dots() {
    let mut plot = Plot::new(ScatterPlot::new(vec![psnr_series()]), NullRenderer::default());
    plot.mount(300.0, 200.0, 2.0).expect("mount");
    assert_eq!(plot.device(), Some(Rectangle::new(0.0, 0.0, 600.0, 400.0)));

    plot.draw().expect("draw");
    let frame = last_frame(&plot);
    let series = frame.layer(CanvasLayerKind::Series);
    assert_eq!(series.lines.len(), 2);
    assert_eq!(series.circles.len(), 3);
    assert_eq!(frame.layer(CanvasLayerKind::Background).rects.len(), 1);
    assert!(!frame.layer(CanvasLayerKind::Grid).lines.is_empty());
    assert_eq!(frame.layer(CanvasLayerKind::Axis).rects.len(), 2);
    assert!(!frame.layer(CanvasLayerKind::Axis).texts.is_empty());
    assert!(frame.layer(CanvasLayerKind::Crosshair).is_empty());
}

#[test]
fn data_extremes_are_padded_symmetrically() {
    let mut plot = Plot::new(ScatterPlot::new(vec![psnr_series()]), NullRenderer::default());
    plot.mount(300.0, 200.0, 2.0).expect("mount");

    // 84 device px of 600 on a span of 2 pads x by 0.28 on each side.
    let low = plot.transform_point(Point::new(0.0, 10.0)).expect("map");
    let high = plot.transform_point(Point::new(2.0, 20.0)).expect("map");
    assert!((low.x - 65.625).abs() <= 1e-9);
    assert!((low.x + high.x - 600.0).abs() <= 1e-9);
    assert!((low.y + high.y - 400.0).abs() <= 1e-9);
    assert!(low.y > high.y);
    assert!(high.y > 0.0 && low.y < 400.0);
}

#[test]
fn empty_scatter_still_draws_chrome() {
    let mut plot = Plot::new(ScatterPlot::default(), NullRenderer::default());
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    plot.draw().expect("draw");

    let frame = last_frame(&plot);
    assert_eq!(plot.renderer().last_circle_count, 0);
    assert!(frame.layer(CanvasLayerKind::Series).is_empty());
    assert!(frame.layer(CanvasLayerKind::Overlay).is_empty());
    assert_eq!(frame.layer(CanvasLayerKind::Background).rects.len(), 1);
    assert!(!frame.layer(CanvasLayerKind::Grid).lines.is_empty());
}

#[test]
fn invalid_samples_break_the_polyline() {
    let series = Series::from_pairs(
        "gap",
        Color::BLACK,
        &[(0.0, 1.0), (1.0, 2.0), (2.0, f64::NAN), (3.0, 1.0), (4.0, 2.0)],
    );
    let mut plot = Plot::new(ScatterPlot::new(vec![series]), NullRenderer::default());
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    plot.draw().expect("draw");

    let series_layer = last_frame(&plot).layer(CanvasLayerKind::Series);
    assert_eq!(series_layer.circles.len(), 4);
    assert_eq!(series_layer.lines.len(), 2);
}

#[test]
fn legend_falls_back_to_series_name_on_narrow_devices() {
    let series = psnr_series().with_label("preset=veryslow crf=23 tune=film");

    let mut wide = Plot::new(ScatterPlot::new(vec![series.clone()]), NullRenderer::default());
    wide.mount(1200.0, 200.0, 1.0).expect("mount");
    wide.draw().expect("draw");
    let legend = &last_frame(&wide).layer(CanvasLayerKind::Overlay).texts;
    assert_eq!(legend.len(), 1);
    assert_eq!(legend[0].text, "x264 preset=veryslow crf=23 tune=film");

    let mut narrow = Plot::new(ScatterPlot::new(vec![series]), NullRenderer::default());
    narrow.mount(120.0, 200.0, 1.0).expect("mount");
    narrow.draw().expect("draw");
    let legend = &last_frame(&narrow).layer(CanvasLayerKind::Overlay).texts;
    assert_eq!(legend.len(), 1);
    assert_eq!(legend[0].text, "x264");
}

#[test]
fn legend_can_be_disabled() {
    let chart = ScatterPlot::new(vec![psnr_series()]).with_legend(false);
    let mut plot = Plot::new(chart, NullRenderer::default());
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    plot.draw().expect("draw");
    assert!(last_frame(&plot).layer(CanvasLayerKind::Overlay).is_empty());
}

#[test]
fn log_axis_hint_drops_non_positive_samples() {
    let series = Series::from_pairs(
        "rate",
        Color::BLACK,
        &[(0.0, 1.0), (100.0, 1.0), (1000.0, 2.0), (10_000.0, 3.0)],
    )
    .with_x_axis(AxisHint::log());
    let mut plot = Plot::new(ScatterPlot::new(vec![series]), NullRenderer::default());
    plot.mount(300.0, 200.0, 1.0).expect("mount with a zero bitrate");
    plot.draw().expect("draw with a zero bitrate");

    let series_layer = last_frame(&plot).layer(CanvasLayerKind::Series);
    assert_eq!(series_layer.circles.len(), 3);
    assert_eq!(series_layer.lines.len(), 2);

    let a = plot.transform_point(Point::new(100.0, 1.0)).expect("map");
    let b = plot.transform_point(Point::new(1000.0, 1.0)).expect("map");
    let c = plot.transform_point(Point::new(10_000.0, 1.0)).expect("map");
    assert!(((b.x - a.x) - (c.x - b.x)).abs() <= 1e-9);
    assert!(plot.transform_point(Point::new(0.0, 1.0)).is_err());
}

#[test]
fn log_axis_spanning_the_whole_float_range_still_mounts() {
    let series = Series::from_pairs("rate", Color::BLACK, &[(1e-3, 1.0), (1e300, 2.0)])
        .with_x_axis(AxisHint::log());
    let mut plot = Plot::new(ScatterPlot::new(vec![series]), NullRenderer::default());
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    plot.draw().expect("draw");

    let frame = last_frame(&plot);
    assert_eq!(frame.layer(CanvasLayerKind::Series).circles.len(), 2);
    let high = plot.transform_point(Point::new(1e300, 2.0)).expect("map");
    assert!(high.x.is_finite() && high.x < 300.0);
    let labels = &frame.layer(CanvasLayerKind::Axis).texts;
    assert!(!labels.is_empty());
    assert!(labels.iter().all(|label| !label.text.contains("inf")));
}

#[test]
fn drawing_before_mount_fails() {
    let mut plot = Plot::new(ScatterPlot::new(vec![psnr_series()]), NullRenderer::default());
    let err = plot.draw().expect_err("unmounted draw must fail");
    assert!(matches!(err, PlotError::NotMounted));
    assert_eq!(plot.renderer().render_count, 0);
}
