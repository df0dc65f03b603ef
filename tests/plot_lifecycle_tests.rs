use codec_charts::core::Series;
use codec_charts::geometry::Point;
use codec_charts::plot::{CrosshairMode, PlotState};
use codec_charts::render::{CanvasLayerKind, Color, LineStrokeStyle, NullRenderer};
use codec_charts::{Plot, PlotConfig, PlotError, ScatterPlot};

fn plot() -> Plot<ScatterPlot, NullRenderer> {
    let series = Series::from_pairs(
        "ssim",
        Color::rgb8(0x0F, 0x9D, 0x58),
        &[(500.0, 0.91), (1500.0, 0.95), (4000.0, 0.98)],
    );
    Plot::new(ScatterPlot::new(vec![series]), NullRenderer::default())
}

#[test]
fn mount_resize_unmount_cycle() {
    let mut plot = plot();
    assert_eq!(plot.state(), PlotState::Unmounted);
    assert!(plot.viewport().is_none());
    assert!(matches!(plot.resize(10.0, 10.0, 1.0), Err(PlotError::NotMounted)));

    plot.mount(300.0, 200.0, 1.0).expect("mount");
    assert_eq!(plot.state(), PlotState::Mounted);
    let first = plot.viewport().expect("fitted viewport");

    plot.resize(600.0, 200.0, 1.0).expect("resize");
    assert_eq!(plot.device().map(|device| device.w), Some(600.0));
    let second = plot.viewport().expect("refitted viewport");
    assert!(second.w < first.w, "wider device needs less domain padding");

    plot.unmount();
    assert!(!plot.is_mounted());
    assert!(plot.plot_transform().is_none());
    assert!(matches!(plot.draw(), Err(PlotError::NotMounted)));
}

#[test]
fn invalid_mount_arguments_are_rejected() {
    let mut plot = plot();
    assert!(matches!(
        plot.mount(300.0, 200.0, 0.0),
        Err(PlotError::InvalidPixelRatio(_))
    ));
    assert!(matches!(
        plot.mount(-1.0, 200.0, 1.0),
        Err(PlotError::InvalidViewport { .. })
    ));
    assert!(!plot.is_mounted());
}

#[test]
fn transform_round_trips_domain_points() {
    let mut plot = plot();
    plot.mount(300.0, 200.0, 2.0).expect("mount");

    let domain = Point::new(1500.0, 0.95);
    let device = plot.transform_point(domain).expect("to device");
    let back = plot.inverse_transform_point(device).expect("to domain");
    assert!((back.x - domain.x).abs() <= 1e-9);
    assert!((back.y - domain.y).abs() <= 1e-9);
}

#[test]
fn pointer_shows_and_hides_crosshair() {
    let mut plot = plot();
    plot.mount(300.0, 200.0, 2.0).expect("mount");

    plot.pointer_move(150.0, 100.0).expect("move");
    let crosshair = plot.interaction().crosshair();
    assert!(crosshair.visible);
    assert_eq!((crosshair.x, crosshair.y), (300.0, 200.0));

    let frame = plot.renderer().last_frame.as_ref().expect("frame");
    let layer = frame.layer(CanvasLayerKind::Crosshair);
    assert_eq!(layer.lines.len(), 2);
    assert!(layer.lines.iter().all(|line| line.stroke_style == LineStrokeStyle::Dashed));
    assert_eq!(layer.texts.len(), 2);

    plot.pointer_leave().expect("leave");
    assert!(!plot.interaction().crosshair().visible);
    let frame = plot.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.layer(CanvasLayerKind::Crosshair).is_empty());
    assert_eq!(plot.renderer().render_count, 2);
}

#[test]
fn hidden_crosshair_mode_suppresses_overlay() {
    let config = PlotConfig::default().with_crosshair_mode(CrosshairMode::Hidden);
    let mut plot = plot().with_config(config).expect("config");
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    plot.pointer_move(10.0, 10.0).expect("move");

    let frame = plot.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.layer(CanvasLayerKind::Crosshair).is_empty());
}

#[test]
fn updating_series_refits_the_viewport() {
    let mut plot = plot();
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    let before = plot.viewport().expect("viewport");

    plot.update_chart(|chart| {
        chart.set_series(vec![Series::from_pairs(
            "ssim",
            Color::BLACK,
            &[(0.0, 0.0), (10_000.0, 1.0)],
        )]);
    })
    .expect("update");
    let after = plot.viewport().expect("viewport");
    assert!(after.w > before.w);
}

#[test]
fn layers_keep_paint_order() {
    let mut plot = plot();
    plot.mount(300.0, 200.0, 1.0).expect("mount");
    plot.pointer_move(40.0, 40.0).expect("move");

    let frame = plot.renderer().last_frame.as_ref().expect("frame");
    let order: Vec<CanvasLayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(order, CanvasLayerKind::CANONICAL.to_vec());
}
