use tracing::trace;

use crate::error::PlotResult;
use crate::geometry::{Point, Rectangle};
use crate::plot::Canvas;
use crate::plot::canvas::format_tick;
use crate::render::{CanvasLayerKind, TextHAlign, TextVAlign};

/// Which axes get tick labels on the tick bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickLabels {
    pub x: bool,
    pub y: bool,
}

impl TickLabels {
    pub const BOTH: Self = Self { x: true, y: true };
    pub const NONE: Self = Self { x: false, y: false };
}

/// Device columns and rows of the current tick values.
struct TickPositions {
    x: Vec<(f64, f64)>,
    y: Vec<(f64, f64)>,
}

fn tick_positions(canvas: &Canvas<'_>) -> PlotResult<TickPositions> {
    let count = canvas.config().tick_count;
    let transform = canvas.transform();
    let x = transform
        .x_scale()
        .ticks(count)
        .into_iter()
        .map(|value| Ok((value, transform.x_to_device(value)?)))
        .collect::<PlotResult<Vec<_>>>()?;
    let y = transform
        .y_scale()
        .ticks(count)
        .into_iter()
        .map(|value| Ok((value, transform.y_to_device(value)?)))
        .collect::<PlotResult<Vec<_>>>()?;
    Ok(TickPositions { x, y })
}

/// Full-height and full-width lines at every tick value.
pub fn draw_gridlines(canvas: &mut Canvas<'_>) -> PlotResult<()> {
    let ticks = tick_positions(canvas)?;
    let device = canvas.device();
    let width = canvas.px(canvas.config().gridline_width);
    let color = canvas.palette().gridline;

    for &(_, x) in &ticks.x {
        canvas.stroke_line(
            CanvasLayerKind::Grid,
            Point::new(x, device.y),
            Point::new(x, device.bottom()),
            width,
            color,
        );
    }
    for &(_, y) in &ticks.y {
        canvas.stroke_line(
            CanvasLayerKind::Grid,
            Point::new(device.x, y),
            Point::new(device.right(), y),
            width,
            color,
        );
    }
    trace!(x = ticks.x.len(), y = ticks.y.len(), "gridlines");
    Ok(())
}

/// Opaque bars along the bottom and left edges with two-decimal tick labels.
pub fn draw_tick_bars(canvas: &mut Canvas<'_>, labels: TickLabels) -> PlotResult<()> {
    let device = canvas.device();
    let bar_w = canvas.px(canvas.config().tick_bar_width);
    let bar_h = canvas.px(canvas.config().tick_bar_height);
    let padding = canvas.px(canvas.config().text_padding);
    let bar_color = canvas.palette().tick_bar;
    let text_color = canvas.palette().tick_text;

    canvas.fill_rect(
        CanvasLayerKind::Axis,
        Rectangle::new(device.x, device.bottom() - bar_h, device.w, bar_h),
        bar_color,
    );
    canvas.fill_rect(
        CanvasLayerKind::Axis,
        Rectangle::new(device.x, device.y, bar_w, device.h),
        bar_color,
    );

    if labels == TickLabels::NONE {
        return Ok(());
    }
    let ticks = tick_positions(canvas)?;
    if labels.x {
        for &(value, x) in &ticks.x {
            canvas.draw_device_text(
                CanvasLayerKind::Axis,
                Point::new(x, device.bottom()),
                &format_tick(value),
                0.0,
                -padding,
                TextHAlign::Center,
                TextVAlign::Bottom,
                text_color,
            );
        }
    }
    if labels.y {
        for &(value, y) in &ticks.y {
            canvas.draw_device_text(
                CanvasLayerKind::Axis,
                Point::new(device.x, y),
                &format_tick(value),
                padding,
                0.0,
                TextHAlign::Left,
                TextVAlign::Middle,
                text_color,
            );
        }
    }
    Ok(())
}
