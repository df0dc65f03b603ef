use crate::geometry::{Point, Rectangle};
use crate::plot::Canvas;
use crate::render::{CanvasLayerKind, Color, TextHAlign, TextVAlign};

/// One legend row: the full text, and the shorter text used when the full
/// one would not fit on the device.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LegendEntry {
    pub full: String,
    pub short: String,
    pub color: Color,
}

/// Text actually shown for `entry` on a canvas of the current width.
pub(crate) fn fitted_text<'e>(canvas: &Canvas<'_>, entry: &'e LegendEntry) -> &'e str {
    let padding = canvas.px(canvas.config().legend_padding);
    let gap = canvas.px(canvas.config().text_padding);
    let chrome = canvas.font_px() + gap + padding * 2.0;
    if canvas.text_width(&entry.full) + chrome > canvas.device().w {
        &entry.short
    } else {
        &entry.full
    }
}

/// Right-aligned legend in the top-right margin; entries listed last first.
pub(crate) fn draw_legend(canvas: &mut Canvas<'_>, entries: &[LegendEntry]) {
    let device = canvas.device();
    let padding = canvas.px(canvas.config().legend_padding);
    let gap = canvas.px(canvas.config().text_padding);
    let swatch = canvas.font_px();
    let text_color = canvas.palette().legend_text;
    let right = device.right() - padding;
    let mut top = device.y + padding;

    for entry in entries.iter().rev() {
        let text = fitted_text(canvas, entry).to_owned();
        let width = canvas.text_width(&text);
        let swatch_left = right - width - gap - swatch;
        canvas.fill_rect(
            CanvasLayerKind::Overlay,
            Rectangle::new(swatch_left, top, swatch, swatch),
            entry.color,
        );
        canvas.draw_device_text(
            CanvasLayerKind::Overlay,
            Point::new(right, top + swatch / 2.0),
            &text,
            0.0,
            0.0,
            TextHAlign::Right,
            TextVAlign::Middle,
            text_color,
        );
        top += swatch + gap;
    }
}
