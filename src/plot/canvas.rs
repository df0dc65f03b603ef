use crate::error::PlotResult;
use crate::geometry::{Point, Rectangle};
use crate::plot::{Palette, PlotConfig, PlotSurface, PlotTransform};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive, TextVAlign, estimate_text_width_px,
};

/// Drawing context handed to series renderers for one draw pass.
///
/// Drawing helpers take device pixels with a top-left origin; map domain
/// values through [`Canvas::to_device`] first.
#[derive(Debug)]
pub struct Canvas<'a> {
    frame: &'a mut RenderFrame,
    transform: &'a PlotTransform,
    surface: &'a PlotSurface,
    config: &'a PlotConfig,
    palette: Palette,
}

impl<'a> Canvas<'a> {
    pub fn new(
        frame: &'a mut RenderFrame,
        transform: &'a PlotTransform,
        surface: &'a PlotSurface,
        config: &'a PlotConfig,
    ) -> Self {
        Self {
            frame,
            transform,
            surface,
            config,
            palette: config.theme.palette(),
        }
    }

    #[must_use]
    pub fn transform(&self) -> &PlotTransform {
        self.transform
    }

    #[must_use]
    pub fn surface(&self) -> &PlotSurface {
        self.surface
    }

    #[must_use]
    pub fn config(&self) -> &PlotConfig {
        self.config
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[must_use]
    pub fn device(&self) -> Rectangle {
        self.surface.device()
    }

    /// Scales a CSS length into device pixels.
    #[must_use]
    pub fn px(&self, css: f64) -> f64 {
        self.surface.px(css)
    }

    #[must_use]
    pub fn font_px(&self) -> f64 {
        self.px(self.config.text_size)
    }

    #[must_use]
    pub fn text_width(&self, text: &str) -> f64 {
        estimate_text_width_px(text, self.font_px())
    }

    pub fn to_device(&self, domain: Point) -> PlotResult<Point> {
        self.transform.to_device(domain)
    }

    #[must_use]
    pub fn to_domain(&self, device: Point) -> Point {
        self.transform.to_domain(device)
    }

    pub fn fill_background(&mut self) {
        let device = self.device();
        let color = self.palette.background;
        self.fill_rect(CanvasLayerKind::Background, device, color);
    }

    pub fn fill_rect(&mut self, layer: CanvasLayerKind, rect: Rectangle, color: Color) {
        self.frame
            .push_rect(layer, RectPrimitive::new(rect.x, rect.y, rect.w, rect.h, color));
    }

    pub fn stroke_line(
        &mut self,
        layer: CanvasLayerKind,
        a: Point,
        b: Point,
        width_px: f64,
        color: Color,
    ) {
        self.frame
            .push_line(layer, LinePrimitive::new(a.x, a.y, b.x, b.y, width_px, color));
    }

    pub fn stroke_dashed_line(
        &mut self,
        layer: CanvasLayerKind,
        a: Point,
        b: Point,
        width_px: f64,
        color: Color,
    ) {
        self.frame.push_line(
            layer,
            LinePrimitive::new(a.x, a.y, b.x, b.y, width_px, color)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );
    }

    /// Series segment between two device points.
    pub fn draw_line(&mut self, a: Point, b: Point, color: Color) {
        let width = self.px(self.config.line_width);
        self.stroke_line(CanvasLayerKind::Series, a, b, width, color);
    }

    /// Series vertex marker at a device point.
    pub fn draw_dot(&mut self, center: Point, color: Color) {
        let radius = self.px(self.config.dot_radius);
        self.fill_circle(CanvasLayerKind::Series, center, radius, color);
    }

    pub fn fill_circle(
        &mut self,
        layer: CanvasLayerKind,
        center: Point,
        radius_px: f64,
        color: Color,
    ) {
        self.frame
            .push_circle(layer, CirclePrimitive::new(center.x, center.y, radius_px, color));
    }

    /// Places a label at a device point, offset by `(dx, dy)` device pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_device_text(
        &mut self,
        layer: CanvasLayerKind,
        anchor: Point,
        text: &str,
        dx: f64,
        dy: f64,
        h_align: TextHAlign,
        v_align: TextVAlign,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let font_px = self.font_px();
        self.frame.push_text(
            layer,
            TextPrimitive::new(text, anchor.x + dx, anchor.y + dy, font_px, color, h_align)
                .with_v_align(v_align),
        );
    }

    /// Full-size horizontal and vertical lines through `pointer`, with the
    /// domain value under the pointer printed on the tick bars.
    pub fn draw_crosshair(&mut self, pointer: Point) {
        let device = self.device();
        let color = self.palette.crosshair;
        let width = self.px(1.0);
        self.stroke_dashed_line(
            CanvasLayerKind::Crosshair,
            Point::new(device.x, pointer.y),
            Point::new(device.right(), pointer.y),
            width,
            color,
        );
        self.stroke_dashed_line(
            CanvasLayerKind::Crosshair,
            Point::new(pointer.x, device.y),
            Point::new(pointer.x, device.bottom()),
            width,
            color,
        );

        let domain = self.to_domain(pointer);
        if !domain.is_finite() {
            return;
        }
        let padding = self.px(self.config.text_padding);
        let bar_h = self.px(self.config.tick_bar_height);
        self.draw_value_label(
            Point::new(pointer.x, device.bottom() - bar_h / 2.0),
            &format_tick(domain.x),
            TextHAlign::Center,
            padding,
        );
        self.draw_value_label(
            Point::new(device.x + padding, pointer.y),
            &format_tick(domain.y),
            TextHAlign::Left,
            padding,
        );
    }

    fn draw_value_label(&mut self, anchor: Point, text: &str, h_align: TextHAlign, padding: f64) {
        let width = self.text_width(text);
        let height = self.font_px() + padding;
        let left = match h_align {
            TextHAlign::Left => anchor.x,
            TextHAlign::Center => anchor.x - width / 2.0,
            TextHAlign::Right => anchor.x - width,
        };
        let background = self.palette.crosshair;
        let text_color = self.palette.tick_bar;
        self.fill_rect(
            CanvasLayerKind::Crosshair,
            Rectangle::new(
                left - padding / 2.0,
                anchor.y - height / 2.0,
                width + padding,
                height,
            ),
            background,
        );
        self.draw_device_text(
            CanvasLayerKind::Crosshair,
            anchor,
            text,
            0.0,
            0.0,
            h_align,
            TextVAlign::Middle,
            text_color,
        );
    }
}

/// Tick label text: two decimals, `-0.00` normalized.
#[must_use]
pub fn format_tick(value: f64) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" { "0.00".to_owned() } else { text }
}
