use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::debug;

use crate::error::{PlotError, PlotResult};
use crate::render::{
    Color, LayerPrimitives, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension trait for renderers that can draw into an external Cairo
/// context, e.g. a windowing toolkit's paint callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> PlotResult<()>;
}

/// Cairo + Pango renderer painting into an offscreen ARGB image surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        let surface = create_surface(width, height)?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> PlotResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Reallocates the surface when the device size changed.
    pub fn ensure_size(&mut self, width: i32, height: i32) -> PlotResult<()> {
        if self.surface.width() == width && self.surface.height() == height {
            return Ok(());
        }
        debug!(width, height, "resizing cairo surface");
        self.surface = create_surface(width, height)?;
        Ok(())
    }

    /// Encodes the current surface as PNG.
    pub fn write_png(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            PlotError::InvalidData(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| PlotError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            draw_layer(context, layer, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        self.ensure_size(frame.width.ceil() as i32, frame.height.ceil() as i32)?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> PlotResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_layer(
    context: &Context,
    layer: &LayerPrimitives,
    stats: &mut CairoRenderStats,
) -> PlotResult<()> {
    for rect in &layer.rects {
        draw_rect(context, *rect)?;
        stats.rects_drawn += 1;
    }

    for line in &layer.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        match line.stroke_style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed => {
                context.set_dash(&[line.stroke_width * 4.0, line.stroke_width * 3.0], 0.0);
            }
            LineStrokeStyle::Dotted => {
                context.set_dash(&[line.stroke_width, line.stroke_width * 2.0], 0.0);
            }
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }
    context.set_dash(&[], 0.0);

    for circle in &layer.circles {
        apply_color(context, circle.fill_color);
        context.new_sub_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
        stats.circles_drawn += 1;
    }

    for text in &layer.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        let y = match text.v_align {
            TextVAlign::Top => text.y,
            TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
            TextVAlign::Bottom => text.y - f64::from(text_height),
        };

        apply_color(context, text.color);
        context.move_to(x, y);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }

    Ok(())
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> PlotResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn create_surface(width: i32, height: i32) -> PlotResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(PlotError::InvalidViewport {
            width: f64::from(width),
            height: f64::from(height),
        });
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
