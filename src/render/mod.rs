mod frame;
mod layer;
mod null_renderer;
mod primitives;
mod text;

pub use frame::{LayerPrimitives, RenderFrame};
pub use layer::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign,
    TextPrimitive, TextVAlign,
};
pub use text::estimate_text_width_px;

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from plot geometry and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
