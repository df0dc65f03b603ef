//! Concrete chart kinds plugged into [`crate::plot::Plot`].

mod bar;
mod legend;
mod rate_distortion;
mod scatter;

pub use bar::{BarLayout, BarMode, BarPlot, BarPlotConfig, BarRow};
pub use rate_distortion::{ProbeDelta, ProbeHit, ProbeResult, RateDistortionPlot};
pub use scatter::ScatterPlot;

use crate::core::ScaleKind;
use crate::error::PlotResult;
use crate::geometry::{Point, Rectangle};
use crate::plot::{Canvas, PlotConfig, PlotSurface, TickLabels};

/// Data-specific half of the render pipeline.
///
/// The plot calls these hooks in a fixed order on every draw; implementors
/// only emit primitives through the [`Canvas`].
pub trait SeriesRenderer {
    /// Mapping applied to each axis before the affine transform.
    fn axis_kinds(&self) -> (ScaleKind, ScaleKind) {
        (ScaleKind::Linear, ScaleKind::Linear)
    }

    /// Axis-space viewport covering the data on `surface`.
    fn fit_viewport(&self, surface: &PlotSurface, config: &PlotConfig) -> PlotResult<Rectangle>;

    fn draw_series(&self, canvas: &mut Canvas<'_>) -> PlotResult<()>;

    /// Axes whose tick values are meaningful to print.
    fn tick_labels(&self) -> TickLabels {
        TickLabels::BOTH
    }

    /// Legend and other labels painted above the tick bars.
    fn draw_annotations(&self, _canvas: &mut Canvas<'_>) -> PlotResult<()> {
        Ok(())
    }

    /// Overlay for the pointer at `pointer` (device pixels).
    fn draw_pointer_overlay(&self, canvas: &mut Canvas<'_>, pointer: Point) -> PlotResult<()> {
        canvas.draw_crosshair(pointer);
        Ok(())
    }
}
