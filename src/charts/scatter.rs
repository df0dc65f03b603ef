use tracing::{debug, warn};

use crate::charts::SeriesRenderer;
use crate::charts::legend::{LegendEntry, draw_legend};
use crate::core::{ScaleKind, Series, fit_series, resolve_axis_kinds};
use crate::error::PlotResult;
use crate::geometry::{Point, Rectangle};
use crate::plot::{Canvas, PlotConfig, PlotSurface};

/// Polylines with vertex dots, one per series, plus a legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    series: Vec<Series>,
    show_legend: bool,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ScatterPlot {
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series,
            show_legend: true,
        }
    }

    #[must_use]
    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_series(&mut self, series: Vec<Series>) {
        debug!(count = series.len(), "replace scatter series");
        self.series = series;
    }

    pub(crate) fn legend_entries(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|series| LegendEntry {
                full: series.legend_text(),
                short: series.name.clone(),
                color: series.color,
            })
            .collect()
    }
}

impl SeriesRenderer for ScatterPlot {
    fn axis_kinds(&self) -> (ScaleKind, ScaleKind) {
        resolve_axis_kinds(&self.series)
    }

    fn fit_viewport(&self, surface: &PlotSurface, config: &PlotConfig) -> PlotResult<Rectangle> {
        fit_series(&self.series, self.axis_kinds(), surface.fit_padding(config))
    }

    fn draw_series(&self, canvas: &mut Canvas<'_>) -> PlotResult<()> {
        for series in &self.series {
            draw_polyline(canvas, series);
        }
        Ok(())
    }

    fn draw_annotations(&self, canvas: &mut Canvas<'_>) -> PlotResult<()> {
        if self.show_legend && !self.series.is_empty() {
            draw_legend(canvas, &self.legend_entries());
        }
        Ok(())
    }
}

/// Joins consecutive samples and marks each one. Samples the axes cannot
/// show (NaN, non-positive on a log axis) are dropped and break the line.
fn draw_polyline(canvas: &mut Canvas<'_>, series: &Series) {
    let mut vertices: Vec<Point> = Vec::with_capacity(series.values.len());
    let mut previous: Option<Point> = None;
    let mut dropped = 0_usize;

    for value in &series.values {
        match canvas.to_device(*value) {
            Ok(point) => {
                if let Some(start) = previous {
                    canvas.draw_line(start, point, series.color);
                }
                vertices.push(point);
                previous = Some(point);
            }
            Err(_) => {
                dropped += 1;
                previous = None;
            }
        }
    }
    for vertex in vertices {
        canvas.draw_dot(vertex, series.color);
    }

    if dropped > 0 {
        warn!(series = %series.name, dropped, "dropped samples outside the axis domain");
    }
}
