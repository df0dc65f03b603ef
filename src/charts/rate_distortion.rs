use smallvec::SmallVec;
use tracing::trace;

use crate::charts::{ScatterPlot, SeriesRenderer};
use crate::core::{Axis, ScaleKind, Series, sort_values_by_axis};
use crate::error::PlotResult;
use crate::geometry::{Point, Rectangle, segment_intersection};
use crate::plot::{Canvas, PlotConfig, PlotSurface, PlotTransform, TickLabels, format_tick};
use crate::render::{CanvasLayerKind, TextHAlign, TextVAlign};

/// Where a probe line crosses one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub series_index: usize,
    /// Crossing in domain units.
    pub point: Point,
}

/// Difference between two neighbouring hits along one probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeDelta {
    pub lower: ProbeHit,
    pub upper: ProbeHit,
    /// `upper - lower` along the probed coordinate.
    pub absolute: f64,
    /// `absolute / lower * 100`; `None` when `lower` is zero.
    pub percent: Option<f64>,
}

/// Hits of the vertical probe (constant bitrate, compared by quality) and of
/// the horizontal probe (constant quality, compared by bitrate).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    pub vertical: SmallVec<[ProbeHit; 8]>,
    pub horizontal: SmallVec<[ProbeHit; 8]>,
    pub vertical_deltas: Vec<ProbeDelta>,
    pub horizontal_deltas: Vec<ProbeDelta>,
}

impl ProbeResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Scatter plot of bitrate (x) against quality (y) with optional probe
/// annotations under the pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateDistortionPlot {
    scatter: ScatterPlot,
    intersection_overlay: bool,
}

impl RateDistortionPlot {
    /// Builds the plot; samples of every series are ordered by bitrate.
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            scatter: ScatterPlot::new(sort_by_bitrate(series)),
            intersection_overlay: false,
        }
    }

    #[must_use]
    pub fn with_intersection_overlay(mut self, enabled: bool) -> Self {
        self.intersection_overlay = enabled;
        self
    }

    #[must_use]
    pub fn intersection_overlay(&self) -> bool {
        self.intersection_overlay
    }

    #[must_use]
    pub fn scatter(&self) -> &ScatterPlot {
        &self.scatter
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        self.scatter.series()
    }

    pub fn set_series(&mut self, series: Vec<Series>) {
        self.scatter.set_series(sort_by_bitrate(series));
    }

    /// Crosses a vertical and a horizontal probe through `pointer` (device
    /// pixels) with every series polyline.
    ///
    /// Intersections are solved in axis space, where the polylines are
    /// straight on screen, then reported in domain units.
    #[must_use]
    pub fn probe_intersections(&self, transform: &PlotTransform, pointer: Point) -> ProbeResult {
        let kinds = transform.kinds();
        let viewport = transform.viewport();
        let probe = transform.device_to_axis(pointer);

        let vertical_probe = (
            Point::new(probe.x, viewport.y),
            Point::new(probe.x, viewport.bottom()),
        );
        let horizontal_probe = (
            Point::new(viewport.x, probe.y),
            Point::new(viewport.right(), probe.y),
        );

        let mut result = ProbeResult::default();
        for (series_index, series) in self.series().iter().enumerate() {
            let vertices = axis_vertices(series, kinds);
            let last = vertices.len().saturating_sub(2);
            for (index, segment) in vertices.windows(2).enumerate() {
                let (a0, a1) = (segment[0], segment[1]);
                // Shared vertices belong to the segment that starts there.
                let include_end = index == last;
                if let Some(hit) = cross(a0, a1, vertical_probe, include_end) {
                    result.vertical.push(to_hit(hit, kinds, series_index));
                }
                if let Some(hit) = cross(a0, a1, horizontal_probe, include_end) {
                    result.horizontal.push(to_hit(hit, kinds, series_index));
                }
            }
        }

        result
            .vertical
            .sort_by(|lhs, rhs| lhs.point.y.total_cmp(&rhs.point.y));
        result
            .horizontal
            .sort_by(|lhs, rhs| lhs.point.x.total_cmp(&rhs.point.x));
        result.vertical_deltas = neighbour_deltas(&result.vertical, Axis::Y);
        result.horizontal_deltas = neighbour_deltas(&result.horizontal, Axis::X);
        trace!(
            vertical = result.vertical.len(),
            horizontal = result.horizontal.len(),
            "probe intersections"
        );
        result
    }

    fn draw_probe_annotations(&self, canvas: &mut Canvas<'_>, result: &ProbeResult) {
        let device = canvas.device();
        let padding = canvas.px(canvas.config().text_padding);
        let bar_w = canvas.px(canvas.config().tick_bar_width);
        let radius = canvas.px(canvas.config().dot_radius) * 2.0;
        let color = canvas.palette().annotation;

        for hit in result.vertical.iter().chain(result.horizontal.iter()) {
            if let Ok(center) = canvas.to_device(hit.point) {
                let series_color = self.series()[hit.series_index].color;
                canvas.fill_circle(CanvasLayerKind::Overlay, center, radius, series_color);
            }
        }

        // Quality deltas along the right edge, at the midpoint of each pair.
        for delta in &result.vertical_deltas {
            let (Ok(lower), Ok(upper)) = (
                canvas.to_device(delta.lower.point),
                canvas.to_device(delta.upper.point),
            ) else {
                continue;
            };
            let anchor = Point::new(device.right() - padding, (lower.y + upper.y) / 2.0);
            canvas.draw_device_text(
                CanvasLayerKind::Overlay,
                anchor,
                &format_delta(delta),
                0.0,
                0.0,
                TextHAlign::Right,
                TextVAlign::Middle,
                color,
            );
        }

        // Bitrate deltas along the top edge.
        for delta in &result.horizontal_deltas {
            let (Ok(lower), Ok(upper)) = (
                canvas.to_device(delta.lower.point),
                canvas.to_device(delta.upper.point),
            ) else {
                continue;
            };
            let x = ((lower.x + upper.x) / 2.0).max(device.x + bar_w + padding);
            canvas.draw_device_text(
                CanvasLayerKind::Overlay,
                Point::new(x, device.y + padding),
                &format_delta(delta),
                0.0,
                0.0,
                TextHAlign::Center,
                TextVAlign::Top,
                color,
            );
        }
    }
}

impl SeriesRenderer for RateDistortionPlot {
    fn axis_kinds(&self) -> (ScaleKind, ScaleKind) {
        self.scatter.axis_kinds()
    }

    fn fit_viewport(&self, surface: &PlotSurface, config: &PlotConfig) -> PlotResult<Rectangle> {
        self.scatter.fit_viewport(surface, config)
    }

    fn draw_series(&self, canvas: &mut Canvas<'_>) -> PlotResult<()> {
        self.scatter.draw_series(canvas)
    }

    fn tick_labels(&self) -> TickLabels {
        self.scatter.tick_labels()
    }

    fn draw_annotations(&self, canvas: &mut Canvas<'_>) -> PlotResult<()> {
        self.scatter.draw_annotations(canvas)
    }

    fn draw_pointer_overlay(&self, canvas: &mut Canvas<'_>, pointer: Point) -> PlotResult<()> {
        canvas.draw_crosshair(pointer);
        if !self.intersection_overlay {
            return Ok(());
        }
        let result = self.probe_intersections(canvas.transform(), pointer);
        self.draw_probe_annotations(canvas, &result);
        Ok(())
    }
}

fn sort_by_bitrate(mut series: Vec<Series>) -> Vec<Series> {
    for entry in &mut series {
        sort_values_by_axis(&mut entry.values, Axis::X);
    }
    series
}

fn axis_vertices(series: &Series, kinds: (ScaleKind, ScaleKind)) -> Vec<Point> {
    series
        .values
        .iter()
        .filter_map(|value| {
            let x = kinds.0.to_axis(value.x).ok()?;
            let y = kinds.1.to_axis(value.y).ok()?;
            Some(Point::new(x, y))
        })
        .collect()
}

fn cross(a0: Point, a1: Point, probe: (Point, Point), include_end: bool) -> Option<Point> {
    let hit = segment_intersection(a0, a1, probe.0, probe.1)?;
    if !hit.intersects_segment_a || (hit.ua == 1.0 && !include_end) {
        return None;
    }
    Some(hit.point)
}

fn to_hit(axis_point: Point, kinds: (ScaleKind, ScaleKind), series_index: usize) -> ProbeHit {
    ProbeHit {
        series_index,
        point: Point::new(kinds.0.from_axis(axis_point.x), kinds.1.from_axis(axis_point.y)),
    }
}

fn neighbour_deltas(hits: &[ProbeHit], axis: Axis) -> Vec<ProbeDelta> {
    hits.windows(2)
        .filter(|pair| pair[0].series_index != pair[1].series_index)
        .map(|pair| {
            let (lower, upper) = (pair[0], pair[1]);
            let (from, to) = match axis {
                Axis::X => (lower.point.x, upper.point.x),
                Axis::Y => (lower.point.y, upper.point.y),
            };
            let absolute = to - from;
            ProbeDelta {
                lower,
                upper,
                absolute,
                percent: (from != 0.0).then(|| absolute / from * 100.0),
            }
        })
        .collect()
}

fn format_delta(delta: &ProbeDelta) -> String {
    match delta.percent {
        Some(percent) => format!("{} ({percent:+.2}%)", format_tick(delta.absolute)),
        None => format_tick(delta.absolute),
    }
}
