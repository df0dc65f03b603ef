//! Fits plot viewports around series data.
//!
//! Bounds are computed in data space, then converted into axis space
//! (`log10` for log axes) where the tick-bar padding is applied.

use tracing::debug;

use crate::core::series::{Axis, Series};
use crate::core::ScaleKind;
use crate::error::{PlotError, PlotResult};
use crate::geometry::Rectangle;

/// Device-pixel reservations converted into domain padding during fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPadding {
    pub device_width: f64,
    pub device_height: f64,
    /// Pixels reserved on the left and right of the data.
    pub horizontal_px: f64,
    /// Pixels reserved above and below the data.
    pub vertical_px: f64,
}

impl FitPadding {
    #[must_use]
    pub fn none(device_width: f64, device_height: f64) -> Self {
        Self {
            device_width,
            device_height,
            horizontal_px: 0.0,
            vertical_px: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisExtent {
    min: f64,
    max: f64,
}

impl AxisExtent {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    fn is_set(self) -> bool {
        self.min <= self.max
    }
}

/// Tightest data-space rectangle around every sample component the axis
/// `kinds` can show, extended by explicit axis `min`/`max` hints.
///
/// Components a log axis cannot show (non-positive) are skipped like NaN;
/// hints are taken as given, so a non-positive log hint still fails later in
/// [`to_axis_rect`]. Returns `None` when there is nothing to fit on either
/// axis.
#[must_use]
pub fn data_bounds(series: &[Series], kinds: (ScaleKind, ScaleKind)) -> Option<Rectangle> {
    let mut x = AxisExtent::new();
    let mut y = AxisExtent::new();
    let mut skipped = 0_usize;
    for s in series {
        for point in &s.values {
            for (kind, value, extent) in [(kinds.0, point.x, &mut x), (kinds.1, point.y, &mut y)] {
                if kind.to_axis(value).is_ok() {
                    extent.include(value);
                } else if value.is_finite() {
                    skipped += 1;
                }
            }
        }
        for (axis, extent) in [(Axis::X, &mut x), (Axis::Y, &mut y)] {
            if let Some(hint) = s.hint(axis) {
                if let Some(min) = hint.min {
                    extent.include(min);
                }
                if let Some(max) = hint.max {
                    extent.include(max);
                }
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "left samples outside the log domain out of the bounds");
    }
    if !x.is_set() || !y.is_set() {
        return None;
    }
    Some(Rectangle::new(x.min, y.min, x.max - x.min, y.max - y.min))
}

/// Converts a data-space rectangle into axis space, widening zero spans.
///
/// Log axes reject non-positive bounds with [`PlotError::InvalidLogDomain`].
pub fn to_axis_rect(bounds: Rectangle, kinds: (ScaleKind, ScaleKind)) -> PlotResult<Rectangle> {
    let (x0, x1) = kinds.0.normalize_domain(bounds.x, bounds.right())?;
    let (y0, y1) = kinds.1.normalize_domain(bounds.y, bounds.bottom())?;
    let (ax0, ax1) = (kinds.0.to_axis(x0)?, kinds.0.to_axis(x1)?);
    let (ay0, ay1) = (kinds.1.to_axis(y0)?, kinds.1.to_axis(y1)?);
    Ok(Rectangle::new(ax0, ay0, ax1 - ax0, ay1 - ay0))
}

/// Fallback axis-space viewport used when there is no data at all.
///
/// Linear axes show `[0, 1]`; log axes show the decade `[1, 10]`, which is
/// the same unit interval once in axis space.
#[must_use]
pub fn default_axis_rect() -> Rectangle {
    Rectangle::new(0.0, 0.0, 1.0, 1.0)
}

/// Pads an axis-space rectangle by pixel reservations converted to domain
/// units through the current domain/device ratio.
pub fn pad_axis_rect(rect: Rectangle, padding: FitPadding) -> PlotResult<Rectangle> {
    if !(padding.device_width > 0.0) || !(padding.device_height > 0.0) {
        return Err(PlotError::InvalidViewport {
            width: padding.device_width,
            height: padding.device_height,
        });
    }
    let dx = padding.horizontal_px * (rect.w / padding.device_width);
    let dy = padding.vertical_px * (rect.h / padding.device_height);
    let mut padded = rect;
    padded.expand(dx, dy);
    Ok(padded)
}

/// Fits the axis-space viewport covering `series`, padded for tick labels.
pub fn fit_series(
    series: &[Series],
    kinds: (ScaleKind, ScaleKind),
    padding: FitPadding,
) -> PlotResult<Rectangle> {
    let axis_rect = match data_bounds(series, kinds) {
        Some(bounds) => to_axis_rect(bounds, kinds)?,
        None => default_axis_rect(),
    };
    let fitted = pad_axis_rect(axis_rect, padding)?;
    debug!(
        series = series.len(),
        bounds = %axis_rect,
        fitted = %fitted,
        "fit series viewport"
    );
    Ok(fitted)
}
