use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PlotError, PlotResult};

/// Relative half-width used to widen a zero-span domain.
pub const DEGENERATE_SPAN_EPSILON: f64 = 0.000_001;

const MAX_TICKS: usize = 10_000;

/// Largest decade exponent whose power of ten, and its reciprocal, are
/// finite normal `f64` values.
pub const LOG_AXIS_LIMIT: f64 = 307.0;

/// Mapping applied to domain values before the affine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleKind {
    /// Uniform spacing in raw units.
    #[default]
    Linear,
    /// Uniform spacing in base-10 log units (all values must be > 0).
    Log,
}

impl ScaleKind {
    /// Maps a domain value into axis space (`log10` for log scales).
    pub fn to_axis(self, value: f64) -> PlotResult<f64> {
        if !value.is_finite() {
            return Err(PlotError::InvalidData("value must be finite".to_owned()));
        }
        match self {
            Self::Linear => Ok(value),
            Self::Log => {
                if value <= 0.0 {
                    return Err(PlotError::InvalidData(format!(
                        "log scale requires values > 0, got {value}"
                    )));
                }
                Ok(value.log10())
            }
        }
    }

    /// Maps an axis-space value back into the domain.
    #[must_use]
    pub fn from_axis(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => 10_f64.powf(value),
        }
    }

    /// Like [`ScaleKind::from_axis`], but keeps log results finite and
    /// positive by clamping the exponent to `±LOG_AXIS_LIMIT`.
    #[must_use]
    pub fn from_axis_clamped(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => 10_f64.powf(value.clamp(-LOG_AXIS_LIMIT, LOG_AXIS_LIMIT)),
        }
    }

    /// Validates a domain for this kind and widens it when it has zero span.
    pub fn normalize_domain(self, min: f64, max: f64) -> PlotResult<(f64, f64)> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PlotError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if self == Self::Log && (min <= 0.0 || max <= 0.0) {
            return Err(PlotError::InvalidLogDomain { min, max });
        }
        if min != max {
            return Ok((min, max));
        }

        warn!(value = min, kind = ?self, "widening zero-span scale domain");
        match self {
            Self::Linear => {
                let half = (min.abs() * DEGENERATE_SPAN_EPSILON).max(DEGENERATE_SPAN_EPSILON);
                Ok((min - half, max + half))
            }
            Self::Log => Ok((
                min * (1.0 - DEGENERATE_SPAN_EPSILON),
                max * (1.0 + DEGENERATE_SPAN_EPSILON),
            )),
        }
    }
}

/// Domain ↔ range mapper for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    kind: ScaleKind,
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl Scale {
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> PlotResult<Self> {
        Self::new(ScaleKind::Linear, domain, range)
    }

    /// Builds a log scale. Non-positive domain bounds are rejected.
    pub fn log(domain: (f64, f64), range: (f64, f64)) -> PlotResult<Self> {
        Self::new(ScaleKind::Log, domain, range)
    }

    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> PlotResult<Self> {
        let (domain_start, domain_end) = kind.normalize_domain(domain.0, domain.1)?;
        validate_range(range)?;
        Ok(Self {
            kind,
            domain_start,
            domain_end,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Replaces the output range, e.g. after a resize.
    pub fn with_range(self, range: (f64, f64)) -> PlotResult<Self> {
        validate_range(range)?;
        Ok(Self {
            range_start: range.0,
            range_end: range.1,
            ..self
        })
    }

    /// Domain bounds in axis space (`log10` of the bounds for log scales).
    #[must_use]
    pub fn axis_domain(&self) -> (f64, f64) {
        match self.kind {
            ScaleKind::Linear => (self.domain_start, self.domain_end),
            ScaleKind::Log => (self.domain_start.log10(), self.domain_end.log10()),
        }
    }

    /// Affine coefficients `(scale, offset)` so that
    /// `range = scale * axis(value) + offset`.
    #[must_use]
    pub fn coefficients(&self) -> (f64, f64) {
        let (a0, a1) = self.axis_domain();
        let scale = (self.range_end - self.range_start) / (a1 - a0);
        (scale, self.range_start - a0 * scale)
    }

    pub fn map(&self, value: f64) -> PlotResult<f64> {
        let axis = self.kind.to_axis(value)?;
        let (scale, offset) = self.coefficients();
        Ok(scale * axis + offset)
    }

    /// Exact algebraic inverse of [`Scale::map`].
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (scale, offset) = self.coefficients();
        self.kind.from_axis((pixel - offset) / scale)
    }

    /// Produces roughly `count` human-friendly values inside the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self.kind {
            ScaleKind::Linear => linear_ticks(self.domain_start, self.domain_end, count),
            ScaleKind::Log => log_ticks(self.domain_start, self.domain_end, count),
        }
    }
}

fn validate_range(range: (f64, f64)) -> PlotResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
        return Err(PlotError::InvalidData(
            "scale range must be finite and non-zero".to_owned(),
        ));
    }
    Ok(())
}

/// Picks the step from `{1, 2, 5} × 10^k` closest to `span / count`.
#[must_use]
pub fn nice_step(span: f64, count: usize) -> f64 {
    let span = span.abs();
    if count == 0 || !span.is_finite() || span == 0.0 {
        return 1.0;
    }
    let raw = span / count as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|multiplier| multiplier * magnitude)
        .min_by(|lhs, rhs| (lhs - raw).abs().total_cmp(&(rhs - raw).abs()))
        .unwrap_or(magnitude)
}

/// Step multiples lying inside `[start, end]`, in ascending order.
#[must_use]
pub fn linear_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    if lo == hi {
        return vec![lo];
    }

    let step = nice_step(hi - lo, count);
    let tolerance = step * 1e-9;
    let first = ((lo - tolerance) / step).ceil() as i64;
    let last = ((hi + tolerance) / step).floor() as i64;
    if last < first {
        return Vec::new();
    }

    (first..=last)
        .take(MAX_TICKS)
        .map(|index| {
            let value = (index as f64 * step).clamp(lo, hi);
            if value == 0.0 { 0.0 } else { value }
        })
        .collect()
}

fn log_ticks(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let min = start.min(end);
    let max = start.max(end);
    let min_exp = min.log10().floor() as i32;
    let max_exp = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= min && candidate <= max {
                ticks.push(candidate);
            }
        }
    }

    // Narrow domains inside one decade have no ladder values; fall back to
    // plain linear steps, which are positive there.
    if ticks.len() < 2 {
        return linear_ticks(min, max, count);
    }
    evenly_sample(ticks, count)
}

fn evenly_sample(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target || target == 0 {
        return ticks;
    }
    if target == 1 {
        return vec![ticks[0]];
    }

    let last_index = ticks.len() - 1;
    let mut sampled: Vec<f64> = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = step as f64 / (target - 1) as f64;
        let index = ((ratio * last_index as f64).round() as usize).min(last_index);
        let value = ticks[index];
        if sampled.last().is_some_and(|prev| *prev == value) {
            continue;
        }
        sampled.push(value);
    }
    sampled
}
