use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ScaleKind;
use crate::geometry::Point;
use crate::render::Color;

/// Axis selector for per-axis helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Optional per-series axis overrides.
///
/// `min`/`max` extend the fitted domain so a fixed range can be shown even
/// when the data is narrower. `log` requests a logarithmic axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisHint {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub log: bool,
}

impl AxisHint {
    #[must_use]
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            log: false,
        }
    }

    #[must_use]
    pub fn log() -> Self {
        Self {
            min: None,
            max: None,
            log: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        if self.log {
            ScaleKind::Log
        } else {
            ScaleKind::Linear
        }
    }
}

/// One named polyline, e.g. quality-vs-bitrate samples of an encode job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub color: Color,
    pub values: Vec<Point>,
    #[serde(default)]
    pub x_axis: Option<AxisHint>,
    #[serde(default)]
    pub y_axis: Option<AxisHint>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Color, values: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            color,
            values,
            x_axis: None,
            y_axis: None,
        }
    }

    /// Builds a series from raw `(x, y)` pairs.
    #[must_use]
    pub fn from_pairs(name: impl Into<String>, color: Color, pairs: &[(f64, f64)]) -> Self {
        Self::new(name, color, pairs.iter().copied().map(Point::from).collect())
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, hint: AxisHint) -> Self {
        self.x_axis = Some(hint);
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, hint: AxisHint) -> Self {
        self.y_axis = Some(hint);
        self
    }

    /// Text shown in the legend: `"name label"`, or the name alone.
    #[must_use]
    pub fn legend_text(&self) -> String {
        if self.label.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.label)
        }
    }

    #[must_use]
    pub fn hint(&self, axis: Axis) -> Option<AxisHint> {
        match axis {
            Axis::X => self.x_axis,
            Axis::Y => self.y_axis,
        }
    }
}

/// Axis kinds requested by a set of series: log if any series asks for it.
#[must_use]
pub fn resolve_axis_kinds(series: &[Series]) -> (ScaleKind, ScaleKind) {
    let kind = |axis: Axis| {
        if series
            .iter()
            .any(|s| s.hint(axis).is_some_and(|hint| hint.log))
        {
            ScaleKind::Log
        } else {
            ScaleKind::Linear
        }
    };
    (kind(Axis::X), kind(Axis::Y))
}

/// Sorts samples by one coordinate; NaN sorts last.
pub fn sort_values_by_axis(values: &mut [Point], axis: Axis) {
    let key = |point: &Point| match axis {
        Axis::X => point.x,
        Axis::Y => point.y,
    };
    values.sort_by_key(|point| {
        let value = key(point);
        (value.is_nan(), OrderedFloat(value))
    });
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisHint, Series, resolve_axis_kinds, sort_values_by_axis};
    use crate::core::ScaleKind;
    use crate::geometry::Point;
    use crate::render::Color;

    #[test]
    fn legend_text_joins_name_and_label() {
        let series = Series::from_pairs("x264", Color::rgb(0.0, 0.0, 0.0), &[]);
        assert_eq!(series.legend_text(), "x264");
        assert_eq!(series.with_label("MSSSIM").legend_text(), "x264 MSSSIM");
    }

    #[test]
    fn any_log_hint_switches_axis_kind() {
        let linear = Series::from_pairs("a", Color::rgb(0.0, 0.0, 0.0), &[(1.0, 1.0)]);
        let log_x = linear.clone().with_x_axis(AxisHint::log());
        assert_eq!(
            resolve_axis_kinds(&[linear.clone()]),
            (ScaleKind::Linear, ScaleKind::Linear)
        );
        assert_eq!(
            resolve_axis_kinds(&[linear, log_x]),
            (ScaleKind::Log, ScaleKind::Linear)
        );
    }

    #[test]
    fn sort_by_axis_orders_bitrates() {
        let mut values = vec![
            Point::new(0.3, 1.0),
            Point::new(f64::NAN, 2.0),
            Point::new(0.1, 3.0),
        ];
        sort_values_by_axis(&mut values, Axis::X);
        assert_eq!(values[0], Point::new(0.1, 3.0));
        assert_eq!(values[1], Point::new(0.3, 1.0));
        assert!(values[2].x.is_nan());
    }
}
