pub mod fit;
pub mod scale;
pub mod series;

pub use fit::{FitPadding, data_bounds, fit_series};
pub use scale::{Scale, ScaleKind, linear_ticks, nice_step};
pub use series::{Axis, AxisHint, Series, resolve_axis_kinds, sort_values_by_axis};
