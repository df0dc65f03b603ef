//! 2D affine geometry kernel.
//!
//! All types here are small `Copy` values. `Rectangle` and `Matrix` can also
//! be recycled through thread-local free lists (see [`pool`]) for hot paths
//! that want to track allocation counts.

mod matrix;
pub mod pool;
mod point;
mod rectangle;
mod segment;
mod size;

pub use matrix::{Matrix, MatrixKind};
pub use point::Point;
pub use pool::{Pool, Poolable};
pub use rectangle::Rectangle;
pub use segment::{SegmentIntersection, segment_intersection};
pub use size::Size;

/// Tolerance used by [`epsilon_equals`].
pub const EPSILON: f64 = 0.000_000_1;

/// Rounds `value` down to the nearest multiple of `step`.
#[must_use]
pub fn floor_to(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).floor() * step
}

/// Rounds `value` up to the nearest multiple of `step`.
#[must_use]
pub fn ceil_to(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).ceil() * step
}

#[must_use]
pub fn epsilon_equals(value: f64, other: f64) -> bool {
    (value - other).abs() < EPSILON
}
