use std::fmt;

use serde::{Deserialize, Serialize};

use super::pool::{self, Poolable};
use super::{Matrix, Point, ceil_to, floor_to};

/// Axis-aligned box with its origin at `(x, y)`.
///
/// A rectangle is empty when either extent is `<= 0`. Empty rectangles act
/// as the identity for [`Rectangle::union`] and as the absorbing element for
/// [`Rectangle::intersect`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Poolable for Rectangle {
    const SENTINEL: Self = Self::new(12345.0, 67890.0, 12345.0, 67890.0);
}

impl Rectangle {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Square of side `size` centered on the origin.
    #[must_use]
    pub fn square(size: f64) -> Self {
        Self::new(-size / 2.0, -size / 2.0, size, size)
    }

    /// Tightest rectangle around the finite coordinates of `points`.
    ///
    /// NaN components are skipped per axis; an empty input yields an empty
    /// rectangle.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in points {
            if !point.x.is_nan() {
                min_x = min_x.min(point.x);
                max_x = max_x.max(point.x);
            }
            if !point.y.is_nan() {
                min_y = min_y.min(point.y);
                max_y = max_y.max(point.y);
            }
        }
        if min_x > max_x || min_y > max_y {
            return Self::empty();
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Pops a rectangle from the thread-local free list.
    ///
    /// Fresh instances are filled with a sentinel value, so callers must
    /// initialize the result before reading it.
    #[must_use]
    pub fn allocate() -> Self {
        pool::allocate_rectangle()
    }

    /// Returns this rectangle to the thread-local free list.
    pub fn free(self) {
        pool::free_rectangle(self);
    }

    pub fn set_elements(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
        self
    }

    pub fn set(&mut self, other: Rectangle) -> &mut Self {
        *self = other;
        self
    }

    pub fn set_empty(&mut self) -> &mut Self {
        *self = Self::empty();
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Whether `other` lies entirely inside this rectangle (half-open edges).
    #[must_use]
    pub fn contains(&self, other: &Rectangle) -> bool {
        let r1 = other.right();
        let b1 = other.bottom();
        let r2 = self.right();
        let b2 = self.bottom();
        other.x >= self.x
            && other.x < r2
            && other.y >= self.y
            && other.y < b2
            && r1 > self.x
            && r1 <= r2
            && b1 > self.y
            && b1 <= b2
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Grows the rectangle minimally so that it contains `point`.
    pub fn extend_point(&mut self, point: Point) -> &mut Self {
        if self.contains_point(point) {
            return self;
        }
        let x1 = self.right().max(point.x);
        let y1 = self.bottom().max(point.y);
        self.x = self.x.min(point.x);
        self.y = self.y.min(point.y);
        self.w = x1 - self.x;
        self.h = y1 - self.y;
        self
    }

    #[must_use]
    pub fn is_contained(&self, others: &[Rectangle]) -> bool {
        others.iter().any(|other| other.contains(self))
    }

    #[must_use]
    pub fn is_smaller_than(&self, other: &Rectangle) -> bool {
        self.w < other.w && self.h < other.h
    }

    #[must_use]
    pub fn is_larger_than(&self, other: &Rectangle) -> bool {
        self.w > other.w && self.h > other.h
    }

    /// Grows `self` to the smallest rectangle containing both inputs.
    ///
    /// An empty `self` takes the value of `other`; an empty `other` leaves
    /// `self` unchanged.
    pub fn union(&mut self, other: &Rectangle) -> &mut Self {
        if self.is_empty() {
            *self = *other;
            return self;
        }
        if other.is_empty() {
            return self;
        }
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        self.x = self.x.min(other.x);
        self.y = self.y.min(other.y);
        self.w = x1 - self.x;
        self.h = y1 - self.y;
        self
    }

    /// Shrinks `self` to the overlap with `other`.
    ///
    /// The result is the canonical empty rectangle when the inputs do not
    /// overlap or either of them is empty.
    pub fn intersect(&mut self, other: &Rectangle) -> &mut Self {
        if self.is_empty() || other.is_empty() {
            return self.set_empty();
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let w = self.right().min(other.right()) - x;
        let h = self.bottom().min(other.bottom()) - y;
        if w <= 0.0 || h <= 0.0 {
            return self.set_empty();
        }
        self.set_elements(x, y, w, h)
    }

    #[must_use]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.intersects_translated(other, 0.0, 0.0)
    }

    /// Overlap test against `other` shifted by `(tx, ty)`.
    #[must_use]
    pub fn intersects_translated(&self, other: &Rectangle, tx: f64, ty: f64) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let x = self.x.max(other.x + tx);
        let y = self.y.max(other.y + ty);
        let w = self.right().min(other.right() + tx) - x;
        let h = self.bottom().min(other.bottom() + ty) - y;
        w > 0.0 && h > 0.0
    }

    /// Overlap test against the AABB of `other` after `matrix` is applied.
    #[must_use]
    pub fn intersects_transformed_aabb(&self, other: &Rectangle, matrix: &Matrix) -> bool {
        let mut transformed = *other;
        matrix.transform_rectangle_aabb(&mut transformed);
        self.intersects(&transformed)
    }

    /// Snaps to whole pixels. The result always covers the original.
    pub fn snap(&mut self) -> &mut Self {
        let x1 = self.right().ceil();
        let y1 = self.bottom().ceil();
        self.x = self.x.floor();
        self.y = self.y.floor();
        self.w = x1 - self.x;
        self.h = y1 - self.y;
        self
    }

    /// Snaps edges outward to multiples of `dx` / `dy`.
    pub fn snap_to(&mut self, dx: f64, dy: f64) -> &mut Self {
        let x1 = ceil_to(self.right(), dx);
        let y1 = ceil_to(self.bottom(), dy);
        self.x = floor_to(self.x, dx);
        self.y = floor_to(self.y, dy);
        self.w = x1 - self.x;
        self.h = y1 - self.y;
        self
    }

    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.x *= x;
        self.y *= y;
        self.w *= x;
        self.h *= y;
        self
    }

    pub fn offset(&mut self, x: f64, y: f64) -> &mut Self {
        self.x += x;
        self.y += y;
        self
    }

    pub fn resize(&mut self, w: f64, h: f64) -> &mut Self {
        self.w += w;
        self.h += h;
        self
    }

    /// Grows every side by `w` horizontally and `h` vertically.
    pub fn expand(&mut self, w: f64, h: f64) -> &mut Self {
        self.offset(-w, -h).resize(2.0 * w, 2.0 * h)
    }

    /// Grows every side by a fraction of the current extent.
    pub fn expand_percent(&mut self, w: f64, h: f64) -> &mut Self {
        let dw = self.w * w;
        let dh = self.h * h;
        self.expand(dw, dh)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[must_use]
    pub fn absolute_bounds(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.w, self.h)
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(2);
        write!(
            f,
            "{{{:.*}, {:.*}, {:.*}, {:.*}}}",
            digits, self.x, digits, self.y, digits, self.w, digits, self.h
        )
    }
}
