use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::pool::{self, Poolable};
use super::{Point, Rectangle, epsilon_equals};

/// Cached classification used for fast paths.
///
/// The tag is never authoritative: `Unknown` is always a correct value, and
/// every general operation produces the right result under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatrixKind {
    Identity,
    Translation,
    #[default]
    Unknown,
}

/// 2D affine transform.
///
/// Coefficients follow the `(a, b, c, d, tx, ty)` layout and map a point as
/// `(a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix {
    data: [f64; 6],
    kind: MatrixKind,
}

impl Poolable for Matrix {
    const SENTINEL: Self = Self {
        data: [12345.0; 6],
        kind: MatrixKind::Unknown,
    };
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        if self.kind == MatrixKind::Identity && other.kind == MatrixKind::Identity {
            return true;
        }
        self.data == other.data
    }
}

impl Matrix {
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            data: [a, b, c, d, tx, ty],
            kind: MatrixKind::Unknown,
        }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self {
            data: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            kind: MatrixKind::Identity,
        }
    }

    #[must_use]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            data: [1.0, 0.0, 0.0, 1.0, tx, ty],
            kind: MatrixKind::Translation,
        }
    }

    /// Pops a matrix from the thread-local free list.
    ///
    /// Fresh instances are sentinel-filled; initialize before use.
    #[must_use]
    pub fn allocate() -> Self {
        pool::allocate_matrix()
    }

    /// Returns this matrix to the thread-local free list.
    pub fn free(self) {
        pool::free_matrix(self);
    }

    #[must_use]
    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    #[must_use]
    pub fn elements(&self) -> [f64; 6] {
        self.data
    }

    #[must_use]
    pub fn a(&self) -> f64 {
        self.data[0]
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.data[1]
    }

    #[must_use]
    pub fn c(&self) -> f64 {
        self.data[2]
    }

    #[must_use]
    pub fn d(&self) -> f64 {
        self.data[3]
    }

    #[must_use]
    pub fn tx(&self) -> f64 {
        self.data[4]
    }

    #[must_use]
    pub fn ty(&self) -> f64 {
        self.data[5]
    }

    pub fn set_a(&mut self, a: f64) {
        self.data[0] = a;
        self.kind = MatrixKind::Unknown;
    }

    pub fn set_b(&mut self, b: f64) {
        self.data[1] = b;
        self.kind = MatrixKind::Unknown;
    }

    pub fn set_c(&mut self, c: f64) {
        self.data[2] = c;
        self.kind = MatrixKind::Unknown;
    }

    pub fn set_d(&mut self, d: f64) {
        self.data[3] = d;
        self.kind = MatrixKind::Unknown;
    }

    pub fn set_tx(&mut self, tx: f64) {
        self.data[4] = tx;
        self.promote_translation();
    }

    pub fn set_ty(&mut self, ty: f64) {
        self.data[5] = ty;
        self.promote_translation();
    }

    pub fn set_elements(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        self.data = [a, b, c, d, tx, ty];
        self.kind = MatrixKind::Unknown;
        self
    }

    pub fn set(&mut self, other: &Matrix) -> &mut Self {
        *self = *other;
        self
    }

    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// Recomputes the cached kind from the coefficients.
    pub fn classify(&mut self) -> MatrixKind {
        let [a, b, c, d, tx, ty] = self.data;
        self.kind = if a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0 {
            if tx == 0.0 && ty == 0.0 {
                MatrixKind::Identity
            } else {
                MatrixKind::Translation
            }
        } else {
            MatrixKind::Unknown
        };
        self.kind
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        if self.kind == MatrixKind::Identity {
            return true;
        }
        self.data == [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    }

    /// Whether the linear part is (within epsilon) the identity.
    ///
    /// Upgrades the cached kind to `Translation` on success.
    pub fn is_translation_only(&mut self) -> bool {
        if matches!(self.kind, MatrixKind::Translation | MatrixKind::Identity) {
            return true;
        }
        let [a, b, c, d, _, _] = self.data;
        let exact = a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0;
        let close = epsilon_equals(a, 1.0)
            && epsilon_equals(b, 0.0)
            && epsilon_equals(c, 0.0)
            && epsilon_equals(d, 1.0);
        if exact || close {
            self.kind = MatrixKind::Translation;
            return true;
        }
        false
    }

    /// Composes `self = self ∘ other`: `other` is applied first, in local space.
    pub fn concat(&mut self, other: &Matrix) -> &mut Self {
        if other.kind == MatrixKind::Identity {
            return self;
        }
        if self.kind == MatrixKind::Identity {
            *self = *other;
            return self;
        }
        self.data = compose(&self.data, &other.data);
        self.kind = MatrixKind::Unknown;
        self
    }

    /// Composes `self = other ∘ self`: `other` is applied after, in global space.
    pub fn pre_multiply(&mut self, other: &Matrix) -> &mut Self {
        if other.kind == MatrixKind::Identity {
            return self;
        }
        if other.kind == MatrixKind::Translation
            && matches!(self.kind, MatrixKind::Identity | MatrixKind::Translation)
        {
            self.data[4] += other.data[4];
            self.data[5] += other.data[5];
            self.kind = MatrixKind::Translation;
            return self;
        }
        self.data = compose(&other.data, &self.data);
        self.kind = MatrixKind::Unknown;
        self
    }

    /// Multiplies by raw coefficients in local space (same order as `concat`).
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        self.data = compose(&self.data, &[a, b, c, d, tx, ty]);
        self.kind = MatrixKind::Unknown;
        self
    }

    /// Adds a global translation.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.data[4] += x;
        self.data[5] += y;
        self.promote_translation();
        self
    }

    /// Scales the output of the transform (global space).
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        let m = &mut self.data;
        m[0] *= x;
        m[1] *= y;
        m[2] *= x;
        m[3] *= y;
        m[4] *= x;
        m[5] *= y;
        self.kind = MatrixKind::Unknown;
        self
    }

    /// Rotates the output of the transform by `angle` radians (global space).
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let [a, b, c, d, tx, ty] = self.data;
        let (sin, cos) = angle.sin_cos();
        self.data = [
            cos * a - sin * b,
            sin * a + cos * b,
            cos * c - sin * d,
            sin * c + cos * d,
            cos * tx - sin * ty,
            sin * tx + cos * ty,
        ];
        self.kind = MatrixKind::Unknown;
        self
    }

    #[must_use]
    pub fn transform_point(&self, point: Point) -> Point {
        if self.kind == MatrixKind::Identity {
            return point;
        }
        let [a, b, c, d, tx, ty] = self.data;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    pub fn transform_points(&self, points: &mut [Point]) {
        if self.kind == MatrixKind::Identity {
            return;
        }
        for point in points {
            *point = self.transform_point(*point);
        }
    }

    /// Applies only the linear part (no translation).
    #[must_use]
    pub fn delta_transform_point(&self, point: Point) -> Point {
        if self.kind == MatrixKind::Identity {
            return point;
        }
        let [a, b, c, d, _, _] = self.data;
        Point::new(a * point.x + c * point.y, b * point.x + d * point.y)
    }

    /// Transformed corners, in [`Rectangle::corners`] order.
    #[must_use]
    pub fn transform_rectangle(&self, rectangle: &Rectangle) -> [Point; 4] {
        let mut corners = rectangle.corners();
        for corner in &mut corners {
            *corner = self.transform_point(*corner);
        }
        corners
    }

    /// Replaces `rectangle` with the axis-aligned bounds of its transformed
    /// corners.
    ///
    /// Under rotation or shear the result is larger than the true
    /// transformed quadrilateral.
    pub fn transform_rectangle_aabb(&self, rectangle: &mut Rectangle) {
        match self.kind {
            MatrixKind::Identity => return,
            MatrixKind::Translation => {
                rectangle.x += self.data[4];
                rectangle.y += self.data[5];
                return;
            }
            MatrixKind::Unknown => {}
        }

        let corners = self.transform_rectangle(rectangle);
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for corner in corners {
            min_x = min_x.min(corner.x);
            min_y = min_y.min(corner.y);
            max_x = max_x.max(corner.x);
            max_y = max_y.max(corner.y);
        }
        rectangle.set_elements(min_x, min_y, max_x - min_x, max_y - min_y);
    }

    /// Writes the inverse transform into `result`.
    ///
    /// A singular matrix (determinant exactly zero) writes the identity.
    pub fn inverse(&self, result: &mut Matrix) {
        match self.kind {
            MatrixKind::Identity => {
                result.set_identity();
                return;
            }
            MatrixKind::Translation => {
                *result = Matrix::translation(-self.data[4], -self.data[5]);
                return;
            }
            MatrixKind::Unknown => {}
        }

        let [a, b, c, d, tx, ty] = self.data;
        let determinant = a * d - b * c;
        if determinant == 0.0 {
            warn!(matrix = %self, "singular matrix inverted to identity");
            result.set_identity();
            return;
        }

        if b == 0.0 && c == 0.0 {
            let ia = 1.0 / a;
            let id = 1.0 / d;
            result.data = [ia, 0.0, 0.0, id, -ia * tx, -id * ty];
        } else {
            let inv = 1.0 / determinant;
            let ra = d * inv;
            let rb = -b * inv;
            let rc = -c * inv;
            let rd = a * inv;
            result.data = [ra, rb, rc, rd, -(ra * tx + rc * ty), -(rb * tx + rd * ty)];
        }
        result.kind = MatrixKind::Unknown;
    }

    #[must_use]
    pub fn inverted(&self) -> Matrix {
        let mut result = Matrix::identity();
        self.inverse(&mut result);
        result
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.data[0] * self.data[3] - self.data[1] * self.data[2]
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        let [a, b, ..] = self.data;
        if a == 1.0 && b == 0.0 {
            return 1.0;
        }
        let result = (a * a + b * b).sqrt();
        if a > 0.0 { result } else { -result }
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        let [_, _, c, d, ..] = self.data;
        if c == 0.0 && d == 1.0 {
            return 1.0;
        }
        let result = (c * c + d * d).sqrt();
        if d > 0.0 { result } else { -result }
    }

    #[must_use]
    pub fn average_scale(&self) -> f64 {
        (self.scale_x() + self.scale_y()) / 2.0
    }

    #[must_use]
    pub fn absolute_scale_x(&self) -> f64 {
        self.scale_x().abs()
    }

    #[must_use]
    pub fn absolute_scale_y(&self) -> f64 {
        self.scale_y().abs()
    }

    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.data[1].atan2(self.data[0]).to_degrees()
    }

    /// Whether the linear part is a rotation or an axis scale (no shear).
    #[must_use]
    pub fn is_scale_or_rotation(&self) -> bool {
        let [a, b, c, d, ..] = self.data;
        (a * c + b * d).abs() < 0.01
    }

    /// Whether the transform collapses a non-empty rectangle to zero area.
    #[must_use]
    pub fn empty_area(&self, query: &Rectangle) -> bool {
        query.is_empty() || self.determinant() == 0.0
    }

    /// Whether the transform blows a rectangle up to infinite extent.
    #[must_use]
    pub fn infinite_area(&self, query: &Rectangle) -> bool {
        let mut bounds = *query;
        self.transform_rectangle_aabb(&mut bounds);
        bounds.w.is_infinite() || bounds.h.is_infinite()
    }

    /// Rounds translation to whole device pixels for crisp lines.
    ///
    /// Only translation-only matrices are snapped; returns `false` and leaves
    /// the matrix untouched otherwise.
    pub fn snap(&mut self) -> bool {
        if !self.is_translation_only() {
            return false;
        }
        let tx = self.data[4].round();
        let ty = self.data[5].round();
        self.data = [1.0, 0.0, 0.0, 1.0, tx, ty];
        self.kind = MatrixKind::Translation;
        true
    }

    fn promote_translation(&mut self) {
        if self.kind == MatrixKind::Identity {
            self.kind = MatrixKind::Translation;
        }
    }
}

/// Returns `outer ∘ inner` (inner applied first).
fn compose(outer: &[f64; 6], inner: &[f64; 6]) -> [f64; 6] {
    let [oa, ob, oc, od, otx, oty] = *outer;
    let [ia, ib, ic, id, itx, ity] = *inner;
    [
        oa * ia + oc * ib,
        ob * ia + od * ib,
        oa * ic + oc * id,
        ob * ic + od * id,
        oa * itx + oc * ity + otx,
        ob * itx + od * ity + oty,
    ]
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(2);
        let [a, b, c, d, tx, ty] = self.data;
        write!(
            f,
            "{{{:.*}, {:.*}, {:.*}, {:.*}, {:.*}, {:.*}}}",
            digits, a, digits, b, digits, c, digits, d, digits, tx, digits, ty
        )
    }
}
