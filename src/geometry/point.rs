use std::fmt;

use serde::{Deserialize, Serialize};

/// Mutable 2D vector.
///
/// The in-place methods return `&mut Self` so updates can be chained:
/// `p.sub(origin).mul(0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::new(0.0, 0.0)
    }

    #[must_use]
    pub fn create_empty_points(count: usize) -> Vec<Self> {
        vec![Self::empty(); count]
    }

    pub fn set_elements(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn set(&mut self, other: Point) -> &mut Self {
        self.set_elements(other.x, other.y)
    }

    pub fn sub(&mut self, other: Point) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    pub fn mul(&mut self, value: f64) -> &mut Self {
        self.x *= value;
        self.y *= value;
        self
    }

    #[must_use]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn squared_length(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(2);
        write!(f, "{{x: {:.*}, y: {:.*}}}", digits, self.x, digits, self.y)
    }
}
