use serde::{Deserialize, Serialize};

use super::Point;

/// Meeting point of the infinite lines through two segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentIntersection {
    pub point: Point,
    /// Parameter along segment A: `point = a0 + ua * (a1 - a0)`.
    pub ua: f64,
    /// Parameter along segment B: `point = b0 + ub * (b1 - b0)`.
    pub ub: f64,
    pub intersects_segment_a: bool,
    pub intersects_segment_b: bool,
}

impl SegmentIntersection {
    /// Whether the lines meet inside both finite segments.
    #[must_use]
    pub fn on_both_segments(&self) -> bool {
        self.intersects_segment_a && self.intersects_segment_b
    }
}

/// Solves for the crossing of lines `a0→a1` and `b0→b1`.
///
/// Returns `None` for parallel or collinear segments, where the parameters
/// are undefined.
#[must_use]
pub fn segment_intersection(
    a0: Point,
    a1: Point,
    b0: Point,
    b1: Point,
) -> Option<SegmentIntersection> {
    let denominator = (b1.y - b0.y) * (a1.x - a0.x) - (b1.x - b0.x) * (a1.y - a0.y);
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let ua = ((b1.x - b0.x) * (a0.y - b0.y) - (b1.y - b0.y) * (a0.x - b0.x)) / denominator;
    let ub = ((a1.x - a0.x) * (a0.y - b0.y) - (a1.y - a0.y) * (a0.x - b0.x)) / denominator;

    Some(SegmentIntersection {
        point: Point::new(a0.x + ua * (a1.x - a0.x), a0.y + ua * (a1.y - a0.y)),
        ua,
        ub,
        intersects_segment_a: (0.0..=1.0).contains(&ua),
        intersects_segment_b: (0.0..=1.0).contains(&ub),
    })
}
