use serde::{Deserialize, Serialize};

/// Straight line segment reported by the upstream vision stage, in pixel
/// coordinates with the origin at the top-left corner of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// First-degree fit `y = slope * x + intercept` through a segment's
/// endpoints. Image rows grow downward, so left lane boundaries have
/// negative slope and right boundaries positive slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeFit {
    pub slope: f64,
    pub intercept: f64,
}

/// One synthesized lane boundary. `(x1, y1)` sits on the bottom row of the
/// frame and `(x2, y2)` on the frame midline, both projected from the
/// averaged fit of that side's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneLine {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}
