//! Touch-space geometry shared by the recognizers.
//!
//! Two primitives are exposed and must stay bit-for-bit predictable, since
//! thresholds are compared against their output:
//!
//! - [`distance`]: Euclidean distance between two screen points
//! - [`clamp_magnitude`]: radial clamp of a vector to a maximum length

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned screen region, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Check whether a point lies inside the region (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// A rect is well-formed when `min` is not past `max` on either axis
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

/// Euclidean distance between two touch positions.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Clamp a vector to a maximum length, preserving direction.
///
/// Vectors already inside the circle of radius `max` are returned unchanged;
/// longer vectors are scaled back onto its edge.
///
/// # Example
/// ```
/// use glam::Vec2;
/// use touch_gestures::gesture::geometry::clamp_magnitude;
///
/// assert_eq!(clamp_magnitude(Vec2::new(3.0, 4.0), 10.0), Vec2::new(3.0, 4.0));
/// assert_eq!(clamp_magnitude(Vec2::new(200.0, 0.0), 100.0), Vec2::new(100.0, 0.0));
/// ```
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let magnitude = v.length();

    if magnitude <= max {
        v
    } else {
        v * (max / magnitude)
    }
}

/// Unit vector in the direction of `v`, or zero for a zero-length vector.
pub fn direction(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}
