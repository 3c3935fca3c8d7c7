//! 2D geometry for the policy.
//!
//! Positions are world coordinates in cell units. Headings are degrees,
//! counter-clockwise from the positive x axis, the same convention the game
//! reports for unit facing.

use serde::{Deserialize, Serialize};

/// 2D vector in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Calculate squared distance (avoids sqrt for comparisons).
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Straight-line distance.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Grid cell containing this position, or `None` for negative coordinates.
    #[must_use]
    pub fn cell(self) -> Option<(u32, u32)> {
        if self.x < 0.0 || self.y < 0.0 || !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some((self.x as u32, self.y as u32))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed angle between a heading and the direction to `point`.
///
/// Positive means the point lies counter-clockwise of the heading, so a
/// left turn brings it closer to zero. Only the observer's position and
/// facing are needed, which lets the same routine serve own units and
/// partially observed opponents alike.
#[must_use]
pub fn angle_to_point(origin: Vec2, facing: f32, point: Vec2) -> f32 {
    let delta = point - origin;
    if delta.x == 0.0 && delta.y == 0.0 {
        return 0.0;
    }
    let bearing = delta.y.atan2(delta.x).to_degrees();
    normalize_degrees(bearing - facing)
}
