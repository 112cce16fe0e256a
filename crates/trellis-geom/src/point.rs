use std::ops::{Add, Sub};

use super::{Rect, finite_or_zero};

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Construct a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return the origin point.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Return true when both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Replace non-finite coordinates with zero.
    pub fn sanitized(self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
        }
    }

    /// Clamp a point, constraining it to fall within `rect`.
    pub fn clamp(&self, rect: Rect) -> Self {
        Self {
            x: self.x.clamp(rect.x, rect.right()),
            y: self.y.clamp(rect.y, rect.bottom()),
        }
    }

    /// Offset the point by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        assert_eq!(Point::zero() + (1.0, 1.0).into(), Point::new(1.0, 1.0));
        assert_eq!(Point::new(5.0, 3.0) - Point::new(2.0, 1.0), Point::new(3.0, 2.0));
    }

    #[test]
    fn clamp_into_rect() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(Point::new(0.0, 30.0).clamp(r), Point::new(10.0, 15.0));
        assert_eq!(Point::new(12.0, 12.0).clamp(r), Point::new(12.0, 12.0));
    }

    #[test]
    fn sanitized_drops_nan() {
        let p = Point::new(f32::NAN, 4.0).sanitized();
        assert_eq!(p, Point::new(0.0, 4.0));
    }
}
