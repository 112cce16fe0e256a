use super::{Point, Rect, extent};

/// A `Size` is a rectangle that has a width and height but no location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Size {
    /// Construct a new size.
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// A zero size.
    pub const fn zero() -> Self {
        Self { w: 0.0, h: 0.0 }
    }

    /// The area of this size.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::zero(), *self)
    }

    /// True if this size can completely enclose `other` in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Map non-finite or negative extents to zero.
    pub fn sanitized(self) -> Self {
        Self {
            w: extent(self.w),
            h: extent(self.h),
        }
    }

    /// Clamp each axis against optional minimum and maximum sizes.
    ///
    /// A minimum larger than the maximum collapses to the maximum.
    pub fn clamp(self, min: Option<Self>, max: Option<Self>) -> Self {
        Self {
            w: clamp_axis(self.w, min.map(|m| m.w), max.map(|m| m.w)),
            h: clamp_axis(self.h, min.map(|m| m.h), max.map(|m| m.h)),
        }
    }
}

/// Clamp a single axis against optional min/max bounds.
fn clamp_axis(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) if min > max => (Some(max), Some(max)),
        other => other,
    };
    let mut value = value;
    if let Some(max) = max {
        value = value.min(max);
    }
    if let Some(min) = min {
        value = value.max(min);
    }
    value
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f32, f32)> for Size {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
