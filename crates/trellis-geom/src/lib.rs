//! Floating-point geometry primitives used across trellis.
//!
//! All coordinates are canvas pixels. Constructors accept arbitrary floats;
//! the `sanitized` helpers map NaN and infinities to zero and clamp negative
//! extents, so layout code can stay total over transient garbage input.

#![warn(missing_docs)]

/// Edge insets for padding and margins.
mod edges;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// Width/height size type.
mod size;

pub use edges::Edges;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;

/// Return `v` if it is finite, otherwise zero.
#[inline]
pub fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

/// Return `v` clamped to be a finite, non-negative extent.
#[inline]
pub fn extent(v: f32) -> f32 {
    finite_or_zero(v).max(0.0)
}
