use super::{Edges, Point, Size, extent, finite_or_zero};

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a new rectangle.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A zero rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Construct a rectangle from an origin and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.w, size.h)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Does this rectangle contain the point? Edges follow half-open
    /// semantics: the left and top edges are inside, right and bottom are not.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose `other`?
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Return the intersection with `other`, or `None` if they don't overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r > x && b > y {
            Some(Self::new(x, y, r - x, b - y))
        } else {
            None
        }
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        Self::new(x, y, r - x, b - y)
    }

    /// Shift the rectangle by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shrink the rectangle by the given insets. The origin moves by the
    /// top/left insets; the extents never go below zero.
    pub fn inset(&self, edges: Edges) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.top,
            extent(self.w - edges.horizontal()),
            extent(self.h - edges.vertical()),
        )
    }

    /// Replace non-finite coordinates with zero and clamp negative extents.
    pub fn sanitized(self) -> Self {
        Self::new(
            finite_or_zero(self.x),
            finite_or_zero(self.y),
            extent(self.w),
            extent(self.h),
        )
    }

    /// Move the rectangle so that it lies inside `bounds` where possible. If
    /// the rectangle is larger than `bounds` on an axis, it is aligned to the
    /// leading edge on that axis.
    pub fn clamp_within(&self, bounds: &Self) -> Self {
        let x = self.x.min(bounds.right() - self.w).max(bounds.x);
        let y = self.y.min(bounds.bottom() - self.h).max(bounds.y);
        Self::new(x, y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains_point_half_open() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.contains_point(Point::new(10.0, 10.0)));
        assert!(r.contains_point(Point::new(19.9, 19.9)));
        assert!(!r.contains_point(Point::new(20.0, 15.0)));
        assert!(!r.contains_point(Point::new(15.0, 20.0)));
        assert!(!r.contains_point(Point::new(9.9, 15.0)));
    }

    #[test]
    fn intersect_and_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 15.0, 15.0));
        let c = Rect::new(20.0, 20.0, 1.0, 1.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn inset_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0);
        let inner = r.inset(Edges::uniform(3.0));
        assert_eq!(inner, Rect::new(3.0, 3.0, 4.0, 0.0));
    }

    #[test]
    fn clamp_within_oversized() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let big = Rect::new(5.0, -5.0, 20.0, 4.0);
        assert_eq!(big.clamp_within(&bounds), Rect::new(0.0, 0.0, 20.0, 4.0));
    }

    proptest! {
        #[test]
        fn clamp_within_stays_inside(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 0.0f32..100.0,
            h in 0.0f32..100.0,
        ) {
            let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
            let clamped = Rect::new(x, y, w, h).clamp_within(&bounds);
            prop_assert!(clamped.x >= bounds.x);
            prop_assert!(clamped.y >= bounds.y);
            prop_assert!(clamped.right() <= bounds.right() + 1e-3);
            prop_assert!(clamped.bottom() <= bounds.bottom() + 1e-3);
        }

        #[test]
        fn inset_never_negative(
            w in -50.0f32..50.0,
            h in -50.0f32..50.0,
            pad in 0.0f32..80.0,
        ) {
            let inner = Rect::new(0.0, 0.0, w, h).inset(Edges::uniform(pad));
            prop_assert!(inner.w >= 0.0);
            prop_assert!(inner.h >= 0.0);
        }
    }
}
