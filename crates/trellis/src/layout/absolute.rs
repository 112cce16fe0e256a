use serde::{Deserialize, Serialize};

use super::LayoutChild;
use crate::{
    anchor::Anchor,
    geom::{Point, Rect, Size},
};

/// Container-wide parameters for absolute placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Absolute {
    /// Keep every child's rectangle inside the content area unless the child
    /// overrides it.
    pub clamp_inside: bool,
}

impl Absolute {
    /// Absolute placement with optional clamping.
    pub fn new(clamp_inside: bool) -> Self {
        Self { clamp_inside }
    }
}

/// A responsive override that applies once the container is at least
/// `min_width` wide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoint {
    /// Minimum container width at which this override applies.
    pub min_width: f32,
    /// Override for x.
    pub x: Option<f32>,
    /// Override for y.
    pub y: Option<f32>,
    /// Override for width.
    pub width: Option<f32>,
    /// Override for height.
    pub height: Option<f32>,
    /// Override for the anchor.
    pub anchor: Option<Anchor>,
}

impl Breakpoint {
    /// A breakpoint with no overrides.
    pub fn at(min_width: f32) -> Self {
        Self {
            min_width,
            ..Default::default()
        }
    }

    /// Override the rectangle.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.x = Some(rect.x);
        self.y = Some(rect.y);
        self.width = Some(rect.w);
        self.height = Some(rect.h);
        self
    }

    /// Override the anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

/// Per-child parameters for absolute placement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsoluteItem {
    /// Explicit rectangle; falls back to the child's local position and
    /// intrinsic size.
    pub rect: Option<Rect>,
    /// Anchor override; falls back to the child's own anchor.
    pub anchor: Option<Anchor>,
    /// Minimum size.
    pub min: Option<Size>,
    /// Maximum size.
    pub max: Option<Size>,
    /// Responsive overrides keyed by container width.
    pub breakpoints: Vec<Breakpoint>,
    /// Per-child clamping override.
    pub clamp_inside: Option<bool>,
}

impl AbsoluteItem {
    /// The breakpoint that applies at `width`: the largest `min_width` not
    /// exceeding it. Later entries win ties.
    pub fn breakpoint_for(&self, width: f32) -> Option<&Breakpoint> {
        self.breakpoints
            .iter()
            .filter(|b| b.min_width <= width)
            .fold(None, |best: Option<&Breakpoint>, b| match best {
                Some(cur) if cur.min_width > b.min_width => Some(cur),
                _ => Some(b),
            })
    }
}

/// Place each child at its explicit rectangle, then anchor, constrain and
/// optionally clamp it.
pub(super) fn apply(abs: &Absolute, content: Rect, children: &[LayoutChild<'_>]) -> Vec<Rect> {
    children
        .iter()
        .map(|child| {
            let item = &child.item.absolute;
            let base = item.rect.unwrap_or_else(|| {
                Rect::from_origin_size(child.local, child.size)
            });
            let mut rect = base;
            let mut anchor = item.anchor.unwrap_or(child.anchor);
            if let Some(bp) = item.breakpoint_for(content.w) {
                rect.x = bp.x.unwrap_or(rect.x);
                rect.y = bp.y.unwrap_or(rect.y);
                rect.w = bp.width.unwrap_or(rect.w);
                rect.h = bp.height.unwrap_or(rect.h);
                anchor = bp.anchor.unwrap_or(anchor);
            }
            let size = rect.size().clamp(item.min, item.max).sanitized();
            let placed = anchor.place(content, size, Point::new(rect.x, rect.y));
            if item.clamp_inside.unwrap_or(abs.clamp_inside) {
                placed.clamp_within(&content)
            } else {
                placed
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutItem;

    fn item(absolute: AbsoluteItem) -> LayoutItem {
        LayoutItem {
            absolute,
            ..Default::default()
        }
    }

    fn child(item: &LayoutItem) -> LayoutChild<'_> {
        LayoutChild {
            size: Size::new(20.0, 10.0),
            local: Point::new(1.0, 2.0),
            anchor: Anchor::TopLeft,
            item,
        }
    }

    #[test]
    fn falls_back_to_local_geometry() {
        let it = LayoutItem::default();
        let out = apply(&Absolute::default(), Rect::new(10.0, 10.0, 100.0, 100.0), &[child(&it)]);
        assert_eq!(out[0], Rect::new(11.0, 12.0, 20.0, 10.0));
    }

    #[test]
    fn explicit_rect_and_anchor() {
        let it = item(AbsoluteItem {
            rect: Some(Rect::new(5.0, 5.0, 30.0, 30.0)),
            anchor: Some(Anchor::BottomRight),
            ..Default::default()
        });
        let out = apply(&Absolute::default(), Rect::new(0.0, 0.0, 100.0, 100.0), &[child(&it)]);
        assert_eq!(out[0], Rect::new(70.0, 70.0, 30.0, 30.0));
    }

    #[test]
    fn min_max_constraints() {
        let it = item(AbsoluteItem {
            rect: Some(Rect::new(0.0, 0.0, 500.0, 2.0)),
            min: Some(Size::new(0.0, 10.0)),
            max: Some(Size::new(100.0, 1000.0)),
            ..Default::default()
        });
        let out = apply(&Absolute::default(), Rect::new(0.0, 0.0, 300.0, 300.0), &[child(&it)]);
        assert_eq!(out[0].size(), Size::new(100.0, 10.0));
    }

    #[test]
    fn largest_applicable_breakpoint_wins() {
        let it = item(AbsoluteItem {
            rect: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            breakpoints: vec![
                Breakpoint::at(600.0).rect(Rect::new(0.0, 0.0, 60.0, 60.0)),
                Breakpoint::at(200.0).rect(Rect::new(0.0, 0.0, 20.0, 20.0)),
                Breakpoint::at(400.0).rect(Rect::new(0.0, 0.0, 40.0, 40.0)),
            ],
            ..Default::default()
        });
        let abs = Absolute::default();
        let w = |width: f32| apply(&abs, Rect::new(0.0, 0.0, width, 100.0), &[child(&it)])[0].w;
        assert_eq!(w(100.0), 10.0);
        assert_eq!(w(200.0), 20.0);
        assert_eq!(w(599.0), 40.0);
        assert_eq!(w(1000.0), 60.0);
    }

    #[test]
    fn clamp_inside_container() {
        let it = item(AbsoluteItem {
            rect: Some(Rect::new(90.0, -5.0, 20.0, 20.0)),
            ..Default::default()
        });
        let content = Rect::new(0.0, 0.0, 100.0, 100.0);
        let out = apply(&Absolute::new(true), content, &[child(&it)]);
        assert_eq!(out[0], Rect::new(80.0, 0.0, 20.0, 20.0));
        let out = apply(&Absolute::new(false), content, &[child(&it)]);
        assert_eq!(out[0], Rect::new(90.0, -5.0, 20.0, 20.0));
    }

    #[test]
    fn negative_sizes_clamp_to_zero() {
        let it = item(AbsoluteItem {
            rect: Some(Rect::new(0.0, 0.0, -20.0, f32::NAN)),
            ..Default::default()
        });
        let out = apply(&Absolute::default(), Rect::new(0.0, 0.0, 100.0, 100.0), &[child(&it)]);
        assert_eq!(out[0].size(), Size::zero());
    }
}
