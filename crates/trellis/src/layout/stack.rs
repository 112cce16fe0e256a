use serde::{Deserialize, Serialize};

use super::{Align, LayoutChild};
use crate::geom::{Point, Rect};

/// Horizontal alignment of a stack layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HAlign {
    /// Left edge.
    Left,
    /// Centered.
    Center,
    /// Right edge.
    Right,
    /// Full width.
    #[default]
    Stretch,
}

impl From<HAlign> for Align {
    fn from(a: HAlign) -> Self {
        match a {
            HAlign::Left => Self::Start,
            HAlign::Center => Self::Center,
            HAlign::Right => Self::End,
            HAlign::Stretch => Self::Stretch,
        }
    }
}

/// Vertical alignment of a stack layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VAlign {
    /// Top edge.
    Top,
    /// Centered.
    Center,
    /// Bottom edge.
    Bottom,
    /// Full height.
    #[default]
    Stretch,
}

impl From<VAlign> for Align {
    fn from(a: VAlign) -> Self {
        match a {
            VAlign::Top => Self::Start,
            VAlign::Center => Self::Center,
            VAlign::Bottom => Self::End,
            VAlign::Stretch => Self::Stretch,
        }
    }
}

/// Container-wide parameters for layered placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stack {
    /// Offset added once per layer depth.
    pub depth_spacing: Point,
}

impl Stack {
    /// A stack with the given per-layer depth offset.
    pub fn new(depth_spacing: Point) -> Self {
        Self { depth_spacing }
    }
}

/// Per-child parameters for stack placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackLayer {
    /// Layer index; lower layers are placed (and painted) first.
    pub index: i32,
    /// Horizontal alignment.
    pub align_x: HAlign,
    /// Vertical alignment.
    pub align_y: VAlign,
    /// Fixed pixel offset.
    pub offset: Point,
}

/// Indices of `children` stably sorted by layer index.
pub(crate) fn layer_order(children: &[LayoutChild<'_>]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..children.len()).collect();
    idx.sort_by_key(|i| children[*i].item.layer.index);
    idx
}

/// Place every child over the whole content area. The k-th layer in sorted
/// order is shifted by `k * depth_spacing`.
pub(super) fn apply(stack: &Stack, content: Rect, children: &[LayoutChild<'_>]) -> Vec<Rect> {
    let mut out = vec![Rect::zero(); children.len()];
    for (depth, i) in layer_order(children).into_iter().enumerate() {
        let child = &children[i];
        let layer = child.item.layer;
        let (dx, w) = Align::from(layer.align_x).place(content.w, child.size.w);
        let (dy, h) = Align::from(layer.align_y).place(content.h, child.size.h);
        let k = depth as f32;
        out[i] = Rect::new(
            content.x + dx + layer.offset.x + k * stack.depth_spacing.x,
            content.y + dy + layer.offset.y + k * stack.depth_spacing.y,
            w,
            h,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{anchor::Anchor, geom::Size, layout::LayoutItem};

    fn layered(index: i32, align_x: HAlign, align_y: VAlign) -> LayoutItem {
        LayoutItem {
            layer: StackLayer {
                index,
                align_x,
                align_y,
                offset: Point::zero(),
            },
            ..Default::default()
        }
    }

    fn child(item: &LayoutItem) -> LayoutChild<'_> {
        LayoutChild {
            size: Size::new(20.0, 10.0),
            local: Point::zero(),
            anchor: Anchor::TopLeft,
            item,
        }
    }

    #[test]
    fn default_layers_fill_content() {
        let it = LayoutItem::default();
        let content = Rect::new(5.0, 5.0, 100.0, 50.0);
        let out = apply(&Stack::default(), content, &[child(&it), child(&it)]);
        assert_eq!(out, vec![content, content]);
    }

    #[test]
    fn per_layer_alignment_and_offset() {
        let mut it = layered(0, HAlign::Right, VAlign::Center);
        it.layer.offset = Point::new(-2.0, 3.0);
        let out = apply(&Stack::default(), Rect::new(0.0, 0.0, 100.0, 50.0), &[child(&it)]);
        assert_eq!(out[0], Rect::new(78.0, 23.0, 20.0, 10.0));
    }

    #[test]
    fn depth_spacing_follows_layer_index() {
        let top = layered(5, HAlign::Left, VAlign::Top);
        let bottom = layered(-1, HAlign::Left, VAlign::Top);
        let middle = layered(2, HAlign::Left, VAlign::Top);
        let kids = [child(&top), child(&bottom), child(&middle)];
        let stack = Stack::new(Point::new(4.0, 4.0));
        let out = apply(&stack, Rect::new(0.0, 0.0, 100.0, 100.0), &kids);
        assert_eq!(out[1].origin(), Point::new(0.0, 0.0));
        assert_eq!(out[2].origin(), Point::new(4.0, 4.0));
        assert_eq!(out[0].origin(), Point::new(8.0, 8.0));
        assert_eq!(layer_order(&kids), vec![1, 2, 0]);
    }
}
