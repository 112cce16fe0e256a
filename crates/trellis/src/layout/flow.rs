use serde::{Deserialize, Serialize};

use super::{Align, Axis, LayoutChild, ordered};
use crate::geom::Rect;

/// Parameters for sequential flow along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    /// Gap between consecutive children on the main axis.
    pub spacing: f32,
    /// Gap between wrapped lines on the cross axis.
    pub line_spacing: f32,
    /// Start a new line when the next child would overflow the main axis.
    pub wrap: bool,
    /// Cross-axis alignment of each child within its line.
    pub align: Align,
}

impl Flow {
    /// A non-wrapping flow with no spacing and start alignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the main-axis spacing.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the gap between wrapped lines.
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Enable or disable wrapping.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the cross-axis alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Lay children out one after another along `axis`.
///
/// Without wrapping there is a single line whose cross extent is the whole
/// content area. With wrapping, each line is as thick as its thickest child.
pub(super) fn apply(
    flow: &Flow,
    axis: Axis,
    content: Rect,
    children: &[LayoutChild<'_>],
) -> Vec<Rect> {
    let mut out = vec![Rect::zero(); children.len()];
    if children.is_empty() {
        return out;
    }
    let main_avail = axis.main(content.size());
    let cross_avail = axis.cross(content.size());

    let mut lines: Vec<Vec<usize>> = vec![Vec::new()];
    let mut cursor = 0.0;
    for i in ordered(children) {
        let len = axis.main(children[i].size);
        let needs_break = flow.wrap
            && lines.last().is_some_and(|l| !l.is_empty())
            && cursor + len > main_avail;
        if needs_break {
            lines.push(Vec::new());
            cursor = 0.0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(i);
        }
        cursor += len + flow.spacing;
    }

    let mut cross_pos = 0.0;
    for line in &lines {
        let extent = if flow.wrap {
            line.iter()
                .map(|i| axis.cross(children[*i].size))
                .fold(0.0, f32::max)
        } else {
            cross_avail
        };
        let mut main_pos = 0.0;
        for i in line {
            let size = children[*i].size;
            let main_len = axis.main(size);
            let (offset, cross_len) = flow.align.place(extent, axis.cross(size));
            out[*i] = axis.rect(content, main_pos, cross_pos + offset, main_len, cross_len);
            main_pos += main_len + flow.spacing;
        }
        cross_pos += extent + flow.line_spacing;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anchor::Anchor,
        geom::{Point, Size},
        layout::LayoutItem,
    };

    fn child(item: &LayoutItem, w: f32, h: f32) -> LayoutChild<'_> {
        LayoutChild {
            size: Size::new(w, h),
            local: Point::zero(),
            anchor: Anchor::TopLeft,
            item,
        }
    }

    #[test]
    fn horizontal_no_wrap_positions() {
        let item = LayoutItem::default();
        let kids = [
            child(&item, 100.0, 20.0),
            child(&item, 100.0, 20.0),
            child(&item, 100.0, 20.0),
        ];
        let flow = Flow::new().spacing(10.0);
        let out = apply(&flow, Axis::Horizontal, Rect::new(5.0, 5.0, 300.0, 50.0), &kids);
        let xs: Vec<f32> = out.iter().map(|r| r.x - 5.0).collect();
        assert_eq!(xs, vec![0.0, 110.0, 220.0]);
        assert!(out.iter().all(|r| r.y == 5.0));
    }

    #[test]
    fn wrap_starts_new_line() {
        let item = LayoutItem::default();
        let kids = [
            child(&item, 100.0, 20.0),
            child(&item, 100.0, 30.0),
            child(&item, 100.0, 10.0),
        ];
        let flow = Flow::new().spacing(10.0).line_spacing(5.0).wrap(true);
        let out = apply(&flow, Axis::Horizontal, Rect::new(0.0, 0.0, 250.0, 200.0), &kids);
        assert_eq!(out[0], Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(out[1], Rect::new(110.0, 0.0, 100.0, 30.0));
        assert_eq!(out[2], Rect::new(0.0, 35.0, 100.0, 10.0));
    }

    #[test]
    fn oversized_child_never_wraps_alone() {
        let item = LayoutItem::default();
        let kids = [child(&item, 500.0, 20.0)];
        let flow = Flow::new().wrap(true);
        let out = apply(&flow, Axis::Horizontal, Rect::new(0.0, 0.0, 100.0, 100.0), &kids);
        assert_eq!(out[0], Rect::new(0.0, 0.0, 500.0, 20.0));
    }

    #[test]
    fn vertical_cross_alignment() {
        let item = LayoutItem::default();
        let kids = [child(&item, 20.0, 10.0), child(&item, 40.0, 10.0)];
        let content = Rect::new(0.0, 0.0, 100.0, 100.0);

        let out = apply(&Flow::new().align(Align::Center), Axis::Vertical, content, &kids);
        assert_eq!(out[0], Rect::new(40.0, 0.0, 20.0, 10.0));
        assert_eq!(out[1], Rect::new(30.0, 10.0, 40.0, 10.0));

        let out = apply(&Flow::new().align(Align::Stretch), Axis::Vertical, content, &kids);
        assert_eq!(out[1], Rect::new(0.0, 10.0, 100.0, 10.0));

        let out = apply(&Flow::new().align(Align::End), Axis::Vertical, content, &kids);
        assert_eq!(out[0].x, 80.0);
    }

    #[test]
    fn order_override_is_stable() {
        let first = LayoutItem {
            order: 1,
            ..Default::default()
        };
        let plain = LayoutItem::default();
        let kids = [
            child(&first, 10.0, 10.0),
            child(&plain, 20.0, 10.0),
            child(&plain, 30.0, 10.0),
        ];
        let out = apply(&Flow::new(), Axis::Horizontal, Rect::new(0.0, 0.0, 100.0, 10.0), &kids);
        assert_eq!(out[1].x, 0.0);
        assert_eq!(out[2].x, 20.0);
        assert_eq!(out[0].x, 50.0);
    }

    #[test]
    fn idempotent() {
        let item = LayoutItem::default();
        let kids = [child(&item, 33.0, 12.0), child(&item, 71.0, 9.0)];
        let flow = Flow::new().spacing(3.0).wrap(true).align(Align::Center);
        let content = Rect::new(1.0, 2.0, 90.0, 40.0);
        let a = apply(&flow, Axis::Horizontal, content, &kids);
        let b = apply(&flow, Axis::Horizontal, content, &kids);
        assert_eq!(a, b);
    }
}
