use crate::{
    geom::{Point, Rect},
    render::Surface,
    style::Color,
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `fill_rect`
    Fill(Rect, Color),
    /// `stroke_rect`
    Stroke(Rect, Color, f32),
    /// `push_clip`
    PushClip(Rect),
    /// `pop_clip`
    PopClip,
    /// `draw_text`
    Text(Point, String, Color),
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Calls in the order they were made.
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled rectangles, in paint order.
    pub fn fills(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(r, _) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Drawn strings, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(_, t, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Current clip nesting depth. Zero after a balanced paint.
    pub fn clip_depth(&self) -> isize {
        self.ops.iter().fold(0, |d, op| match op {
            DrawOp::PushClip(_) => d + 1,
            DrawOp::PopClip => d - 1,
            _ => d,
        })
    }

    /// Forget all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.ops.push(DrawOp::Stroke(rect, color, width));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }

    fn draw_text(&mut self, origin: Point, text: &str, _font_size: f32, color: Color) {
        self.ops.push(DrawOp::Text(origin, text.to_string(), color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut s = RecordingSurface::new();
        s.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        s.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::BLACK);
        s.draw_text(Point::zero(), "hi", 14.0, Color::WHITE);
        assert_eq!(s.clip_depth(), 1);
        s.pop_clip();
        assert_eq!(s.clip_depth(), 0);
        assert_eq!(s.fills(), vec![Rect::new(1.0, 1.0, 2.0, 2.0)]);
        assert_eq!(s.texts(), vec!["hi"]);
        s.clear();
        assert!(s.ops.is_empty());
    }
}
