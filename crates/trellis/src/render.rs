//! Interfaces to the external renderer and text measurement.

use crate::{
    geom::{Point, Rect, Size},
    style::Color,
};

/// Drawing target for the paint walk.
///
/// Coordinates are absolute canvas pixels. Clips nest: every `push_clip` is
/// matched by a `pop_clip`.
pub trait Surface {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Intersect the clip region with `rect`.
    fn push_clip(&mut self, rect: Rect);

    /// Restore the clip region saved by the matching `push_clip`.
    fn pop_clip(&mut self);

    /// Draw a run of text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, font_size: f32, color: Color);
}

/// Measures text for auto-sized labels and buttons.
pub trait TextMeasure {
    /// The extent of `text` set at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> Size;
}

/// A fixed-advance estimate: every character is `advance * font_size` wide
/// and each line is `line_height * font_size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    /// Character advance as a fraction of the font size.
    pub advance: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        if text.is_empty() {
            return Size::zero();
        }
        let lines = text.lines().count().max(1);
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            widest as f32 * self.advance * font_size,
            lines as f32 * self.line_height * font_size,
        )
        .sanitized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_estimate() {
        let m = MonospaceMeasure {
            advance: 0.5,
            line_height: 1.0,
        };
        assert_eq!(m.measure("abcd", 10.0), Size::new(20.0, 10.0));
        assert_eq!(m.measure("ab\nabcdef", 10.0), Size::new(30.0, 20.0));
        assert_eq!(m.measure("", 10.0), Size::zero());
    }
}
