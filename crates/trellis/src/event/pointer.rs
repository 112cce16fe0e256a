//! Pointer input primitives.

use crate::geom::Point;

/// Pointer button codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum Button {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button.
    Middle,
    /// No button, for moves and wheel input.
    None,
}

/// Pointer action kinds.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PointerAction {
    /// Pointer moved.
    Move,
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Wheel scrolled by the given delta.
    Wheel {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
}

/// A raw pointer event from the host, in canvas coordinates.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PointerInput {
    /// What happened.
    pub action: PointerAction,
    /// Where it happened.
    pub pos: Point,
    /// Which button, if any.
    pub button: Button,
}

impl PointerInput {
    /// A pointer move to `(x, y)`.
    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            action: PointerAction::Move,
            pos: Point::new(x, y),
            button: Button::None,
        }
    }

    /// A primary button press at `(x, y)`.
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            action: PointerAction::Down,
            pos: Point::new(x, y),
            button: Button::Primary,
        }
    }

    /// A primary button release at `(x, y)`.
    pub fn up(x: f32, y: f32) -> Self {
        Self {
            action: PointerAction::Up,
            pos: Point::new(x, y),
            button: Button::Primary,
        }
    }

    /// A wheel scroll at `(x, y)`. Positive `dy` scrolls content up.
    pub fn wheel(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self {
            action: PointerAction::Wheel { dx, dy },
            pos: Point::new(x, y),
            button: Button::None,
        }
    }

    /// Replace the button.
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }
}
