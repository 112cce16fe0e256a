//! Raw input from the host and the semantic events delivered to listeners.

use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    geom::Point,
    id::NodeId,
};

/// Keyboard input.
pub mod key;
/// Pointer input.
pub mod pointer;

pub use key::{Key, KeyAction, KeyInput, Mods};
pub use pointer::{Button, PointerAction, PointerInput};

/// Raw input accepted by [`Ui::dispatch`](crate::Ui::dispatch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer move, press, release, or wheel.
    Pointer(PointerInput),
    /// Key press or release.
    Key(KeyInput),
}

impl From<PointerInput> for InputEvent {
    fn from(p: PointerInput) -> Self {
        Self::Pointer(p)
    }
}

impl From<KeyInput> for InputEvent {
    fn from(k: KeyInput) -> Self {
        Self::Key(k)
    }
}

/// Semantic event kinds that listeners subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Press and release on the same node.
    Click,
    /// Pointer entered the node.
    HoverEnter,
    /// Pointer left the node.
    HoverLeave,
    /// Node gained focus.
    Focus,
    /// Node lost focus.
    Blur,
    /// Drag began on a draggable node.
    DragStart,
    /// Pointer moved while dragging.
    DragMove,
    /// Drag ended.
    DragEnd,
    /// Pointer button pressed over the node.
    PointerDown,
    /// Pointer button released over the node.
    PointerUp,
    /// Wheel input over the node.
    Wheel,
    /// Key pressed while the node had focus.
    KeyDown,
    /// Key released while the node had focus.
    KeyUp,
    /// The node was opened as a modal.
    ModalOpen,
    /// The node was closed as a modal.
    ModalClose,
    /// The node is being destroyed.
    Destroy,
}

impl EventKind {
    /// All event kinds.
    pub const ALL: [Self; 16] = [
        Self::Click,
        Self::HoverEnter,
        Self::HoverLeave,
        Self::Focus,
        Self::Blur,
        Self::DragStart,
        Self::DragMove,
        Self::DragEnd,
        Self::PointerDown,
        Self::PointerUp,
        Self::Wheel,
        Self::KeyDown,
        Self::KeyUp,
        Self::ModalOpen,
        Self::ModalClose,
        Self::Destroy,
    ];

    /// Canonical event name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::HoverEnter => "hover-enter",
            Self::HoverLeave => "hover-leave",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::DragStart => "drag-start",
            Self::DragMove => "drag-move",
            Self::DragEnd => "drag-end",
            Self::PointerDown => "pointer-down",
            Self::PointerUp => "pointer-up",
            Self::Wheel => "wheel",
            Self::KeyDown => "key-down",
            Self::KeyUp => "key-up",
            Self::ModalOpen => "modal-open",
            Self::ModalClose => "modal-close",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key)
            .ok_or_else(|| Error::Configuration(format!("unknown event: {s:?}")))
    }
}

/// A semantic event as seen by a listener.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The node the event is delivered to.
    pub target: NodeId,
    /// Pointer position, for pointer-derived events.
    pub position: Option<Point>,
    /// Wheel or drag delta.
    pub delta: Option<Point>,
    /// Key, for keyboard-derived events.
    pub key: Option<KeyInput>,
    /// Pointer button, for press/release-derived events.
    pub button: Option<Button>,
}

impl Event {
    /// A bare event with no payload.
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            position: None,
            delta: None,
            key: None,
            button: None,
        }
    }

    /// Attach a pointer position.
    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach a delta.
    pub fn delta(mut self, delta: Point) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Attach a key.
    pub fn key(mut self, key: KeyInput) -> Self {
        self.key = Some(key);
        self
    }

    /// Attach a button.
    pub fn button(mut self, button: Button) -> Self {
        self.button = Some(button);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_roundtrip() -> Result<()> {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>()?, kind);
        }
        assert!(matches!(
            "double-click".parse::<EventKind>(),
            Err(Error::Configuration(_))
        ));
        Ok(())
    }
}
