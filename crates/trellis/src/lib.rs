//! Trellis: a retained-mode scene graph for 2D interfaces.
//!
//! Trellis keeps a tree of nodes in an arena, resolves each node's absolute
//! bounds lazily from anchors, margins, padding and its parent's layout
//! strategy, routes raw pointer and key input to nodes, and drives
//! time-based property animations. Rendering is left to the host through
//! the [`render::Surface`] trait.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Ui`] - The scene graph manager
//! - [`NodeConfig`] - Declarative node construction
//! - [`FocusManager`] - Keyboard focus and the modal stack
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Size, Edges)
//! - [`layout`] - Flow, grid, absolute and stack strategies
//! - [`event`] - Raw input and dispatched events
//! - [`animation`] - Easing curves and the animation scheduler

#![warn(missing_docs)]

/// Anchor presets.
pub mod anchor;
/// Property animation.
pub mod animation;
/// Lazy bounds resolution.
mod bounds;
/// Construction settings.
pub mod config;
/// Hit testing and input routing.
mod dispatch;
/// Error types.
pub mod error;
/// Input and dispatched events.
pub mod event;
/// Focus and modals.
pub mod focus;
/// Arena keys.
pub mod id;
/// Layout strategies.
pub mod layout;
/// Listener table.
mod listeners;
/// Scene graph nodes.
pub mod node;
/// Host rendering interfaces.
pub mod render;
/// Node names.
pub mod state;
/// Paint styles.
pub mod style;
/// Test helpers.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// The manager.
mod ui;
/// Per-kind behaviour.
pub mod widget;

pub use anchor::Anchor;
pub use animation::{AnimationState, Easing, Property};
pub use config::{NodeConfig, UiConfig};
pub use error::{Error, Result};
pub use event::{Event, EventKind, InputEvent};
pub use focus::FocusManager;
pub use id::{AnimationId, ListenerId, NodeId};
pub use layout::{Layout, LayoutConfig, LayoutItem};
pub use listeners::Callback;
pub use trellis_geom as geom;
pub use ui::Ui;
pub use widget::{NodeKind, Widget};

/// Glob-importable set of the commonly used types.
pub mod prelude {
    pub use crate::{
        Anchor, Easing, Error, EventKind, FocusManager, LayoutConfig, LayoutItem, NodeConfig,
        NodeId, NodeKind, Property, Result, Ui, UiConfig,
        event::{Button, InputEvent, Key, KeyInput, Mods, PointerInput},
        geom::{Edges, Point, Rect, Size},
        layout::{Absolute, Align, Flow, Grid, Stack},
    };
}
