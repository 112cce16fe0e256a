use std::{cell::Cell, collections::HashMap};

use crate::{
    anchor::Anchor,
    config::NodeConfig,
    error::{Error, Result},
    geom::{Edges, Point, Rect, Size, extent, finite_or_zero},
    id::NodeId,
    layout::{Layout, LayoutItem},
    state::NodeName,
    style::Style,
    widget::{Capabilities, NodeKind},
};

/// Behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Painted and hit-tested.
    pub visible: bool,
    /// Accepts press, click, and focus.
    pub enabled: bool,
    /// Candidate for hit testing.
    pub interactive: bool,
    /// Participates in Tab traversal.
    pub focusable: bool,
    /// A press starts a drag.
    pub draggable: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            interactive: true,
            focusable: false,
            draggable: false,
        }
    }
}

/// Transient interaction state, maintained by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    /// Under the pointer.
    pub hovered: bool,
    /// Received the current press.
    pub pressed: bool,
    /// Holds keyboard focus.
    pub focused: bool,
    /// Application-controlled selection.
    pub selected: bool,
}

/// Core node data stored in the arena.
#[derive(Debug)]
pub struct Node {
    /// Node type.
    pub(crate) kind: NodeKind,
    /// Human-readable name.
    pub(crate) name: NodeName,

    /// Owning parent, if attached below another node.
    pub(crate) parent: Option<NodeId>,
    /// Ordered children; paint and Tab order.
    pub(crate) children: Vec<NodeId>,

    /// Local x, relative to the parent's content origin.
    pub(crate) x: f32,
    /// Local y, relative to the parent's content origin.
    pub(crate) y: f32,
    /// Declared width.
    pub(crate) width: f32,
    /// Declared height.
    pub(crate) height: f32,
    /// Stacking order among siblings.
    pub(crate) z: i32,

    /// Anchor preset.
    pub(crate) anchor: Anchor,
    /// Outer insets.
    pub(crate) margin: Edges,
    /// Inner insets defining the content area.
    pub(crate) padding: Edges,

    /// Behaviour flags.
    pub(crate) flags: Flags,
    /// Interaction state.
    pub(crate) interaction: Interaction,
    /// Parameters read by the parent's layout strategy.
    pub(crate) item: LayoutItem,
    /// Optional capabilities.
    pub(crate) caps: Capabilities,

    /// Named numeric properties.
    pub(crate) props: HashMap<String, f32>,
    /// Paint opacity in `[0, 1]`, multiplied down the tree.
    pub(crate) opacity: f32,
    /// Paint style.
    pub(crate) style: Style,

    /// Cached absolute bounds.
    pub(crate) bounds: Cell<Option<Rect>>,
    /// Set when the cached bounds are stale.
    pub(crate) dirty: Cell<bool>,
    /// Absolute rectangle assigned by the parent's layout pass.
    pub(crate) slot: Cell<Option<Rect>>,
    /// Set when this node's own layout pass must be rerun.
    pub(crate) layout_dirty: Cell<bool>,

    /// The node is mid-destruction.
    pub(crate) destroying: bool,
}

impl Node {
    /// Construct a detached node from a configuration.
    ///
    /// Fails with [`Error::Configuration`] for an unknown layout strategy and
    /// [`Error::InvalidOperation`] if a layout is given for a kind that
    /// cannot hold one.
    pub(crate) fn from_config(config: &NodeConfig, font_size: f32) -> Result<Self> {
        let kind = config.kind;
        let mut caps = kind.capabilities(font_size);
        if let Some(text) = &mut caps.text {
            text.text = config.text.clone().unwrap_or_default();
            text.font_size = config.font_size.unwrap_or(font_size);
            text.auto_size = config.auto_size;
        }
        if let Some(layout) = &config.layout {
            let layout = Layout::from_config(layout)?;
            match &mut caps.container {
                Some(c) => c.layout = layout,
                None if layout.is_none() => {}
                None => {
                    return Err(Error::InvalidOperation(format!(
                        "{kind} nodes cannot hold a layout"
                    )));
                }
            }
        }
        let name = match &config.name {
            Some(n) => NodeName::convert(n),
            None => NodeName::convert(kind.name()),
        };
        Ok(Self {
            kind,
            name,
            parent: None,
            children: Vec::new(),
            x: finite_or_zero(config.x),
            y: finite_or_zero(config.y),
            width: extent(config.width),
            height: extent(config.height),
            z: config.z,
            anchor: config.anchor,
            margin: config.margin,
            padding: config.padding,
            flags: Flags {
                visible: config.visible,
                enabled: config.enabled,
                interactive: config.interactive,
                focusable: config.focusable.unwrap_or_else(|| kind.focusable()),
                draggable: config.draggable,
            },
            interaction: Interaction {
                selected: config.selected,
                ..Default::default()
            },
            item: config.item.clone(),
            caps,
            props: config.props.clone(),
            opacity: config.opacity.clamp(0.0, 1.0),
            style: config.style,
            bounds: Cell::new(None),
            dirty: Cell::new(true),
            slot: Cell::new(None),
            layout_dirty: Cell::new(true),
            destroying: false,
        })
    }

    /// Return the node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Return the node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the local position.
    pub fn local(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Return the declared size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Return the stacking order.
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Return the anchor preset.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Return the margin.
    pub fn margin(&self) -> Edges {
        self.margin
    }

    /// Return the padding.
    pub fn padding(&self) -> Edges {
        self.padding
    }

    /// Return the behaviour flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Return the interaction state.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Return the per-child layout parameters.
    pub fn item(&self) -> &LayoutItem {
        &self.item
    }

    /// Return the capabilities.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Return the container layout, if this node can hold one.
    pub fn layout(&self) -> Option<&Layout> {
        self.caps.container.as_ref().map(|c| &c.layout)
    }

    /// Return the text, if this node carries any.
    pub fn text(&self) -> Option<&str> {
        self.caps.text.as_ref().map(|t| t.text.as_str())
    }

    /// Return the scroll offset, if this node scrolls.
    pub fn scroll_offset(&self) -> Option<Point> {
        self.caps.scroll.map(|s| s.offset)
    }

    /// Return a named numeric property.
    pub fn prop(&self, name: &str) -> Option<f32> {
        self.props.get(name).copied()
    }

    /// Return the paint opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Return the paint style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Return true if the cached bounds are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Return true if the node is mid-destruction.
    pub fn is_destroying(&self) -> bool {
        self.destroying
    }

    /// True if this node's children are positioned by a layout pass.
    pub(crate) fn has_layout(&self) -> bool {
        self.layout().is_some_and(|l| !l.is_none())
    }

    /// True if children are clipped to the content area.
    pub(crate) fn clips(&self) -> bool {
        self.caps.container.as_ref().is_some_and(|c| c.clip_children)
    }

    /// Drop every cached rectangle on this node.
    pub(crate) fn mark_dirty(&self) {
        self.dirty.set(true);
        self.layout_dirty.set(true);
    }
}
