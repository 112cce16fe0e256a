use std::time::Duration;

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::{
    anchor::Anchor,
    animation::{
        self, AnimationState, CompletionCallback, Easing, Effect, Property, Scheduler, Track,
    },
    bounds,
    config::{NodeConfig, UiConfig},
    dispatch::{self, Drag},
    error::{Error, Result},
    event::{Event, EventKind, InputEvent},
    focus::{self, FocusManager},
    geom::{Edges, Point, Rect, Size, extent, finite_or_zero},
    id::{AnimationId, ListenerId, NodeId},
    layout::{Layout, LayoutConfig, LayoutItem},
    listeners::{self, Callback, Listeners},
    node::Node,
    render::{Surface, TextMeasure},
    style::Style,
    widget::Widget,
};

/// The scene graph manager.
///
/// `Ui` owns every node, the root registry, focus, hover and drag state, the
/// modal stack, the listener table, and the animation scheduler. There is no
/// global instance; any number of managers can coexist.
pub struct Ui {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Top-level nodes in registration order.
    pub(crate) roots: Vec<NodeId>,
    /// Settings.
    pub(crate) config: UiConfig,
    /// Text measurement for auto-sized nodes.
    pub(crate) measure: Box<dyn TextMeasure>,
    /// Focused node.
    pub(crate) focus: Option<NodeId>,
    /// Node under the pointer.
    pub(crate) hovered: Option<NodeId>,
    /// Node holding the current press.
    pub(crate) pressed: Option<NodeId>,
    /// In-progress drag.
    pub(crate) drag: Option<Drag>,
    /// Last known pointer position.
    pub(crate) pointer: Option<Point>,
    /// Open modals, bottom to top.
    pub(crate) modals: Vec<NodeId>,
    /// Listener table.
    pub(crate) listeners: Listeners,
    /// Animation records.
    pub(crate) animations: Scheduler,
}

impl Ui {
    /// A manager with default settings and the given viewport size.
    pub fn new(viewport: Size) -> Self {
        Self::with_config(UiConfig {
            viewport,
            ..Default::default()
        })
    }

    /// A manager with explicit settings.
    pub fn with_config(config: UiConfig) -> Self {
        let measure = Box::new(config.measure());
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            config,
            measure,
            focus: None,
            hovered: None,
            pressed: None,
            drag: None,
            pointer: None,
            modals: Vec::new(),
            listeners: Listeners::default(),
            animations: Scheduler::default(),
        }
    }

    /// Settings in effect.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Resize the canvas. Every root subtree is invalidated.
    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.config.viewport = Size::new(w, h).sanitized();
        debug!(w, h, "viewport resized");
        self.invalidate_all();
    }

    /// Replace the text measurer. Every node is invalidated.
    pub fn set_text_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.measure = Box::new(measure);
        self.invalidate_all();
    }

    // --- Creation and structure -------------------------------------------

    /// Create a detached node. It is not painted or hit-tested until it is
    /// registered as a root or attached below another node.
    pub fn create(&mut self, config: &NodeConfig) -> Result<NodeId> {
        let node = Node::from_config(config, self.config.font_size)?;
        let id = self.nodes.insert(node);
        trace!(?id, kind = %config.kind, "node created");
        Ok(id)
    }

    /// Create a node and register it as a root.
    pub fn create_root(&mut self, config: &NodeConfig) -> Result<NodeId> {
        let id = self.create(config)?;
        self.add_root(id)?;
        Ok(id)
    }

    /// Create a node as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, config: &NodeConfig) -> Result<NodeId> {
        self.live(parent)?;
        let id = self.create(config)?;
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Register `id` as a root, detaching it from any parent first.
    pub fn add_root(&mut self, id: NodeId) -> Result<()> {
        self.live(id)?;
        self.detach(id);
        self.roots.push(id);
        bounds::invalidate_subtree(&self.nodes, id);
        self.ensure_focus_valid();
        Ok(())
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.live(parent)?.children.len();
        self.insert_child(parent, child, index)
    }

    /// Insert `child` at `index` among `parent`'s children. Ownership moves
    /// atomically: the child is removed from its old parent (or the root
    /// registry) before being accepted.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.live(parent)?;
        self.live(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        self.detach(child);
        let p = self.live_mut(parent)?;
        let index = index.min(p.children.len());
        p.children.insert(index, child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        bounds::invalidate(&self.nodes, child);
        self.ensure_focus_valid();
        Ok(())
    }

    /// Remove `child` from `parent`. The child stays alive, detached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.live(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(Error::InvalidOperation(format!(
                "node {child:?} is not a child of {parent:?}"
            )));
        }
        self.detach(child);
        bounds::invalidate_subtree(&self.nodes, child);
        self.ensure_focus_valid();
        Ok(())
    }

    /// Move `child` under `new_parent`, or make it a root when `None`.
    pub fn reparent(&mut self, child: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        match new_parent {
            Some(p) => self.add_child(p, child),
            None => self.add_root(child),
        }
    }

    /// Destroy a node and its whole subtree.
    ///
    /// The subtree is first marked mid-destruction, so bounds queries and
    /// structural operations on it fail with [`Error::Detached`] and hit
    /// testing ignores it. `destroy` listeners then run, parent before
    /// children. Finally modal, focus, hover, press, and drag state is
    /// cleaned up, animations and listeners are released, and the nodes
    /// are removed from the arena.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if self.node(id)?.destroying {
            return Ok(());
        }
        let subtree = self.subtree(id);
        let fresh: Vec<NodeId> = subtree
            .iter()
            .copied()
            .filter(|n| self.nodes.get(*n).is_some_and(|n| !n.destroying))
            .collect();
        for n in &fresh {
            if let Some(node) = self.nodes.get_mut(*n) {
                node.destroying = true;
            }
        }
        debug!(?id, nodes = fresh.len(), "destroying subtree");
        for n in &fresh {
            if self.nodes.contains_key(*n) {
                listeners::emit(self, &Event::new(EventKind::Destroy, *n));
            }
        }

        let doomed = |n: Option<NodeId>| n.is_some_and(|n| subtree.contains(&n));
        let top_modal_doomed = doomed(self.modals.last().copied());
        self.modals.retain(|m| !subtree.contains(m));
        if doomed(self.hovered) {
            self.hovered = None;
        }
        if doomed(self.pressed) {
            self.pressed = None;
        }
        if doomed(self.dragging()) {
            self.cancel_drag();
        }
        if top_modal_doomed {
            focus::focus_top_modal(self);
        } else if doomed(self.focus) {
            self.clear_focus();
        }
        for n in &subtree {
            self.animations.cancel_node(*n);
            self.listeners.remove_node(*n);
        }
        self.detach(id);
        for n in &subtree {
            self.nodes.remove(*n);
        }
        Ok(())
    }

    // --- Queries ----------------------------------------------------------

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Does the id refer to a live node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registered roots, in registration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Absolute bounds of a node, cached until invalidated.
    pub fn bounds_of(&self, id: NodeId) -> Result<Rect> {
        bounds::resolve(self, id)
    }

    /// The area a node's children are placed in: bounds minus padding,
    /// shifted by the scroll offset.
    pub fn content_bounds(&self, id: NodeId) -> Result<Rect> {
        bounds::content_area(self, id)
    }

    /// The size used for layout and anchoring.
    pub fn intrinsic_size(&self, id: NodeId) -> Result<Size> {
        Ok(bounds::intrinsic_size(self, self.node(id)?))
    }

    /// The topmost interactive node at `(x, y)`.
    pub fn component_at(&self, x: f32, y: f32) -> Option<NodeId> {
        dispatch::component_at(self, Point::new(x, y))
    }

    /// The node under the pointer.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// The node holding the current press.
    pub fn pressed(&self) -> Option<NodeId> {
        self.pressed
    }

    /// The node being dragged.
    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.map(|d| d.node)
    }

    /// Last pointer position seen by the dispatcher.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// True if the node and all its ancestors are visible and its tree is
    /// registered as a root or open as a modal.
    pub fn is_displayed(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(current) else {
                return false;
            };
            if !node.flags.visible || node.destroying {
                return false;
            }
            if self.modals.contains(&current) {
                return true;
            }
            match node.parent {
                Some(p) => current = p,
                None => return self.roots.contains(&current),
            }
        }
    }

    // --- Geometry and flag setters ---------------------------------------

    /// Set the local position.
    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> Result<()> {
        let node = self.live_mut(id)?;
        node.x = finite_or_zero(x);
        node.y = finite_or_zero(y);
        bounds::invalidate(&self.nodes, id);
        Ok(())
    }

    /// Set the declared size. Negative or non-finite values become zero.
    pub fn set_size(&mut self, id: NodeId, width: f32, height: f32) -> Result<()> {
        let node = self.live_mut(id)?;
        node.width = extent(width);
        node.height = extent(height);
        bounds::invalidate(&self.nodes, id);
        Ok(())
    }

    /// Set the stacking order.
    pub fn set_z(&mut self, id: NodeId, z: i32) -> Result<()> {
        self.live_mut(id)?.z = z;
        Ok(())
    }

    /// Set the anchor preset.
    pub fn set_anchor(&mut self, id: NodeId, anchor: Anchor) -> Result<()> {
        self.live_mut(id)?.anchor = anchor;
        bounds::invalidate(&self.nodes, id);
        Ok(())
    }

    /// Set the anchor preset by name. An unknown name fails with
    /// [`Error::Configuration`].
    pub fn set_anchor_named(&mut self, id: NodeId, anchor: &str) -> Result<()> {
        let anchor = anchor.parse()?;
        self.set_anchor(id, anchor)
    }

    /// Set the margin.
    pub fn set_margin(&mut self, id: NodeId, margin: Edges) -> Result<()> {
        self.live_mut(id)?.margin = margin;
        bounds::invalidate(&self.nodes, id);
        Ok(())
    }

    /// Set the padding.
    pub fn set_padding(&mut self, id: NodeId, padding: Edges) -> Result<()> {
        self.live_mut(id)?.padding = padding;
        bounds::invalidate(&self.nodes, id);
        Ok(())
    }

    /// Show or hide a node. Hiding drops focus, hover, and drags inside it.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let node = self.live_mut(id)?;
        if node.flags.visible == visible {
            return Ok(());
        }
        node.flags.visible = visible;
        bounds::invalidate(&self.nodes, id);
        if !visible {
            self.drop_transient_state();
        }
        Ok(())
    }

    /// Enable or disable a node. Disabled nodes are still hit-tested but
    /// receive no press, click, or focus.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.live_mut(id)?.flags.enabled = enabled;
        self.ensure_focus_valid();
        Ok(())
    }

    /// Set whether the node is a hit-test candidate.
    pub fn set_interactive(&mut self, id: NodeId, interactive: bool) -> Result<()> {
        self.live_mut(id)?.flags.interactive = interactive;
        Ok(())
    }

    /// Set whether the node takes part in Tab traversal.
    pub fn set_focusable(&mut self, id: NodeId, focusable: bool) -> Result<()> {
        self.live_mut(id)?.flags.focusable = focusable;
        self.ensure_focus_valid();
        Ok(())
    }

    /// Set whether a press starts a drag.
    pub fn set_draggable(&mut self, id: NodeId, draggable: bool) -> Result<()> {
        self.live_mut(id)?.flags.draggable = draggable;
        Ok(())
    }

    /// Set the selection flag.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<()> {
        self.live_mut(id)?.interaction.selected = selected;
        Ok(())
    }

    /// Set the text of a label or button.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        let node = self.live_mut(id)?;
        let kind = node.kind;
        let Some(t) = &mut node.caps.text else {
            return Err(Error::InvalidOperation(format!(
                "{kind} nodes carry no text"
            )));
        };
        t.text = text.to_string();
        if t.auto_size {
            bounds::invalidate(&self.nodes, id);
        }
        Ok(())
    }

    /// Assign a layout strategy. Fails with [`Error::InvalidOperation`] if
    /// the node cannot hold one.
    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> Result<()> {
        let node = self.live_mut(id)?;
        let kind = node.kind;
        let Some(c) = &mut node.caps.container else {
            return Err(Error::InvalidOperation(format!(
                "{kind} nodes cannot hold a layout"
            )));
        };
        debug!(?id, strategy = %layout.kind(), "layout assigned");
        c.layout = layout;
        bounds::invalidate_children(&self.nodes, id);
        Ok(())
    }

    /// Assign a layout strategy from its configuration form. An unknown
    /// strategy name fails with [`Error::Configuration`] and leaves the
    /// node unchanged.
    pub fn set_layout_config(&mut self, id: NodeId, config: &LayoutConfig) -> Result<()> {
        let layout = Layout::from_config(config).inspect_err(|e| {
            warn!(?id, "rejected layout: {e}");
        })?;
        self.set_layout(id, layout)
    }

    /// Set the parameters read by the parent's layout strategy.
    pub fn set_item(&mut self, id: NodeId, item: LayoutItem) -> Result<()> {
        self.live_mut(id)?.item = item;
        bounds::invalidate(&self.nodes, id);
        Ok(())
    }

    /// Set the paint style.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<()> {
        self.live_mut(id)?.style = style;
        Ok(())
    }

    /// Set the paint opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f32) -> Result<()> {
        self.live_mut(id)?.opacity = finite_or_zero(opacity).clamp(0.0, 1.0);
        Ok(())
    }

    /// Set a named numeric property.
    pub fn set_prop(&mut self, id: NodeId, name: &str, value: f32) -> Result<()> {
        self.live_mut(id)?
            .props
            .insert(name.to_string(), finite_or_zero(value));
        Ok(())
    }

    /// Set the scroll offset, clamped so content never scrolls past its
    /// extent.
    pub fn set_scroll_offset(&mut self, id: NodeId, x: f32, y: f32) -> Result<()> {
        let node = self.live(id)?;
        if node.caps.scroll.is_none() {
            return Err(Error::InvalidOperation(format!(
                "{} nodes do not scroll",
                node.kind
            )));
        }
        let max = self.scroll_limit(id)?;
        let offset = Point::new(
            finite_or_zero(x).clamp(0.0, max.x),
            finite_or_zero(y).clamp(0.0, max.y),
        );
        if let Some(s) = &mut self.live_mut(id)?.caps.scroll {
            s.offset = offset;
        }
        bounds::invalidate_children(&self.nodes, id);
        Ok(())
    }

    // --- Listeners ------------------------------------------------------

    /// Register a listener for `kind` on `node`.
    pub fn on<F>(&mut self, node: NodeId, kind: EventKind, f: F) -> Result<ListenerId>
    where
        F: FnMut(&mut Self, NodeId, &Event) -> Result<()> + 'static,
    {
        self.live(node)?;
        let callback: Callback = Box::new(f);
        Ok(self.listeners.add(node, kind, false, callback))
    }

    /// Register a listener that is removed after its first delivery.
    pub fn once<F>(&mut self, node: NodeId, kind: EventKind, f: F) -> Result<ListenerId>
    where
        F: FnMut(&mut Self, NodeId, &Event) -> Result<()> + 'static,
    {
        self.live(node)?;
        let callback: Callback = Box::new(f);
        Ok(self.listeners.add(node, kind, true, callback))
    }

    /// Register a listener by event name. An unknown name fails with
    /// [`Error::Configuration`].
    pub fn on_named<F>(&mut self, node: NodeId, event: &str, f: F) -> Result<ListenerId>
    where
        F: FnMut(&mut Self, NodeId, &Event) -> Result<()> + 'static,
    {
        let kind = event.parse()?;
        self.on(node, kind, f)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of listeners for `kind` on `node`.
    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners.count(node, kind)
    }

    /// Number of callbacks (listeners and animation completions) that have
    /// returned an error.
    pub fn listener_failures(&self) -> usize {
        self.listeners.failures
    }

    /// Deliver a synthetic event to `node`'s listeners.
    pub fn emit(&mut self, node: NodeId, kind: EventKind) -> Result<()> {
        self.live(node)?;
        listeners::emit(self, &Event::new(kind, node));
        Ok(())
    }

    // --- Animation ------------------------------------------------------

    /// Animate properties of `node` to target values. Start values are
    /// captured now.
    pub fn animate(
        &mut self,
        node: NodeId,
        targets: &[(Property, f32)],
        duration: Duration,
        easing: Easing,
    ) -> Result<AnimationId> {
        let n = self.live(node)?;
        let tracks = targets
            .iter()
            .map(|(property, to)| {
                Ok(Track {
                    property: property.clone(),
                    from: property.read(n)?,
                    to: finite_or_zero(*to),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let id = self.animations.insert(node, tracks, duration, easing);
        trace!(?id, ?node, ?duration, %easing, "animation scheduled");
        Ok(id)
    }

    /// Animate by property and easing names.
    pub fn animate_named(
        &mut self,
        node: NodeId,
        targets: &[(&str, f32)],
        duration: Duration,
        easing: &str,
    ) -> Result<AnimationId> {
        let easing: Easing = easing.parse()?;
        let targets = targets
            .iter()
            .map(|(name, to)| Ok((name.parse::<Property>()?, *to)))
            .collect::<Result<Vec<_>>>()?;
        self.animate(node, &targets, duration, easing)
    }

    /// Stop an animation where it is. Returns false if it had already
    /// finished or been cancelled.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        self.animations.cancel(id)
    }

    /// Run `f` once when the animation completes. Cancelled animations never
    /// complete.
    pub fn on_animation_complete<F>(&mut self, id: AnimationId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self, AnimationId) -> Result<()> + 'static,
    {
        let callback: CompletionCallback = Box::new(f);
        self.animations
            .set_callback(id, callback)
            .map_err(|_| Error::InvalidOperation(format!("animation {id:?} is not active")))
    }

    /// State of a live animation; `None` once it has been discarded.
    pub fn animation_state(&self, id: AnimationId) -> Option<AnimationState> {
        self.animations.state(id)
    }

    /// Tracks of a live animation.
    pub fn animation_tracks(&self, id: AnimationId) -> Option<&[Track]> {
        self.animations.tracks(id)
    }

    /// Number of live animations.
    pub fn active_animations(&self) -> usize {
        self.animations.len()
    }

    /// Write an animated value and invalidate what it affects.
    pub(crate) fn write_property(&mut self, id: NodeId, property: &Property, value: f32) {
        let Some(node) = self.nodes.get_mut(id).filter(|n| !n.destroying) else {
            return;
        };
        match property.write(node, value) {
            Effect::Geometry => bounds::invalidate(&self.nodes, id),
            Effect::Content => bounds::invalidate_children(&self.nodes, id),
            Effect::Paint => {}
        }
    }

    // --- Frame ------------------------------------------------------------

    /// Advance one frame: tick animations, then resolve every displayed
    /// node's bounds.
    pub fn update(&mut self, dt: Duration) {
        animation::advance(self, dt);
        let mut trees = self.roots.clone();
        trees.extend(self.modals.iter().copied());
        for root in trees {
            for id in self.subtree(root) {
                if let Err(e) = self.bounds_of(id) {
                    trace!(?id, "skipping bounds: {e}");
                }
            }
        }
    }

    /// Paint every displayed node: roots by ascending z, then open modals
    /// bottom to top. Children paint after their parent.
    pub fn paint(&self, surface: &mut dyn Surface) {
        for root in dispatch::root_order(self) {
            self.paint_node(root, 1.0, surface);
        }
        for modal in &self.modals {
            self.paint_node(*modal, 1.0, surface);
        }
    }

    /// Paint a node and its descendants.
    fn paint_node(&self, id: NodeId, opacity: f32, surface: &mut dyn Surface) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.flags.visible || node.destroying {
            return;
        }
        let Ok(rect) = self.bounds_of(id) else {
            return;
        };
        let opacity = opacity * node.opacity;
        node.kind.paint(node, rect, opacity, surface);
        let clip = if node.clips() {
            bounds::clip_area(self, id).ok()
        } else {
            None
        };
        if let Some(c) = clip {
            surface.push_clip(c);
        }
        for child in dispatch::stacking_order(self, node) {
            // Open modals paint on their own pass, above every root.
            if !self.modals.contains(&child) {
                self.paint_node(child, opacity, surface);
            }
        }
        if clip.is_some() {
            surface.pop_clip();
        }
    }

    // --- Input ------------------------------------------------------------

    /// Feed one raw input event through hit testing and the pointer and
    /// keyboard state machines.
    pub fn dispatch(&mut self, input: impl Into<InputEvent>) {
        dispatch::dispatch(self, input.into());
    }

    /// End the current drag, emitting `drag-end`.
    pub fn cancel_drag(&mut self) {
        dispatch::cancel_drag(self);
    }

    // --- Internals --------------------------------------------------------

    /// A node that exists and is not mid-destruction.
    pub(crate) fn live(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        if node.destroying {
            return Err(Error::Detached(id));
        }
        Ok(node)
    }

    /// Mutable access to a live node.
    fn live_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        if node.destroying {
            return Err(Error::Detached(id));
        }
        Ok(node)
    }

    /// Is `a` equal to `b` or one of its ancestors?
    fn is_ancestor_or_self(&self, a: NodeId, b: NodeId) -> bool {
        let mut current = Some(b);
        while let Some(id) = current {
            if id == a {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// `id` and all descendants, pre-order.
    pub(crate) fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes.get(n) {
                out.push(n);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Unlink `id` from its parent or from the root registry.
    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|n| n.parent.take());
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(p) {
                    pn.children.retain(|c| *c != id);
                }
                bounds::invalidate_layout(&self.nodes, p);
            }
            None => self.roots.retain(|r| *r != id),
        }
    }

    /// Largest scroll offset that keeps content in view.
    fn scroll_limit(&self, id: NodeId) -> Result<Point> {
        let node = self.live(id)?;
        let clip = bounds::clip_area(self, id)?;
        let offset = node.scroll_offset().unwrap_or_default();
        let (mut right, mut bottom) = (0.0f32, 0.0f32);
        for child in &node.children {
            if !self.nodes.get(*child).is_some_and(|c| c.flags.visible) {
                continue;
            }
            let b = self.bounds_of(*child)?;
            right = right.max(b.right() + offset.x - clip.x);
            bottom = bottom.max(b.bottom() + offset.y - clip.y);
        }
        Ok(Point::new(extent(right - clip.w), extent(bottom - clip.h)))
    }

    /// Mark every node dirty.
    fn invalidate_all(&mut self) {
        for node in self.nodes.values() {
            node.mark_dirty();
        }
    }

    /// Drop hover, press, drag, and focus on nodes that are no longer
    /// displayed.
    fn drop_transient_state(&mut self) {
        if let Some(h) = self.hovered
            && !self.is_displayed(h)
        {
            if let Some(n) = self.nodes.get_mut(h) {
                n.interaction.hovered = false;
            }
            self.hovered = None;
        }
        if let Some(p) = self.pressed
            && !self.is_displayed(p)
        {
            if let Some(n) = self.nodes.get_mut(p) {
                n.interaction.pressed = false;
            }
            self.pressed = None;
        }
        if let Some(d) = self.dragging()
            && !self.is_displayed(d)
        {
            self.cancel_drag();
        }
        self.ensure_focus_valid();
    }
}
