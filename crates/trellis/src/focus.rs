use tracing::debug;

use crate::{
    Ui,
    error::{Error, Result},
    event::{Event, EventKind},
    id::NodeId,
    listeners::emit,
};

/// Keyboard focus and the modal stack.
pub trait FocusManager {
    /// Does the node hold keyboard focus?
    fn is_focused(&self, node: NodeId) -> bool;

    /// The focused node, if any.
    fn focused(&self) -> Option<NodeId>;

    /// Focus a node, emitting `blur` on the previous holder and `focus` on
    /// the new one. Returns `true` if focus changed. Fails with
    /// [`Error::InvalidOperation`] if the node cannot take focus.
    fn set_focus(&mut self, node: NodeId) -> Result<bool>;

    /// Drop focus, emitting `blur` on the previous holder.
    fn clear_focus(&mut self);

    /// Move focus to the next eligible node in document order, wrapping at
    /// the end. With nothing focused, focus the first.
    fn focus_next(&mut self);

    /// Move focus to the previous eligible node in document order, wrapping
    /// at the start. With nothing focused, focus the last.
    fn focus_prev(&mut self);

    /// Eligible nodes in traversal order: the top modal's subtree while a
    /// modal is open, otherwise every root tree in registration order.
    fn focusable_nodes(&self) -> Vec<NodeId>;

    /// Can the node take focus right now?
    fn can_focus(&self, node: NodeId) -> bool;

    /// Push a node onto the modal stack: raise it above all open modals,
    /// show it, and focus its first eligible descendant.
    fn open_modal(&mut self, node: NodeId) -> Result<()>;

    /// Remove a node from the modal stack and hide it. Focus moves into the
    /// new top modal, or is cleared when no modal remains.
    fn close_modal(&mut self, node: NodeId) -> Result<()>;

    /// Is any modal open?
    fn is_modal_open(&self) -> bool;

    /// Open modals, bottom to top.
    fn modal_stack(&self) -> &[NodeId];

    /// Clear focus if the focused node is no longer eligible.
    fn ensure_focus_valid(&mut self);
}

impl FocusManager for Ui {
    fn is_focused(&self, node: NodeId) -> bool {
        self.focus == Some(node)
    }

    fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    fn set_focus(&mut self, node: NodeId) -> Result<bool> {
        self.node(node)?;
        if !self.can_focus(node) {
            return Err(Error::InvalidOperation(format!(
                "node {node:?} cannot take focus"
            )));
        }
        if self.is_focused(node) {
            return Ok(false);
        }
        move_focus(self, Some(node));
        Ok(true)
    }

    fn clear_focus(&mut self) {
        move_focus(self, None);
    }

    fn focus_next(&mut self) {
        let order = self.focusable_nodes();
        let target = match self.focus.and_then(|f| order.iter().position(|n| *n == f)) {
            Some(i) => order.get((i + 1) % order.len()),
            None => order.first(),
        };
        move_focus(self, target.copied());
    }

    fn focus_prev(&mut self) {
        let order = self.focusable_nodes();
        let target = match self.focus.and_then(|f| order.iter().position(|n| *n == f)) {
            Some(i) => order.get((i + order.len() - 1) % order.len()),
            None => order.last(),
        };
        move_focus(self, target.copied());
    }

    fn focusable_nodes(&self) -> Vec<NodeId> {
        let scopes = match self.modals.last() {
            Some(top) => vec![*top],
            None => self.roots.clone(),
        };
        let mut out = Vec::new();
        for scope in scopes {
            collect_focusable(self, scope, &mut out);
        }
        out
    }

    fn can_focus(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| {
            n.flags.focusable && n.flags.enabled && !n.destroying && self.is_displayed(node)
        })
    }

    fn open_modal(&mut self, node: NodeId) -> Result<()> {
        self.live(node)?;
        self.modals.retain(|m| *m != node);
        let z = self
            .modals
            .iter()
            .filter_map(|m| self.nodes.get(*m).map(|n| n.z))
            .max()
            .map_or(self.config.modal_z_base, |top| {
                top.saturating_add(1).max(self.config.modal_z_base)
            });
        self.modals.push(node);
        self.set_z(node, z)?;
        self.set_visible(node, true)?;
        debug!(?node, z, depth = self.modals.len(), "modal opened");
        emit(self, &Event::new(EventKind::ModalOpen, node));

        let first = first_focusable(self, node);
        move_focus(self, first);
        Ok(())
    }

    fn close_modal(&mut self, node: NodeId) -> Result<()> {
        if !self.modals.contains(&node) {
            return Err(Error::InvalidOperation(format!(
                "node {node:?} is not an open modal"
            )));
        }
        self.modals.retain(|m| *m != node);
        self.set_visible(node, false)?;
        debug!(?node, depth = self.modals.len(), "modal closed");
        emit(self, &Event::new(EventKind::ModalClose, node));

        focus_top_modal(self);
        Ok(())
    }

    fn is_modal_open(&self) -> bool {
        !self.modals.is_empty()
    }

    fn modal_stack(&self) -> &[NodeId] {
        &self.modals
    }

    fn ensure_focus_valid(&mut self) {
        if let Some(f) = self.focus
            && !self.can_focus(f)
        {
            move_focus(self, None);
        }
    }
}

/// Pre-order eligible nodes under `root`, skipping hidden subtrees.
fn collect_focusable(ui: &Ui, root: NodeId, out: &mut Vec<NodeId>) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = ui.nodes.get(id) else {
            continue;
        };
        if !node.flags.visible || node.destroying {
            continue;
        }
        if ui.can_focus(id) {
            out.push(id);
        }
        for child in node.children.iter().rev() {
            stack.push(*child);
        }
    }
}

/// First eligible node under `root`, including `root` itself.
fn first_focusable(ui: &Ui, root: NodeId) -> Option<NodeId> {
    let mut found = Vec::new();
    collect_focusable(ui, root, &mut found);
    found.first().copied()
}

/// Focus the first eligible node of the top modal, or clear focus when no
/// modal is open.
pub(crate) fn focus_top_modal(ui: &mut Ui) {
    let target = ui.modals.last().and_then(|top| first_focusable(ui, *top));
    move_focus(ui, target);
}

/// Move focus to `target`, updating interaction flags and emitting `blur`
/// and `focus`. A drag on the node losing focus is cancelled.
fn move_focus(ui: &mut Ui, target: Option<NodeId>) {
    let previous = ui.focus;
    if previous == target {
        return;
    }
    ui.focus = target;
    debug!(?previous, ?target, "focus moved");
    if let Some(prev) = previous
        && let Some(node) = ui.nodes.get_mut(prev)
    {
        node.interaction.focused = false;
        if !node.destroying {
            if ui.dragging() == Some(prev) {
                ui.cancel_drag();
            }
            emit(ui, &Event::new(EventKind::Blur, prev));
        }
    }
    // A blur listener may have moved focus again.
    if ui.focus != target {
        return;
    }
    if let Some(next) = target
        && let Some(node) = ui.nodes.get_mut(next)
    {
        node.interaction.focused = true;
        emit(ui, &Event::new(EventKind::Focus, next));
    }
}
