//! Hit testing and the pointer/keyboard state machine.
//!
//! Raw input arrives through [`Ui::dispatch`]. Pointer input is resolved to
//! a node by hit testing; key input goes to the focused node. All listener
//! invocations go through the listener table, so callbacks may mutate the
//! tree mid-dispatch; every step re-checks that the nodes it touches still
//! exist.

use tracing::trace;

use crate::{
    Ui,
    bounds,
    event::{Button, Event, EventKind, InputEvent, Key, KeyAction, KeyInput, PointerAction},
    focus::FocusManager,
    geom::Point,
    id::NodeId,
    layout::Layout,
    listeners::emit,
    node::Node,
    widget::{InputOutcome, Widget},
};

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Drag {
    /// The dragged node.
    pub(crate) node: NodeId,
    /// Pointer position at drag start.
    pub(crate) origin: Point,
    /// Pointer position at the last drag event.
    pub(crate) last: Point,
}

/// Sort key for painting and hit testing siblings: stack layer (for stack
/// parents), then z, then sibling order.
pub(crate) fn stacking_order(ui: &Ui, parent: &Node) -> Vec<NodeId> {
    let layered = matches!(parent.layout(), Some(Layout::Stack(_)));
    let mut keyed: Vec<((i32, i32, usize), NodeId)> = parent
        .children
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let child = ui.nodes.get(*id)?;
            let layer = if layered { child.item.layer.index } else { 0 };
            Some(((layer, child.z, i), *id))
        })
        .collect();
    keyed.sort_by_key(|(k, _)| *k);
    keyed.into_iter().map(|(_, id)| id).collect()
}

/// Roots in ascending stacking order (z, then registration), excluding open
/// modals.
pub(crate) fn root_order(ui: &Ui) -> Vec<NodeId> {
    let mut keyed: Vec<((i32, usize), NodeId)> = ui
        .roots
        .iter()
        .enumerate()
        .filter(|(_, id)| !ui.modals.contains(id))
        .filter_map(|(i, id)| ui.nodes.get(*id).map(|n| ((n.z, i), *id)))
        .collect();
    keyed.sort_by_key(|(k, _)| *k);
    keyed.into_iter().map(|(_, id)| id).collect()
}

/// The topmost interactive node at `p`.
///
/// While any modal is open only the modal stack is searched, top first.
pub(crate) fn component_at(ui: &Ui, p: Point) -> Option<NodeId> {
    let hit = if ui.modals.is_empty() {
        root_order(ui).into_iter().rev().find_map(|r| hit_node(ui, r, p))
    } else {
        ui.modals.iter().rev().find_map(|m| hit_node(ui, *m, p))
    };
    trace!(x = p.x, y = p.y, ?hit, "hit test");
    hit
}

/// Deepest interactive node at `p` in the subtree at `id`.
///
/// A node is a candidate only if it is visible, interactive, and contains
/// `p`; otherwise its whole subtree is skipped. Children of a candidate are
/// tested before the candidate itself, topmost child first.
fn hit_node(ui: &Ui, id: NodeId, p: Point) -> Option<NodeId> {
    let node = ui.nodes.get(id)?;
    if !node.flags.visible || !node.flags.interactive || node.destroying {
        return None;
    }
    let rect = bounds::resolve(ui, id).ok()?;
    if !rect.contains_point(p) {
        return None;
    }
    let children_reachable = !node.clips()
        || bounds::clip_area(ui, id).is_ok_and(|c| c.contains_point(p));
    if children_reachable
        && let Some(hit) = stacking_order(ui, node)
            .into_iter()
            .rev()
            .find_map(|c| hit_node(ui, c, p))
    {
        return Some(hit);
    }
    Some(id)
}

/// Route one raw input event.
pub(crate) fn dispatch(ui: &mut Ui, input: InputEvent) {
    match input {
        InputEvent::Pointer(ptr) => match ptr.action {
            PointerAction::Move => pointer_move(ui, ptr.pos),
            PointerAction::Down => pointer_down(ui, ptr.pos, ptr.button),
            PointerAction::Up => pointer_up(ui, ptr.pos, ptr.button),
            PointerAction::Wheel { dx, dy } => wheel(ui, input, ptr.pos, Point::new(dx, dy)),
        },
        InputEvent::Key(key) => match key.action {
            KeyAction::Down => key_down(ui, key),
            KeyAction::Up => key_up(ui, key),
        },
    }
}

/// True if the node exists and accepts press, click, and focus.
fn enabled(ui: &Ui, id: NodeId) -> bool {
    ui.nodes
        .get(id)
        .is_some_and(|n| n.flags.enabled && !n.destroying)
}

/// Move the hover to whatever is under `p`.
fn update_hover(ui: &mut Ui, p: Point) {
    let hit = component_at(ui, p);
    let previous = ui.hovered;
    if hit == previous {
        return;
    }
    ui.hovered = hit;
    if let Some(prev) = previous
        && let Some(node) = ui.nodes.get_mut(prev)
    {
        node.interaction.hovered = false;
        emit(ui, &Event::new(EventKind::HoverLeave, prev).at(p));
    }
    if let Some(next) = hit
        && ui.hovered == Some(next)
        && let Some(node) = ui.nodes.get_mut(next)
    {
        node.interaction.hovered = true;
        emit(ui, &Event::new(EventKind::HoverEnter, next).at(p));
    }
}

/// Pointer moved: update hover, then advance any drag.
fn pointer_move(ui: &mut Ui, p: Point) {
    ui.pointer = Some(p);
    update_hover(ui, p);
    if let Some(drag) = ui.drag {
        if !ui.nodes.contains_key(drag.node) {
            ui.drag = None;
            return;
        }
        let delta = Point::new(p.x - drag.last.x, p.y - drag.last.y);
        ui.drag = Some(Drag { last: p, ..drag });
        emit(ui, &Event::new(EventKind::DragMove, drag.node).at(p).delta(delta));
    }
}

/// Button pressed: press, focus, and maybe start a drag on the hit node.
fn pointer_down(ui: &mut Ui, p: Point, button: Button) {
    ui.pointer = Some(p);
    update_hover(ui, p);
    let Some(hit) = component_at(ui, p) else {
        return;
    };
    if !enabled(ui, hit) {
        return;
    }
    if let Some(prev) = ui.pressed.take()
        && let Some(node) = ui.nodes.get_mut(prev)
    {
        node.interaction.pressed = false;
    }
    ui.pressed = Some(hit);
    if let Some(node) = ui.nodes.get_mut(hit) {
        node.interaction.pressed = true;
    }
    emit(ui, &Event::new(EventKind::PointerDown, hit).at(p).button(button));

    if ui.can_focus(hit)
        && let Err(e) = ui.set_focus(hit)
    {
        trace!(?hit, "focus on press failed: {e}");
    }
    let draggable = ui.nodes.get(hit).is_some_and(|n| n.flags.draggable);
    if draggable && button == Button::Primary && ui.drag.is_none() {
        ui.drag = Some(Drag {
            node: hit,
            origin: p,
            last: p,
        });
        emit(ui, &Event::new(EventKind::DragStart, hit).at(p).button(button));
    }
}

/// Button released: clear the press, end any drag, and click if released
/// over the pressed node.
fn pointer_up(ui: &mut Ui, p: Point, button: Button) {
    ui.pointer = Some(p);
    let hit = component_at(ui, p);
    let pressed = ui.pressed.take();
    if let Some(prev) = pressed
        && let Some(node) = ui.nodes.get_mut(prev)
    {
        node.interaction.pressed = false;
    }
    if let Some(h) = hit
        && enabled(ui, h)
    {
        emit(ui, &Event::new(EventKind::PointerUp, h).at(p).button(button));
    }
    if let Some(drag) = ui.drag.take()
        && ui.nodes.contains_key(drag.node)
    {
        let total = Point::new(p.x - drag.origin.x, p.y - drag.origin.y);
        emit(ui, &Event::new(EventKind::DragEnd, drag.node).at(p).delta(total));
    }
    if let (Some(pr), Some(h)) = (pressed, hit)
        && pr == h
        && button == Button::Primary
        && enabled(ui, h)
    {
        emit(ui, &Event::new(EventKind::Click, h).at(p).button(button));
    }
}

/// Wheel: notify the hit node, then scroll its nearest scrolling ancestor.
fn wheel(ui: &mut Ui, input: InputEvent, p: Point, delta: Point) {
    ui.pointer = Some(p);
    let Some(hit) = component_at(ui, p) else {
        return;
    };
    emit(ui, &Event::new(EventKind::Wheel, hit).at(p).delta(delta));

    let mut current = Some(hit);
    while let Some(id) = current {
        let Some(node) = ui.nodes.get(id) else {
            return;
        };
        if let InputOutcome::Scroll(d) = node.kind.handle_input(node, &input) {
            let step = ui.config.wheel_step;
            let offset = node.scroll_offset().unwrap_or_default();
            if let Err(e) = ui.set_scroll_offset(id, offset.x + d.x * step, offset.y + d.y * step)
            {
                trace!(?id, "wheel scroll failed: {e}");
            }
            return;
        }
        current = node.parent;
    }
}

/// Key pressed: Tab traversal, otherwise delivery to the focused node.
fn key_down(ui: &mut Ui, key: KeyInput) {
    if key.key == Key::Tab {
        if key.mods.shift {
            ui.focus_prev();
        } else {
            ui.focus_next();
        }
        return;
    }
    let Some(target) = ui.focus else {
        return;
    };
    emit(ui, &Event::new(EventKind::KeyDown, target).key(key));
    let outcome = ui
        .nodes
        .get(target)
        .filter(|n| !n.destroying)
        .map(|n| n.kind.handle_input(n, &InputEvent::Key(key)));
    if outcome == Some(InputOutcome::Activate) && enabled(ui, target) {
        trace!(?target, "keyboard activation");
        emit(ui, &Event::new(EventKind::Click, target).key(key));
    }
}

/// Key released: delivery to the focused node.
fn key_up(ui: &mut Ui, key: KeyInput) {
    if let Some(target) = ui.focus {
        emit(ui, &Event::new(EventKind::KeyUp, target).key(key));
    }
}

/// End the current drag, if any, emitting `drag-end` at the last pointer
/// position.
pub(crate) fn cancel_drag(ui: &mut Ui) {
    let Some(drag) = ui.drag.take() else {
        return;
    };
    let alive = ui.nodes.get(drag.node).is_some_and(|n| !n.destroying);
    if alive {
        let total = Point::new(drag.last.x - drag.origin.x, drag.last.y - drag.origin.y);
        emit(
            ui,
            &Event::new(EventKind::DragEnd, drag.node)
                .at(drag.last)
                .delta(total),
        );
    }
}
