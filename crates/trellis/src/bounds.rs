//! Lazy, cached resolution of absolute node bounds.
//!
//! Bounds are computed on read and cached on the node. Any geometry change
//! marks the node's whole subtree dirty; if the node's parent runs a layout
//! pass, the parent's pass and every sibling subtree are marked as well,
//! since siblings share that pass. Ancestors are never touched.

use slotmap::SlotMap;
use tracing::debug;

use crate::{
    Ui,
    error::{Error, Result},
    geom::{Point, Rect, Size},
    id::NodeId,
    layout::LayoutChild,
    node::Node,
    widget::Widget,
};

/// Look up a live node.
fn get(nodes: &SlotMap<NodeId, Node>, id: NodeId) -> Result<&Node> {
    nodes.get(id).ok_or(Error::NodeNotFound(id))
}

/// Absolute bounds of `id`, resolving ancestors first.
pub(crate) fn resolve(ui: &Ui, id: NodeId) -> Result<Rect> {
    let node = get(&ui.nodes, id)?;
    if node.destroying {
        return Err(Error::Detached(id));
    }
    if !node.dirty.get()
        && let Some(bounds) = node.bounds.get()
    {
        return Ok(bounds);
    }

    let base = match node.parent {
        None => {
            let viewport = Rect::from_origin_size(Point::zero(), ui.config.viewport);
            node.anchor
                .place(viewport.sanitized(), intrinsic_size(ui, node), node.local())
        }
        Some(parent_id) => {
            let content = content_area(ui, parent_id).map_err(|e| match e {
                Error::Detached(_) => Error::Detached(id),
                other => other,
            })?;
            let parent = get(&ui.nodes, parent_id)?;
            let slot = if parent.has_layout() {
                layout_slot(ui, parent, content, id)
            } else {
                None
            };
            slot.unwrap_or_else(|| {
                node.anchor
                    .place(content, intrinsic_size(ui, node), node.local())
            })
        }
    };

    let m = node.margin;
    let bounds = Rect::new(
        base.x + m.left,
        base.y + m.top,
        base.w - m.horizontal(),
        base.h - m.vertical(),
    )
    .sanitized();
    node.bounds.set(Some(bounds));
    node.dirty.set(false);
    Ok(bounds)
}

/// The area children of `id` are positioned in: bounds minus padding,
/// shifted by the scroll offset.
pub(crate) fn content_area(ui: &Ui, id: NodeId) -> Result<Rect> {
    let bounds = resolve(ui, id)?;
    let node = get(&ui.nodes, id)?;
    let content = bounds.inset(node.padding);
    Ok(match node.caps.scroll {
        Some(s) => content.translate(-s.offset.x, -s.offset.y),
        None => content,
    })
}

/// The unscrolled content area of `id`, used for clipping.
pub(crate) fn clip_area(ui: &Ui, id: NodeId) -> Result<Rect> {
    let bounds = resolve(ui, id)?;
    Ok(bounds.inset(get(&ui.nodes, id)?.padding))
}

/// Intrinsic size of a node, per its widget kind.
pub(crate) fn intrinsic_size(ui: &Ui, node: &Node) -> Size {
    node.kind.intrinsic_size(node, ui.measure.as_ref())
}

/// Return `child`'s slot in `parent`'s layout pass, rerunning the pass if
/// it is stale. Hidden children get no slot.
fn layout_slot(ui: &Ui, parent: &Node, content: Rect, child: NodeId) -> Option<Rect> {
    if parent.layout_dirty.get() {
        run_layout(ui, parent, content);
    }
    ui.nodes.get(child).and_then(|c| c.slot.get())
}

/// Run `parent`'s layout strategy over its visible children and store each
/// result in the child's slot.
fn run_layout(ui: &Ui, parent: &Node, content: Rect) {
    let Some(layout) = parent.layout() else {
        return;
    };
    let mut ids = Vec::with_capacity(parent.children.len());
    let mut inputs = Vec::with_capacity(parent.children.len());
    for id in &parent.children {
        let Some(child) = ui.nodes.get(*id) else {
            continue;
        };
        child.slot.set(None);
        if !child.flags.visible || child.destroying {
            continue;
        }
        ids.push(*id);
        inputs.push(LayoutChild {
            size: intrinsic_size(ui, child),
            local: child.local(),
            anchor: child.anchor,
            item: &child.item,
        });
    }
    let rects = layout.apply(content, &inputs);
    debug!(strategy = %layout.kind(), children = ids.len(), "layout pass");
    for (id, rect) in ids.into_iter().zip(rects) {
        if let Some(child) = ui.nodes.get(id) {
            child.slot.set(Some(rect));
        }
    }
    parent.layout_dirty.set(false);
}

/// Mark `id` and every descendant dirty.
pub(crate) fn invalidate_subtree(nodes: &SlotMap<NodeId, Node>, id: NodeId) {
    let mut stack = vec![id];
    while let Some(n) = stack.pop() {
        if let Some(node) = nodes.get(n) {
            node.mark_dirty();
            stack.extend(node.children.iter().copied());
        }
    }
}

/// Invalidate after a change to `id`'s own geometry or visibility.
pub(crate) fn invalidate(nodes: &SlotMap<NodeId, Node>, id: NodeId) {
    invalidate_subtree(nodes, id);
    if let Some(parent) = nodes.get(id).and_then(|n| n.parent) {
        invalidate_layout(nodes, parent);
    }
}

/// Invalidate the layout pass of `parent`, if it runs one: its pass and all
/// of its children's subtrees. The parent's own bounds stay valid.
pub(crate) fn invalidate_layout(nodes: &SlotMap<NodeId, Node>, parent: NodeId) {
    let Some(p) = nodes.get(parent) else {
        return;
    };
    if !p.has_layout() {
        return;
    }
    p.layout_dirty.set(true);
    for child in &p.children {
        invalidate_subtree(nodes, *child);
    }
}

/// Invalidate everything below `id`, but not `id` itself. Used when the
/// content area changes without the node's own bounds changing.
pub(crate) fn invalidate_children(nodes: &SlotMap<NodeId, Node>, id: NodeId) {
    let Some(node) = nodes.get(id) else {
        return;
    };
    node.layout_dirty.set(true);
    for child in &node.children {
        invalidate_subtree(nodes, *child);
    }
}
