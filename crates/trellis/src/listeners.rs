//! The listener table: callbacks keyed by `(node, event kind)`.

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::{trace, warn};

use crate::{
    Ui,
    error::Result,
    event::{Event, EventKind},
    id::{ListenerId, NodeId},
};

/// A listener callback. Receives the manager, the node the listener is
/// registered on, and the event. Errors are logged and swallowed.
pub type Callback = Box<dyn FnMut(&mut Ui, NodeId, &Event) -> Result<()>>;

/// A registered listener.
struct Entry {
    /// Owning node.
    node: NodeId,
    /// Subscribed kind.
    kind: EventKind,
    /// Remove after the first delivery.
    once: bool,
    /// The callback; `None` while it is running.
    callback: Option<Callback>,
}

/// Storage for all listeners of one manager.
#[derive(Default)]
pub(crate) struct Listeners {
    /// Listener entries.
    entries: SlotMap<ListenerId, Entry>,
    /// Registration order per `(node, kind)`.
    index: HashMap<(NodeId, EventKind), Vec<ListenerId>>,
    /// Number of callbacks that returned an error.
    pub(crate) failures: usize,
}

impl Listeners {
    /// Register a callback.
    pub(crate) fn add(
        &mut self,
        node: NodeId,
        kind: EventKind,
        once: bool,
        callback: Callback,
    ) -> ListenerId {
        let id = self.entries.insert(Entry {
            node,
            kind,
            once,
            callback: Some(callback),
        });
        self.index.entry((node, kind)).or_default().push(id);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            return false;
        };
        let key = (entry.node, entry.kind);
        if let Some(ids) = self.index.get_mut(&key) {
            ids.retain(|l| *l != id);
            if ids.is_empty() {
                self.index.remove(&key);
            }
        }
        true
    }

    /// Release every listener registered on `node`.
    pub(crate) fn remove_node(&mut self, node: NodeId) {
        self.index.retain(|(n, _), _| *n != node);
        self.entries.retain(|_, e| e.node != node);
    }

    /// The listeners for `(node, kind)` in registration order.
    pub(crate) fn snapshot(&self, node: NodeId, kind: EventKind) -> Vec<ListenerId> {
        self.index.get(&(node, kind)).cloned().unwrap_or_default()
    }

    /// Number of listeners on `(node, kind)`.
    pub(crate) fn count(&self, node: NodeId, kind: EventKind) -> usize {
        self.index.get(&(node, kind)).map_or(0, Vec::len)
    }

    /// Take a callback out for invocation. One-shot listeners are removed
    /// entirely so they can never fire twice.
    fn take(&mut self, id: ListenerId) -> Option<Callback> {
        let entry = self.entries.get_mut(id)?;
        let callback = entry.callback.take()?;
        if entry.once {
            self.remove(id);
        }
        Some(callback)
    }

    /// Put a callback back after invocation, unless the listener was removed
    /// while it ran.
    fn restore(&mut self, id: ListenerId, callback: Callback) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.callback = Some(callback);
        }
    }
}

/// Deliver `event` to every listener registered on its target for its kind.
///
/// The listener set is snapshotted first, so callbacks may freely add or
/// remove listeners and mutate the tree. A listener removed by an earlier
/// callback in the same delivery is skipped. Delivery stops if the target
/// node itself is removed.
pub(crate) fn emit(ui: &mut Ui, event: &Event) {
    let node = event.target;
    let ids = ui.listeners.snapshot(node, event.kind);
    if ids.is_empty() {
        return;
    }
    trace!(kind = %event.kind, ?node, listeners = ids.len(), "emit");
    for id in ids {
        if !ui.nodes.contains_key(node) {
            break;
        }
        let Some(mut callback) = ui.listeners.take(id) else {
            continue;
        };
        let result = callback(ui, node, event);
        ui.listeners.restore(id, callback);
        if let Err(e) = result {
            ui.listeners.failures += 1;
            warn!(kind = %event.kind, ?node, "listener failed: {e}");
        }
    }
}
