use std::{cell::RefCell, rc::Rc};

use crate::{
    Ui,
    error::Result,
    event::{Event, EventKind},
    id::NodeId,
};

/// A shared, append-only record of delivered events.
///
/// Clones share the same buffer, so a clone can be moved into a listener
/// while the test keeps the original for assertions.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    /// Recorded `(listener node, event)` pairs.
    entries: Rc<RefCell<Vec<(NodeId, Event)>>>,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every event of the given kinds delivered to `node`.
    pub fn watch(&self, ui: &mut Ui, node: NodeId, kinds: &[EventKind]) -> Result<()> {
        for kind in kinds {
            let log = self.clone();
            ui.on(node, *kind, move |_, n, e| {
                log.entries.borrow_mut().push((n, e.clone()));
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Record every event kind delivered to `node`.
    pub fn watch_all(&self, ui: &mut Ui, node: NodeId) -> Result<()> {
        self.watch(ui, node, &EventKind::ALL)
    }

    /// Recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.entries.borrow().iter().map(|(_, e)| e.clone()).collect()
    }

    /// Recorded `(kind name, target)` pairs, the usual shape for asserting
    /// delivery order.
    pub fn kinds(&self) -> Vec<(&'static str, NodeId)> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, e)| (e.kind.name(), e.target))
            .collect()
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .count()
    }

    /// Drop every recorded event.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
