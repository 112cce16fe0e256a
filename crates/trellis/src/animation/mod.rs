//! Time-driven interpolation of numeric node properties.
//!
//! Each animation is a record holding one or more tracks (property, start,
//! end) on a single node. Start values are captured when the record is
//! created. Every tick advances a shared clock, evaluates each record's
//! eased progress, and writes the interpolated values back through the
//! manager so geometry changes invalidate bounds. Records are evaluated in
//! creation order, so when two records drive the same property the newer
//! one wins for that tick.

use std::{result::Result as StdResult, time::Duration};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::{
    Ui,
    error::Result,
    id::{AnimationId, NodeId},
};

/// Easing curves.
mod easing;
/// Animatable properties.
mod property;

pub use easing::Easing;
pub(crate) use property::Effect;
pub use property::Property;

/// Lifecycle of an animation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Created, not yet advanced by a tick.
    Pending,
    /// Advanced at least once and not finished.
    Running,
    /// Reached its end value. Completed records are discarded right after
    /// their completion callback is queued.
    Completed,
}

/// Callback fired once when an animation completes.
pub type CompletionCallback = Box<dyn FnOnce(&mut Ui, AnimationId) -> Result<()>>;

/// One interpolated property.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Target property.
    pub property: Property,
    /// Value captured at creation.
    pub from: f32,
    /// Target value.
    pub to: f32,
}

impl Track {
    /// Value at eased progress `e`. Exact `to` at completion.
    fn value(&self, e: f32, done: bool) -> f32 {
        if done {
            self.to
        } else {
            self.from + (self.to - self.from) * e
        }
    }
}

/// A scheduled animation.
struct Record {
    /// Target node.
    node: NodeId,
    /// Interpolated properties.
    tracks: Vec<Track>,
    /// Clock reading at creation.
    start: Duration,
    /// Total duration.
    duration: Duration,
    /// Easing curve.
    easing: Easing,
    /// Lifecycle state.
    state: AnimationState,
    /// Fired once on completion.
    on_complete: Option<CompletionCallback>,
}

impl Record {
    /// Linear progress at clock reading `now`, in `[0, 1]`.
    fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// All animation records of one manager.
#[derive(Default)]
pub(crate) struct Scheduler {
    /// Elapsed time accumulated from ticks.
    now: Duration,
    /// Live records.
    records: SlotMap<AnimationId, Record>,
    /// Creation order of live records.
    order: Vec<AnimationId>,
}

impl Scheduler {
    /// Add a record starting now.
    pub(crate) fn insert(
        &mut self,
        node: NodeId,
        tracks: Vec<Track>,
        duration: Duration,
        easing: Easing,
    ) -> AnimationId {
        let id = self.records.insert(Record {
            node,
            tracks,
            start: self.now,
            duration,
            easing,
            state: AnimationState::Pending,
            on_complete: None,
        });
        self.order.push(id);
        id
    }

    /// Remove a record without touching its node. Returns false if it had
    /// already completed or been cancelled.
    pub(crate) fn cancel(&mut self, id: AnimationId) -> bool {
        if self.records.remove(id).is_some() {
            self.order.retain(|a| *a != id);
            true
        } else {
            false
        }
    }

    /// Cancel every record targeting `node`.
    pub(crate) fn cancel_node(&mut self, node: NodeId) {
        self.records.retain(|_, r| r.node != node);
        let records = &self.records;
        self.order.retain(|a| records.contains_key(*a));
    }

    /// Attach a completion callback. Returns the callback back if the
    /// record is gone.
    pub(crate) fn set_callback(
        &mut self,
        id: AnimationId,
        callback: CompletionCallback,
    ) -> StdResult<(), CompletionCallback> {
        match self.records.get_mut(id) {
            Some(r) => {
                r.on_complete = Some(callback);
                Ok(())
            }
            None => Err(callback),
        }
    }

    /// State of a live record.
    pub(crate) fn state(&self, id: AnimationId) -> Option<AnimationState> {
        self.records.get(id).map(|r| r.state)
    }

    /// Tracks of a live record.
    pub(crate) fn tracks(&self, id: AnimationId) -> Option<&[Track]> {
        self.records.get(id).map(|r| r.tracks.as_slice())
    }

    /// Number of live records.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

/// Advance the clock by `dt`, write interpolated values, then retire
/// finished records and fire their callbacks.
pub(crate) fn advance(ui: &mut Ui, dt: Duration) {
    let sched = &mut ui.animations;
    sched.now += dt;
    let now = sched.now;

    let mut writes = Vec::new();
    let mut finished = Vec::new();
    for id in &sched.order {
        let Some(record) = sched.records.get_mut(*id) else {
            continue;
        };
        let t = record.progress(now);
        let done = t >= 1.0;
        let eased = record.easing.apply(t);
        for track in &record.tracks {
            writes.push((record.node, track.property.clone(), track.value(eased, done)));
        }
        record.state = if done {
            AnimationState::Completed
        } else {
            AnimationState::Running
        };
        if done {
            finished.push(*id);
        }
    }

    for (node, property, value) in writes {
        ui.write_property(node, &property, value);
    }

    let mut callbacks = Vec::new();
    for id in finished {
        if let Some(mut record) = ui.animations.records.remove(id) {
            ui.animations.order.retain(|a| *a != id);
            debug!(?id, node = ?record.node, "animation completed");
            if let Some(cb) = record.on_complete.take() {
                callbacks.push((id, cb));
            }
        }
    }
    for (id, cb) in callbacks {
        if let Err(e) = cb(ui, id) {
            ui.listeners.failures += 1;
            warn!(?id, "animation completion callback failed: {e}");
        }
    }
}
