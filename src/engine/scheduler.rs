//! Deferred one-shot callbacks for the event loop
//!
//! The timer and the alarm never sleep. They ask a [`Scheduler`] to deliver a
//! [`ScheduledEvent`] back to the event loop after a delay, and keep the
//! returned [`TaskId`] if they may need to cancel it.

use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};

use tokio::{sync::mpsc, task::AbortHandle};
use tracing::debug;

/// Identifier of one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a scheduled callback asks the event loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// One countdown step
    Tick,
    /// Next firing of an alarm chain, carrying the firings left including this one
    AlarmRepeat { repeats: u32 },
}

/// A scheduled callback that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TaskId,
    pub event: ScheduledEvent,
}

pub trait Scheduler {
    /// Deliver `event` after `delay`
    fn schedule(&mut self, delay: Duration, event: ScheduledEvent) -> TaskId;

    /// Drop a pending callback. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, id: TaskId) -> bool;
}

/// Scheduler backed by tokio sleeps that post into the event loop channel
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    pending: HashMap<TaskId, AbortHandle>,
    fired_tx: mpsc::UnboundedSender<Fired>,
}

impl TokioScheduler {
    pub fn new(fired_tx: mpsc::UnboundedSender<Fired>) -> Self {
        Self {
            next_id: 0,
            pending: HashMap::new(),
            fired_tx,
        }
    }

    /// Claim a fired callback on arrival in the event loop.
    ///
    /// A callback cancelled after its sleep finished may still have its
    /// message queued; it is no longer pending, so this returns false and the
    /// loop drops the message.
    pub fn claim(&mut self, fired: &Fired) -> bool {
        self.pending.remove(&fired.id).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, event: ScheduledEvent) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let tx = self.fired_tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver only disappears when the loop shuts down
            let _ = tx.send(Fired { id, event });
        });

        debug!("Scheduled {:?} as task {} in {:?}", event, id.0, delay);
        self.pending.insert(id, handle.abort_handle());
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.remove(&id) {
            Some(handle) => {
                handle.abort();
                debug!("Cancelled task {}", id.0);
                true
            }
            None => false,
        }
    }
}

/// Virtual-clock scheduler that only moves when told to.
///
/// Used to drive the state machine deterministically without a runtime.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TaskId, (Duration, ScheduledEvent)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of pending countdown ticks
    pub fn pending_ticks(&self) -> usize {
        self.pending
            .values()
            .filter(|(_, event)| *event == ScheduledEvent::Tick)
            .count()
    }

    /// Advance the clock to the earliest pending callback and hand it out.
    ///
    /// Ties are resolved in scheduling order.
    pub fn fire_next(&mut self) -> Option<Fired> {
        let (&id, &(due, _)) = self
            .pending
            .iter()
            .min_by_key(|(id, (due, _))| (*due, **id))?;
        let (_, event) = self.pending.remove(&id)?;
        self.now = self.now.max(due);
        Some(Fired { id, event })
    }

    /// Like [`fire_next`](Self::fire_next) but only for callbacks due by `deadline`
    pub fn fire_due(&mut self, deadline: Duration) -> Option<Fired> {
        let due = self.pending.values().map(|(due, _)| *due).min()?;
        if due > deadline {
            self.now = self.now.max(deadline);
            return None;
        }
        self.fire_next()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, event: ScheduledEvent) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.pending.insert(id, (self.now + delay, event));
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        self.pending.remove(&id).is_some()
    }
}
