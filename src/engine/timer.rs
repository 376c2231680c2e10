//! Countdown state machine
//!
//! The engine owns the [`TimerState`] and the handle of the single pending
//! tick. Every path that schedules a tick goes through
//! `schedule_tick`, which cancels and clears the held handle
//! first, so two countdowns can never run at once.

use std::time::Duration;

use tracing::{debug, info};

use super::scheduler::{ScheduledEvent, Scheduler, TaskId};
use crate::{
    error::DurationError,
    state::{TimerState, TimerStatus},
};

/// Time between two countdown steps
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Why an operation left the timer untouched
#[derive(Debug, Clone, PartialEq)]
pub enum IgnoreReason {
    InvalidDuration(String),
    NotRunning,
    NothingToResume,
    TickPending,
    StaleTick,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::InvalidDuration(detail) => write!(f, "invalid duration: {}", detail),
            IgnoreReason::NotRunning => write!(f, "timer is not running"),
            IgnoreReason::NothingToResume => write!(f, "no paused countdown to resume"),
            IgnoreReason::TickPending => write!(f, "countdown is already ticking"),
            IgnoreReason::StaleTick => write!(f, "tick from a cancelled countdown"),
        }
    }
}

impl From<DurationError> for IgnoreReason {
    fn from(err: DurationError) -> Self {
        IgnoreReason::InvalidDuration(err.to_string())
    }
}

/// Result of one timer operation
#[derive(Debug, Clone, PartialEq)]
pub enum TimerOutcome {
    Started { duration: f64 },
    Paused { remaining: f64 },
    Resumed { remaining: f64 },
    Ticked { remaining: f64 },
    /// The countdown ran out; the caller must start the alarm
    Expired,
    Ignored(IgnoreReason),
}

impl TimerOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, TimerOutcome::Ignored(_))
    }
}

#[derive(Debug, Default)]
pub struct TimerEngine {
    state: TimerState,
    tick: Option<TaskId>,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status
    }

    /// Handle of the tick currently waiting to fire
    pub fn pending_tick(&self) -> Option<TaskId> {
        self.tick
    }

    /// Start a new cycle from `duration` seconds, whatever the current status
    pub fn start<S: Scheduler>(&mut self, duration: f64, scheduler: &mut S) -> TimerOutcome {
        if !duration.is_finite() || duration <= 0.0 {
            return TimerOutcome::Ignored(DurationError::NotPositive(duration).into());
        }

        self.cancel_tick(scheduler);
        self.state = TimerState::running(duration);
        info!("Countdown started: {}s ({})", duration, self.state.display());
        self.schedule_tick(scheduler);
        TimerOutcome::Started { duration }
    }

    /// Stop ticking and keep the remaining time
    pub fn pause<S: Scheduler>(&mut self, scheduler: &mut S) -> TimerOutcome {
        if self.state.status != TimerStatus::Running {
            return TimerOutcome::Ignored(IgnoreReason::NotRunning);
        }

        self.cancel_tick(scheduler);
        self.state.status = TimerStatus::Paused;
        info!("Countdown paused at {}", self.state.display());
        TimerOutcome::Paused {
            remaining: self.state.remaining_seconds,
        }
    }

    /// Continue a paused countdown from where it stopped
    pub fn resume<S: Scheduler>(&mut self, scheduler: &mut S) -> TimerOutcome {
        if self.tick.is_some() {
            debug!("Resume ignored, a tick is already pending");
            return TimerOutcome::Ignored(IgnoreReason::TickPending);
        }
        if self.state.status != TimerStatus::Paused {
            return TimerOutcome::Ignored(IgnoreReason::NothingToResume);
        }

        self.state.status = TimerStatus::Running;
        info!("Countdown resumed at {}", self.state.display());
        self.schedule_tick(scheduler);
        TimerOutcome::Resumed {
            remaining: self.state.remaining_seconds,
        }
    }

    /// Handle a fired tick callback
    pub fn on_tick<S: Scheduler>(&mut self, id: TaskId, scheduler: &mut S) -> TimerOutcome {
        if self.tick != Some(id) || self.state.status != TimerStatus::Running {
            debug!("Dropping stale tick {}", id.raw());
            return TimerOutcome::Ignored(IgnoreReason::StaleTick);
        }
        // The fired callback is no longer pending
        self.tick = None;

        let remaining = self.state.remaining_seconds - 1.0;
        if remaining >= 0.0 {
            self.state.remaining_seconds = remaining;
            debug!("Tick: {}", self.state.display());
            self.schedule_tick(scheduler);
            TimerOutcome::Ticked { remaining }
        } else {
            self.state.remaining_seconds = 0.0;
            self.state.status = TimerStatus::Expired;
            info!("Countdown expired");
            TimerOutcome::Expired
        }
    }

    fn schedule_tick<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.cancel_tick(scheduler);
        self.tick = Some(scheduler.schedule(TICK_INTERVAL, ScheduledEvent::Tick));
    }

    fn cancel_tick<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.tick.take() {
            scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scheduler::ManualScheduler;

    fn tick_once(engine: &mut TimerEngine, scheduler: &mut ManualScheduler) -> TimerOutcome {
        let fired = scheduler.fire_next().expect("a tick should be pending");
        engine.on_tick(fired.id, scheduler)
    }

    #[test]
    fn test_start_schedules_exactly_one_tick() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();

        let outcome = engine.start(300.0, &mut scheduler);
        assert_eq!(outcome, TimerOutcome::Started { duration: 300.0 });
        assert_eq!(engine.status(), TimerStatus::Running);
        assert_eq!(scheduler.pending_ticks(), 1);
        assert_eq!(engine.state().display(), "5:00");
    }

    #[test]
    fn test_tick_counts_down_and_reschedules() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(300.0, &mut scheduler);

        let outcome = tick_once(&mut engine, &mut scheduler);
        assert_eq!(outcome, TimerOutcome::Ticked { remaining: 299.0 });
        assert_eq!(engine.state().display(), "4:59");
        assert_eq!(scheduler.pending_ticks(), 1);
        assert_eq!(scheduler.now(), TICK_INTERVAL);
    }

    #[test]
    fn test_integer_duration_expires_after_d_plus_one_ticks() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(3.0, &mut scheduler);

        let mut expirations = 0;
        let mut ticks = 0;
        while let Some(fired) = scheduler.fire_next() {
            ticks += 1;
            if engine.on_tick(fired.id, &mut scheduler) == TimerOutcome::Expired {
                expirations += 1;
            }
        }

        assert_eq!(ticks, 4);
        assert_eq!(expirations, 1);
        assert_eq!(engine.status(), TimerStatus::Expired);
        assert_eq!(engine.state().remaining_seconds, 0.0);
        assert_eq!(engine.state().display(), "0:00");
        assert!(engine.pending_tick().is_none());
    }

    #[test]
    fn test_half_second_expires_on_first_tick() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(0.5, &mut scheduler);

        assert_eq!(tick_once(&mut engine, &mut scheduler), TimerOutcome::Expired);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_fractional_duration_expires_after_floor_plus_one_ticks() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(2.5, &mut scheduler);

        assert_eq!(
            tick_once(&mut engine, &mut scheduler),
            TimerOutcome::Ticked { remaining: 1.5 }
        );
        assert_eq!(engine.state().display(), "0:01");
        assert_eq!(
            tick_once(&mut engine, &mut scheduler),
            TimerOutcome::Ticked { remaining: 0.5 }
        );
        assert_eq!(tick_once(&mut engine, &mut scheduler), TimerOutcome::Expired);
        assert_eq!(engine.state().remaining_seconds, 0.0);
        assert!(scheduler.fire_next().is_none());
    }

    #[test]
    fn test_pause_keeps_remaining_and_resume_continues() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(10.0, &mut scheduler);
        tick_once(&mut engine, &mut scheduler);
        tick_once(&mut engine, &mut scheduler);

        assert_eq!(
            engine.pause(&mut scheduler),
            TimerOutcome::Paused { remaining: 8.0 }
        );
        assert_eq!(scheduler.pending_count(), 0);

        assert_eq!(
            engine.resume(&mut scheduler),
            TimerOutcome::Resumed { remaining: 8.0 }
        );
        assert_eq!(
            tick_once(&mut engine, &mut scheduler),
            TimerOutcome::Ticked { remaining: 7.0 }
        );
    }

    #[test]
    fn test_double_resume_leaves_one_tick() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(10.0, &mut scheduler);
        engine.pause(&mut scheduler);

        engine.resume(&mut scheduler);
        let second = engine.resume(&mut scheduler);

        assert_eq!(second, TimerOutcome::Ignored(IgnoreReason::TickPending));
        assert_eq!(scheduler.pending_ticks(), 1);
    }

    #[test]
    fn test_resume_without_paused_countdown_is_noop() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();

        assert_eq!(
            engine.resume(&mut scheduler),
            TimerOutcome::Ignored(IgnoreReason::NothingToResume)
        );
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(engine.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_pause_when_not_running_is_noop() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        assert!(engine.pause(&mut scheduler).is_ignored());

        engine.start(5.0, &mut scheduler);
        engine.pause(&mut scheduler);
        assert_eq!(
            engine.pause(&mut scheduler),
            TimerOutcome::Ignored(IgnoreReason::NotRunning)
        );
    }

    #[test]
    fn test_restart_discards_previous_remaining() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(10.0, &mut scheduler);
        tick_once(&mut engine, &mut scheduler);
        engine.pause(&mut scheduler);

        engine.start(60.0, &mut scheduler);
        assert_eq!(engine.state().remaining_seconds, 60.0);
        assert_eq!(engine.state().configured_duration, 60.0);
        assert_eq!(engine.status(), TimerStatus::Running);
        assert_eq!(scheduler.pending_ticks(), 1);
    }

    #[test]
    fn test_restart_while_running_cancels_old_tick() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        engine.start(10.0, &mut scheduler);
        let old = engine.pending_tick().unwrap();

        engine.start(20.0, &mut scheduler);
        assert_eq!(scheduler.pending_ticks(), 1);
        assert_ne!(engine.pending_tick(), Some(old));

        // A late delivery of the old tick must not move the countdown
        assert_eq!(
            engine.on_tick(old, &mut scheduler),
            TimerOutcome::Ignored(IgnoreReason::StaleTick)
        );
        assert_eq!(engine.state().remaining_seconds, 20.0);
    }

    #[test]
    fn test_invalid_duration_is_ignored() {
        let mut engine = TimerEngine::new();
        let mut scheduler = ManualScheduler::new();
        assert!(engine.start(0.0, &mut scheduler).is_ignored());
        assert!(engine.start(f64::NAN, &mut scheduler).is_ignored());
        assert_eq!(engine.status(), TimerStatus::Idle);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
