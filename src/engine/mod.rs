//! Timer engine module
//!
//! The countdown state machine, the expiry alarm, and the scheduler that both
//! use for their deferred callbacks.

pub mod alarm;
pub mod duration;
pub mod scheduler;
pub mod timer;

// Re-export main types
pub use alarm::{AlarmNotifier, AlarmOutcome};
pub use duration::{format_clock, parse_duration, TimeUnit};
pub use scheduler::{Fired, ManualScheduler, ScheduledEvent, Scheduler, TaskId, TokioScheduler};
pub use timer::{IgnoreReason, TimerEngine, TimerOutcome};
