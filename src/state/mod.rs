//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod alarm_state;
pub mod app_state;
pub mod display_state;
pub mod session;
pub mod timer_state;

// Re-export main types
pub use alarm_state::AlarmSchedule;
pub use app_state::AppState;
pub use display_state::{View, ViewSwitcher};
pub use session::{Action, ActionOutcome, Session, Snapshot};
pub use timer_state::{TimerState, TimerStatus};
