//! Timer state structure

use serde::{Deserialize, Serialize};

use crate::engine::duration::format_clock;

/// Lifecycle of one countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Expired,
}

/// Countdown values, owned by the timer engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub status: TimerStatus,
    /// Seconds left; may be fractional, never negative
    pub remaining_seconds: f64,
    /// Duration the current cycle was started with, zero before the first start
    pub configured_duration: f64,
}

impl TimerState {
    /// Fresh running state for a new cycle
    pub fn running(duration: f64) -> Self {
        Self {
            status: TimerStatus::Running,
            remaining_seconds: duration,
            configured_duration: duration,
        }
    }

    /// Text shown in the duration field while counting down
    pub fn display(&self) -> String {
        match self.status {
            TimerStatus::Expired => "0:00".to_string(),
            _ => format_clock(self.remaining_seconds),
        }
    }
}
