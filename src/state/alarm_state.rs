//! Alarm repeat bookkeeping

use serde::{Deserialize, Serialize};

/// Progress of the most recent alarm chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmSchedule {
    /// Firings still to come after the last one
    pub repeats_remaining: u32,
    /// True while a follow-up firing is scheduled
    pub active: bool,
    /// Firings since startup, across all chains
    pub fired: u64,
}

impl AlarmSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one firing out of `repeats` left (this one included)
    pub fn record_firing(&mut self, repeats: u32) {
        self.fired += 1;
        self.repeats_remaining = repeats.saturating_sub(1);
        self.active = self.repeats_remaining > 0;
    }

    /// The chain stopped early, e.g. because the sound went missing
    pub fn stop(&mut self) {
        self.repeats_remaining = 0;
        self.active = false;
    }
}
