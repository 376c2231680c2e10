//! Repeating expiry alarm
//!
//! Each firing plays the sound once and schedules the next firing one
//! interval later. The chain is not tied to the countdown: starting a new
//! cycle does not stop an alarm that is still ringing.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{debug, info, warn};

use super::scheduler::{ScheduledEvent, Scheduler};
use crate::{services::AudioBackend, state::AlarmSchedule};

/// Firings per expiry unless configured otherwise
pub const DEFAULT_REPEATS: u32 = 5;

/// Gap between firings, roughly the length of the alarm sound
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    /// Sound played; `follow_up` tells whether another firing was scheduled
    Fired { follow_up: bool },
    /// Sound file is absent, chain ends here
    SoundMissing,
    /// Asked to fire zero times
    Nothing,
}

pub struct AlarmNotifier {
    sound: PathBuf,
    interval: Duration,
    repeats: u32,
    backend: Box<dyn AudioBackend>,
    schedule: AlarmSchedule,
}

impl std::fmt::Debug for AlarmNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmNotifier")
            .field("sound", &self.sound)
            .field("interval", &self.interval)
            .field("repeats", &self.repeats)
            .field("schedule", &self.schedule)
            .finish()
    }
}

impl AlarmNotifier {
    pub fn new(sound: impl Into<PathBuf>, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            sound: sound.into(),
            interval: DEFAULT_INTERVAL,
            repeats: DEFAULT_REPEATS,
            backend,
            schedule: AlarmSchedule::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn sound(&self) -> &Path {
        &self.sound
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Configured number of firings per expiry
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    pub fn schedule(&self) -> &AlarmSchedule {
        &self.schedule
    }

    /// Start a chain of `repeats` firings. Returns after the first one.
    pub fn trigger<S: Scheduler>(&mut self, repeats: u32, scheduler: &mut S) -> AlarmOutcome {
        info!("Alarm triggered, {} firings", repeats);
        self.fire(repeats, scheduler)
    }

    /// Handle a fired repeat callback
    pub fn on_repeat<S: Scheduler>(&mut self, repeats: u32, scheduler: &mut S) -> AlarmOutcome {
        self.fire(repeats, scheduler)
    }

    fn fire<S: Scheduler>(&mut self, repeats: u32, scheduler: &mut S) -> AlarmOutcome {
        if repeats == 0 {
            return AlarmOutcome::Nothing;
        }
        if !self.sound.is_file() {
            debug!("Alarm sound {} not found, skipping", self.sound.display());
            self.schedule.stop();
            return AlarmOutcome::SoundMissing;
        }

        if let Err(e) = self.backend.play_once(&self.sound) {
            warn!("Failed to play alarm: {}", e);
        }
        self.schedule.record_firing(repeats);

        let follow_up = repeats > 1;
        if follow_up {
            scheduler.schedule(
                self.interval,
                ScheduledEvent::AlarmRepeat {
                    repeats: repeats - 1,
                },
            );
        }
        AlarmOutcome::Fired { follow_up }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::{engine::scheduler::ManualScheduler, error::AudioError};

    struct CountingPlayer(Arc<AtomicUsize>);

    impl AudioBackend for CountingPlayer {
        fn play_once(&self, _sound: &Path) -> Result<(), AudioError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn notifier_with_sound() -> (AlarmNotifier, Arc<AtomicUsize>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let sound = dir.path().join("alarm.wav");
        std::fs::write(&sound, b"RIFF").unwrap();
        let plays = Arc::new(AtomicUsize::new(0));
        let notifier = AlarmNotifier::new(sound, Box::new(CountingPlayer(plays.clone())));
        (notifier, plays, dir)
    }

    #[test]
    fn test_five_repeats_fire_five_times_one_second_apart() {
        let (mut notifier, plays, _dir) = notifier_with_sound();
        let mut scheduler = ManualScheduler::new();

        notifier.trigger(5, &mut scheduler);
        let mut fire_times = vec![scheduler.now()];
        while let Some(fired) = scheduler.fire_next() {
            let ScheduledEvent::AlarmRepeat { repeats } = fired.event else {
                panic!("unexpected event {:?}", fired.event);
            };
            fire_times.push(scheduler.now());
            notifier.on_repeat(repeats, &mut scheduler);
        }

        assert_eq!(plays.load(Ordering::SeqCst), 5);
        let expected: Vec<Duration> = (0..5).map(Duration::from_secs).collect();
        assert_eq!(fire_times, expected);
        assert!(!notifier.schedule().active);
        assert_eq!(notifier.schedule().fired, 5);
    }

    #[test]
    fn test_single_repeat_schedules_nothing() {
        let (mut notifier, plays, _dir) = notifier_with_sound();
        let mut scheduler = ManualScheduler::new();

        assert_eq!(
            notifier.trigger(1, &mut scheduler),
            AlarmOutcome::Fired { follow_up: false }
        );
        assert_eq!(plays.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_missing_sound_is_skipped() {
        let plays = Arc::new(AtomicUsize::new(0));
        let mut notifier = AlarmNotifier::new(
            "no/such/alarm.wav",
            Box::new(CountingPlayer(plays.clone())),
        );
        let mut scheduler = ManualScheduler::new();

        assert_eq!(notifier.trigger(5, &mut scheduler), AlarmOutcome::SoundMissing);
        assert_eq!(plays.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_builder_settings() {
        let (notifier, _plays, _dir) = notifier_with_sound();
        let notifier = notifier
            .with_repeats(3)
            .with_interval(Duration::from_millis(500));
        assert_eq!(notifier.repeats(), 3);
        assert_eq!(notifier.interval(), Duration::from_millis(500));
    }
}
