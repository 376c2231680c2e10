//! Shared test utilities.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use painters_timer::{
    engine::{AlarmNotifier, ManualScheduler},
    error::AudioError,
    services::{AudioBackend, PictureSource},
    state::Session,
};
use tempfile::TempDir;

/// Audio backend that only counts how often it was asked to play.
#[derive(Clone, Default)]
pub struct CountingPlayer {
    plays: Arc<AtomicUsize>,
}

impl CountingPlayer {
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AudioBackend for CountingPlayer {
    fn play_once(&self, _sound: &Path) -> Result<(), AudioError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Temporary layout with a pictures tree and an alarm sound:
///
/// pictures/root.png, pictures/faces/{a,b}.png, pictures/empty/, alarm.wav
pub struct Fixture {
    pub dir: TempDir,
    pub player: CountingPlayer,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let pictures = dir.path().join("pictures");
        fs::create_dir_all(pictures.join("faces")).unwrap();
        fs::create_dir_all(pictures.join("empty")).unwrap();

        for path in [
            pictures.join("root.png"),
            pictures.join("faces/a.png"),
            pictures.join("faces/b.png"),
        ] {
            image::RgbImage::new(40, 30).save(&path).unwrap();
        }
        fs::write(dir.path().join("alarm.wav"), b"RIFF").unwrap();

        Self {
            dir,
            player: CountingPlayer::default(),
        }
    }

    pub fn pictures(&self) -> PathBuf {
        self.dir.path().join("pictures")
    }

    pub fn sound(&self) -> PathBuf {
        self.dir.path().join("alarm.wav")
    }

    pub fn session(&self) -> Session {
        let alarm = AlarmNotifier::new(self.sound(), Box::new(self.player.clone()));
        Session::new(PictureSource::new(self.pictures()), alarm)
    }
}

/// Fire every pending callback until none is left; returns how many ticks ran.
pub fn run_to_completion(session: &mut Session, scheduler: &mut ManualScheduler) -> usize {
    let mut ticks = 0;
    while let Some(fired) = scheduler.fire_next() {
        if fired.event == painters_timer::engine::ScheduledEvent::Tick {
            ticks += 1;
        }
        session.on_fired(fired, scheduler);
    }
    ticks
}
