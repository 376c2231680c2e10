//! Alarm sound playback

use std::{path::Path, process::Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::AudioError;

/// Plays a sound file once without waiting for it to finish
pub trait AudioBackend: Send {
    fn play_once(&self, sound: &Path) -> Result<(), AudioError>;
}

/// Runs an external player program (`aplay`, `paplay`, `afplay`, ...) per firing
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl AudioBackend for CommandPlayer {
    fn play_once(&self, sound: &Path) -> Result<(), AudioError> {
        debug!("Playing {} with {}", sound.display(), self.program);

        // The child is not awaited; tokio reaps it in the background
        Command::new(&self.program)
            .arg(sound)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(())
    }
}
