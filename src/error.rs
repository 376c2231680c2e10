//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that are worth reporting to the caller.
///
/// The silent recoveries of the practice timer (bad duration text, empty
/// folder, missing alarm sound, duplicate resume) are not errors; they are
/// reported as ignored outcomes instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Event loop is not running")]
    LoopClosed,

    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("Folder is outside the pictures directory: {0}")]
    FolderOutsideBase(PathBuf),

    #[error("No picture is currently shown")]
    NoPicture,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Why a duration text could not be used to start a countdown
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,

    #[error("clock-style duration '{0}' is not accepted")]
    ClockFormat(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("duration must be a positive number of seconds, got {0}")]
    NotPositive(f64),
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to spawn player '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
