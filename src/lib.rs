//! Painters Timer - random reference pictures for timed figure-drawing practice
//!
//! A picture is drawn at random from a folder tree, a countdown runs while it
//! is shown, and an alarm repeats when time is up. The countdown can be paused,
//! which flips back to the folder picker, and resumed.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{AppError, Result};
pub use state::{AppState, Session};
pub use utils::signals::shutdown_signal;
