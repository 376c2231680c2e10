//! Background tasks module
//!
//! This module contains the event loop task that runs alongside the HTTP server.

pub mod event_loop;

// Re-export main functions
pub use event_loop::{event_loop_task, spawn_event_loop, Command, LoopChannels};
