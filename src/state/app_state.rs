//! Shared application state handed to the HTTP handlers

use std::time::Instant;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::warn;

use super::{Action, ActionOutcome, Snapshot};
use crate::{
    error::{AppError, Result},
    services::PictureSource,
    tasks::{Command, LoopChannels},
};

/// Handle to the running session plus server metadata.
///
/// The session itself lives in the event loop task; this only sends it actions
/// and reads the snapshots it publishes.
#[derive(Debug)]
pub struct AppState {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    /// Used to resolve picker paths and build the folder tree
    pub pictures: PictureSource,
    /// Box the served picture is fitted into
    pub max_width: u32,
    pub max_height: u32,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(channels: LoopChannels, pictures: PictureSource, port: u16, host: String) -> Self {
        Self {
            commands: channels.commands,
            snapshots: channels.snapshots,
            pictures,
            max_width: 800,
            max_height: 600,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    pub fn with_picture_box(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Send an action to the event loop and wait for its outcome
    pub async fn dispatch(&self, action: Action) -> Result<(ActionOutcome, Snapshot)> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command { action, reply })
            .await
            .map_err(|_| AppError::LoopClosed)?;

        response.await.map_err(|_| {
            warn!("Event loop dropped a reply");
            AppError::LoopClosed
        })
    }

    /// Latest published session snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
