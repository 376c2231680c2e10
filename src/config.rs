//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::engine::alarm::{DEFAULT_INTERVAL, DEFAULT_REPEATS};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "painters-timer")]
#[command(about = "Random reference pictures with a practice countdown and alarm")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Folder holding the practice pictures
    #[arg(long, default_value = "pictures")]
    pub pictures: PathBuf,

    /// Sound played when the countdown runs out
    #[arg(long, default_value = "alarm_sound/alarm.wav")]
    pub alarm_sound: PathBuf,

    /// Program used to play the alarm sound
    #[arg(long, default_value = "aplay")]
    pub player: String,

    /// Number of times the alarm sounds on expiry
    #[arg(long, default_value_t = DEFAULT_REPEATS)]
    pub alarm_repeats: u32,

    /// Milliseconds between alarm firings
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_millis() as u64)]
    pub alarm_interval_ms: u64,

    /// Width of the box the served picture is fitted into
    #[arg(long, default_value = "800")]
    pub max_width: u32,

    /// Height of the box the served picture is fitted into
    #[arg(long, default_value = "600")]
    pub max_height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn alarm_interval(&self) -> Duration {
        Duration::from_millis(self.alarm_interval_ms)
    }
}
