//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::TimeUnit,
    services::FolderNode,
    state::{ActionOutcome, Snapshot},
};

fn default_amount() -> String {
    "5".to_string()
}

/// Body of `POST /start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl Default for StartRequest {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            unit: TimeUnit::default(),
        }
    }
}

/// Body of `PUT /folder`; a missing or null path selects all pictures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderRequest {
    #[serde(default)]
    pub path: Option<String>,
}

/// API response structure for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// "applied" or "ignored"
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: Snapshot,
}

impl ApiResponse {
    pub fn from_outcome(outcome: &ActionOutcome, session: Snapshot) -> Self {
        let status = if outcome.is_applied() { "applied" } else { "ignored" };
        Self {
            status: status.to_string(),
            message: outcome.message(),
            timestamp: Utc::now(),
            session,
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: Snapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldersResponse {
    pub base: String,
    pub folders: Vec<FolderNode>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
