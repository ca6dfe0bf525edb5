//! Engine errors
//!
//! Request and flush calls never fail; these only surface while building
//! an engine from configuration.

/// Style sync error
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
