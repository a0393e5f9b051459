//! Error types
//!
//! Nothing in the simulation is fatal. `DropError` tells the caller why a drop
//! was ignored; the match state is untouched whenever one is returned.

use thiserror::Error;

/// Reasons a drop request was ignored
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    #[error("match is not running")]
    NotRunning,

    #[error("container not found: {0}")]
    UnknownContainer(u32),

    #[error("no container in queue")]
    EmptyQueue,
}

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Settings JSON was malformed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
