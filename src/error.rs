//! Error types for world construction and configuration.
//!
//! Nothing in the running tick loop returns these: once a `World` exists,
//! collaborator failures are logged and swallowed.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Config file could not be read
    #[error("Failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `GameConfig`
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A config value is out of range
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),

    /// Level data is inconsistent
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// The audio collaborator reported a failure
    #[error("Audio sink failure: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
