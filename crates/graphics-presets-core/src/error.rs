//! Error types for graphics-presets-core

use std::path::PathBuf;
use thiserror::Error;

/// Why the preset mapping file could not be read
#[derive(Error, Debug)]
pub enum ConfigReadError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for preset operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read preset mapping {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: ConfigReadError,
    },

    #[error("Graphics preset '{name}' not found at {path}")]
    PresetNotFound { name: String, path: PathBuf },

    #[error("No graphics presets are available")]
    EmptyCatalog,

    #[error("No graphics backup exists at {0}")]
    NoBackup(PathBuf),

    #[error("Failed to copy {file} to profile {profile}: {source}")]
    Sync {
        file: PathBuf,
        profile: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference store error: {0}")]
    Preference(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl Error {
    /// Build a `ConfigRead` error for the mapping file at `path`
    pub(crate) fn config_read(
        path: impl Into<PathBuf>,
        source: impl Into<ConfigReadError>,
    ) -> Self {
        Error::ConfigRead {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

/// Result type alias for preset operations
pub type Result<T> = std::result::Result<T, Error>;
