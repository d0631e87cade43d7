// Error types for the task tracker

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the store and its persistence layer.
///
/// `Validation` and `NotFound` are caller-input problems the interactive
/// shell recovers from; `CorruptState` and `Io` are fatal and deliberately
/// uncaught anywhere below `main`.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Bad caller input: empty name, non-integer priority, duplicate name
    #[error("{0}")]
    Validation(String),

    /// Completion of a name with no live task
    #[error("Task not found: '{name}'")]
    NotFound { name: String },

    /// Persisted file exists but cannot be replayed into a valid store
    #[error("Corrupt task file {path:?}: {message}")]
    CorruptState { path: PathBuf, message: String },

    /// Read/write failure on the persisted file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptState {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors the shell reports and continues past
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}

/// A type alias for `Result<T, TrackerError>`.
pub type Result<T> = std::result::Result<T, TrackerError>;
