//! Core error types for focusloop-core.
//!
//! State-machine misuse (starting a running timer, pausing a stopped one)
//! is never an error - those operations are defined no-ops. Only
//! configuration validation, state storage, and background-snapshot
//! parsing can fail.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Mode;

/// Core error type for focusloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Background-snapshot errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Key/value store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be resolved or created
    #[error("Cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Key/value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file exists but is not valid JSON
    #[error("State store at {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Writing the store file failed
    #[error("Failed to write state store at {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// Data directory could not be resolved or created
    #[error("Cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Background-snapshot errors.
///
/// A malformed snapshot is the DataCorruption class: callers discard it
/// and fall back to a safe stopped state, carrying the persisted mode
/// forward when it survived.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A required snapshot field is absent
    #[error("background snapshot missing field '{field}'")]
    MissingField {
        field: &'static str,
        mode_hint: Option<Mode>,
    },

    /// A snapshot field is present but unparseable
    #[error("background snapshot field '{field}' is malformed: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
        mode_hint: Option<Mode>,
    },
}

impl SnapshotError {
    /// The persisted mode, when it could still be parsed out of the
    /// otherwise-corrupt snapshot.
    pub fn mode_hint(&self) -> Option<Mode> {
        match self {
            SnapshotError::MissingField { mode_hint, .. } => *mode_hint,
            SnapshotError::InvalidField { mode_hint, .. } => *mode_hint,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
