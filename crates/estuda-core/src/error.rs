//! Core error types for estuda-core.
//!
//! All fallible operations in the library report through this hierarchy,
//! built on thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for estuda-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Settings-related errors
    #[error("Settings error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

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

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored value under a key does not parse as the expected shape
    #[error("Corrupt value under key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Settings-layer errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid settings value
    #[error("Invalid settings value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown settings key
    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    /// Failed to parse a settings value
    #[error("Failed to parse settings value: {0}")]
    ParseFailed(String),
}

/// Validation errors for user-entered domain values.
///
/// Surfaced before any state mutation is attempted; a failed validation
/// means the mutation simply did not happen.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value for a named field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Correct answers exceed resolved questions
    #[error("questions correct ({correct}) exceeds questions resolved ({resolved})")]
    CorrectExceedsResolved { correct: u64, resolved: u64 },

    /// A goal schedule needs at least one enabled day
    #[error("at least one weekday must be enabled")]
    NoEnabledDay,

    /// Empty collection where at least one entry is required
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Referenced entity does not exist
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Entity with the same name already exists
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
