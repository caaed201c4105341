//! Core error types for studymentor-core.
//!
//! Validation and index errors are raised before any state is touched.
//! Network errors come from the remote API client and never alter local
//! state; the caller decides how to surface them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studymentor-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input (empty goal text, non-positive durations)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Position outside an ordered collection
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    IndexOutOfRange {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Remote API failures
    #[error("Network error: {0}")]
    Network(#[from] ApiError),

    /// Local persistence failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A roadmap-bound call was made before any roadmap was generated
    #[error("No active roadmap; generate one first")]
    NoActiveRoadmap,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Goal text was empty after trimming
    #[error("Goal text must not be empty")]
    EmptyGoalText,

    /// A count or duration that must be strictly positive
    #[error("'{field}' must be a positive integer")]
    NonPositive { field: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Persistence-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Remote API errors. All of these are the "network" kind.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP client itself could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport, timeout, or body decoding failure
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The configured base URL cannot carry API paths
    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg)
                if code.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

impl CoreError {
    /// True for failures of the remote API, which callers report inline
    /// instead of aborting.
    pub fn is_network(&self) -> bool {
        matches!(self, CoreError::Network(_))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
