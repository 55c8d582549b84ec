//! Domain error types
//!
//! All fallible operations in nad-ch return [`NadError`]. Third-party error types
//! are converted at the adapter boundary and never leak through the public API.

use thiserror::Error;

/// Main nad-ch error type
#[derive(Debug, Error)]
pub enum NadError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input supplied to a use case or entity
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence errors
    #[error("Database error: {0}")]
    Database(String),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Background task errors
    #[error("Task error: {0}")]
    Task(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for NadError {
    fn from(err: std::io::Error) -> Self {
        NadError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NadError {
    fn from(err: serde_json::Error) -> Self {
        NadError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for NadError {
    fn from(err: toml::de::Error) -> Self {
        NadError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for NadError {
    fn from(err: csv::Error) -> Self {
        NadError::Serialization(format!("CSV error: {err}"))
    }
}
