//! Error types for Slotlog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Slotlog operations.
pub type Result<T> = std::result::Result<T, SlotlogError>;

/// Core error type for Slotlog operations.
#[derive(Debug, Error)]
pub enum SlotlogError {
    /// Data validation error (misaligned slot, malformed backup, bad setting)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for SlotlogError {
    fn from(err: std::io::Error) -> Self {
        SlotlogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SlotlogError {
    fn from(err: serde_json::Error) -> Self {
        SlotlogError::Serialization(err.to_string())
    }
}
