//! Error types for the medlabel-core library.
//!
//! Field extraction itself never fails: an unmatched field is simply absent.
//! These errors cover the surrounding tooling (configuration files, date
//! strings handed in by callers).

use thiserror::Error;

/// Main error type for the medlabel library.
#[derive(Error, Debug)]
pub enum MedlabelError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A string could not be read as a `YYYY-MM-DD` label date.
    #[error("invalid label date: {0}")]
    InvalidDate(String),
}

/// Result type for the medlabel library.
pub type Result<T> = std::result::Result<T, MedlabelError>;
