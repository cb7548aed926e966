//! # Error Types
//!
//! Custom error types for Road Risk Live using `thiserror`.

use thiserror::Error;

/// Main error type for Road Risk Live
#[derive(Debug, Error)]
pub enum RoadRiskError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sensor log could not be read as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A sensor field held a value that is not a number
    #[error("Invalid value for '{field}': {value:?}")]
    Parse {
        field: &'static str,
        value: String,
    },

    /// Transport-level HTTP failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("Remote returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },
}

/// Result type alias for Road Risk Live
pub type Result<T> = std::result::Result<T, RoadRiskError>;
