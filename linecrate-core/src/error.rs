//! Error types for linecrate

use thiserror::Error;

/// Main error type for linecrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Point index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for linecrate operations
pub type Result<T> = std::result::Result<T, Error>;
