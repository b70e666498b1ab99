//! Error types for reportfence.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised by the layers around the filter core.
///
/// Polygon mutations never fail; these come from configuration, parsing,
/// validation and store access.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    SerializationErrorWithContext(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
