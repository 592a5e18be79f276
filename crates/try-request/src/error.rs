//! Error types for request assembly

use thiserror::Error;

/// Result alias for assembly operations
pub type AssembleResult<T> = std::result::Result<T, AssembleError>;

/// Errors surfaced while turning an operation plus user values into a request
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Missing required parameter: {0}")]
    MissingRequiredParameter(String),

    #[error("Failed to serialize request body: {0}")]
    BodySerialization(#[from] serde_json::Error),
}
