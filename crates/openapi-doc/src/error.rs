//! Error types for document loading

use thiserror::Error;

/// Result type alias for loader operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Loader error types
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch OpenAPI document: {0}")]
    FetchError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}
