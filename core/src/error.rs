//! Error types for core operations.
//!
//! Covers the failure modes of configuration loading and image handling.
//! Field validation has its own error type,
//! [`ValidationError`](crate::ValidationError), because callers match on the
//! offending field.

use thiserror::Error;

/// Errors that can occur while loading configuration or processing images.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Image decoding or encoding failure.
    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),
}

/// Convenience alias for results with [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
