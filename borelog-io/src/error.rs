//! Error types for borelog-io.

use thiserror::Error;

/// Result type alias for borelog-io operations.
pub type Result<T> = std::result::Result<T, Error>;

/// File-facing error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Core validation error (table shape, degenerate tiles).
    #[error(transparent)]
    Core(#[from] borelog_core::Error),
}
