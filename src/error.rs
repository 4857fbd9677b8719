//! Error types for chart generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Everything that can go wrong between raw image bytes and an encoded chart.
///
/// Every failure is deterministic for a given input, so nothing here is retried.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Pixel data violates the grid preconditions (zero area, ragged rows,
    /// samples outside the byte range, NaN or infinite samples)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Palette or configuration cannot be used (empty palette, bad hex code, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Image could not be decoded or encoded
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// File system access failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Palette, config or cache JSON could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data URL or base64 payload is malformed
    #[error("Transport encoding error: {0}")]
    Transport(String),
}

impl ChartError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Attach the offending path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure was caused by what the caller sent rather than by
    /// the local setup. Front ends use this to pick a client or server error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ChartError::InvalidInput(_) | ChartError::Image(_) | ChartError::Transport(_)
        )
    }
}
