//! Error types for hue-sort.

use thiserror::Error;

/// Errors produced while building inputs for classification or organizing files.
///
/// Classification itself never fails: once a [`PixelGrid`](crate::PixelGrid)
/// exists, every outcome is a [`Reason`](crate::Reason).
#[derive(Debug, Error)]
pub enum SortError {
    /// Width or height was zero when creating a pixel grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A pixel buffer did not match the declared grid size.
    #[error("dimension mismatch: expected {expected} pixels, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A configuration value was out of range.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter { name: String, value: String },

    /// An image file could not be opened or decoded.
    #[error("failed to load image {path}: {message}")]
    ImageLoad { path: String, message: String },

    /// A file system operation failed.
    #[error("{0}")]
    Io(String),
}

impl SortError {
    /// Shorthand for [`SortError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
        }
    }
}
