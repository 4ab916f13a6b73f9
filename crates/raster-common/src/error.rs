//! Error types for precip-view.

use thiserror::Error;

/// Result type alias using ViewError.
pub type ViewResult<T> = Result<T, ViewError>;

/// Primary error type for viewer operations.
#[derive(Debug, Error)]
pub enum ViewError {
    // === Data validation ===
    #[error("Raster shape {width}x{height} does not match axes (x={x_len}, y={y_len})")]
    ShapeMismatch {
        width: usize,
        height: usize,
        x_len: usize,
        y_len: usize,
    },

    #[error("Axis is empty")]
    EmptyAxis,

    #[error("Axis values must be strictly increasing (violation at index {0})")]
    NonMonotonicAxis(usize),

    #[error("Invalid bin edges: {0}")]
    InvalidBinEdges(String),

    // === Loader errors ===
    #[error("Data not available for time: {0}")]
    NotFound(String),

    #[error("Failed to parse data: {0}")]
    FormatError(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),
}

// Conversion from common error types
impl From<std::io::Error> for ViewError {
    fn from(err: std::io::Error) -> Self {
        ViewError::DataReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::FormatError(format!("JSON error: {}", err))
    }
}
