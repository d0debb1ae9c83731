//! Error type shared by every conversion.
//!
//! A failed conversion never returns a partial tensor, matrix or list.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("unsupported element type: {0}")]
    UnsupportedType(String),

    #[error("failed to allocate {bytes} bytes for tensor storage")]
    Allocation { bytes: usize },

    #[error("index {index:?} is out of bounds for shape {shape}")]
    IndexOutOfBounds { index: Vec<usize>, shape: String },

    #[error("invalid device: {0}")]
    InvalidDevice(String),
}

impl ConversionError {
    pub fn shape_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        ConversionError::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

#[cfg(feature = "python")]
impl From<ConversionError> for pyo3::PyErr {
    fn from(err: ConversionError) -> Self {
        use pyo3::exceptions::{PyIndexError, PyMemoryError, PyTypeError, PyValueError};

        match &err {
            ConversionError::ShapeMismatch { .. } | ConversionError::InvalidDevice(_) => {
                PyValueError::new_err(err.to_string())
            }
            ConversionError::UnsupportedType(_) => PyTypeError::new_err(err.to_string()),
            ConversionError::Allocation { .. } => PyMemoryError::new_err(err.to_string()),
            ConversionError::IndexOutOfBounds { .. } => PyIndexError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
