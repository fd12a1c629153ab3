//! Error types for ruvector-chebyshev
//!
//! Every failure here is caller misuse detected synchronously at construction
//! or evaluation time. Nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ruvector-chebyshev operations
pub type Result<T> = std::result::Result<T, ChebyshevError>;

/// Errors that can occur while building or evaluating a Chebyshev approximation
#[derive(Error, Debug)]
pub enum ChebyshevError {
    /// Spectral bound is not a positive finite number
    #[error("Invalid spectral domain: lambda_max must be positive and finite, got {lambda_max}")]
    InvalidDomain {
        /// The rejected upper bound
        lambda_max: f64,
    },

    /// Array or operator shape inconsistent with the declared layout
    #[error("Shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// What was being checked
        context: String,
        /// Expected extent
        expected: usize,
        /// Actual extent
        got: usize,
    },

    /// Coefficient series with no rows or no filters
    #[error("Empty coefficient series")]
    EmptyCoefficients,

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Config file could not be read or written
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file contents could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChebyshevError {
    /// Create an invalid domain error
    pub fn invalid_domain(lambda_max: f64) -> Self {
        Self::InvalidDomain { lambda_max }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            got,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
