//! # RuVector Chebyshev
//!
//! Spectral graph filters approximated by truncated Chebyshev series, so graph
//! signals can be filtered without an eigendecomposition.
//!
//! ## Modules
//!
//! - **Spectral**: coefficient engine, direct/recursive evaluators, operator rescaling
//! - **Config**: serializable approximation parameters
//! - **Diagnostics**: injectable sinks for non-fatal out-of-domain events
//!
//! ## Cost
//!
//! Filtering a signal with a degree-K approximation costs K applications of
//! the graph operator, i.e. `O(K·nnz)` time and four length-N buffers, versus
//! `O(N³)` for an exact eigenbasis filter.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::array;
//! use ruvector_chebyshev::{ChebyshevApproximation, EvalMethod, FilterBank, SparseOperator};
//!
//! // Heat kernel exp(-λ) on a graph whose spectrum lies in [0, 2]
//! let bank = FilterBank::new().with_heat(1.0);
//! let approx = ChebyshevApproximation::new(bank, 20, 2.0).unwrap();
//!
//! // Response curve at a few eigenvalues (1 filter × 3 points)
//! let curve = approx
//!     .evaluate_with(array![0.0, 1.0, 2.0].view(), EvalMethod::Direct)
//!     .unwrap();
//! assert!((curve[[0, 1]] - (-1.0f64).exp()).abs() < 1e-10);
//!
//! // Matrix-free filtering of a signal (3 vertices × 1 filter)
//! let laplacian = SparseOperator::diagonal(&[0.0, 1.0, 2.0]);
//! let filtered = approx.filter(&laplacian, array![1.0, 1.0, 1.0].view()).unwrap();
//! assert_eq!(filtered.dim(), (3, 1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod spectral;

pub use config::ChebyshevConfig;
pub use diagnostics::{Diagnostic, DiagnosticsSink, NullSink, RecordingSink, TracingSink};
pub use error::{ChebyshevError, Result};
pub use spectral::{
    ChebyshevApproximation, ChebyshevCoefficients, CoefficientEngine, EvalMethod, FilterBank,
    FilterSpec, GraphOperator, RescaledOperator, SparseOperator, SpectralDomain,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::diagnostics::*;
    pub use crate::error::*;
    pub use crate::spectral::*;
}
