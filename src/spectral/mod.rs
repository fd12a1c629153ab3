//! Spectral Filtering via Chebyshev Approximation
//!
//! Filters defined on a graph's eigenvalue interval `[0, λ_max]` are replaced
//! by truncated Chebyshev series, so a signal can be filtered with repeated
//! operator-vector products instead of an eigendecomposition.
//!
//! ## Pipeline
//!
//! ```text
//! FilterSpec ──► CoefficientEngine ──► ChebyshevCoefficients (K+1 × F)
//!                                              │
//!                      ┌───────────────────────┴──────────────────┐
//!                      ▼                                          ▼
//!            evaluate (points, F × P)                 filter (operator, N × F)
//!            Direct | Recursive                       three-term recurrence
//! ```
//!
//! ## Mathematical Background
//!
//! Chebyshev polynomials T_k(x) satisfy:
//! - T_0(x) = 1
//! - T_1(x) = x
//! - T_{k+1}(x) = 2x·T_k(x) - T_{k-1}(x)
//!
//! The interval `[0, λ_max]` is mapped onto `[-1, 1]` by `x' = 2x/λ_max - 1`;
//! for an operator the same map reads `L' = 2L/λ_max - I`.

mod approximation;
mod chebyshev;
mod coefficients;
mod evaluator;
mod operator;

pub use approximation::ChebyshevApproximation;
pub use chebyshev::{chebyshev_nodes, chebyshev_t};
pub use coefficients::{ChebyshevCoefficients, CoefficientEngine, FilterBank, FilterSpec, Kernel};
pub use evaluator::{evaluate_direct, evaluate_recursive, filter_recursive, EvalMethod};
pub use operator::{GraphOperator, RescaledOperator, SparseOperator};

use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::{ChebyshevError, Result};
use ndarray::{Array1, ArrayView1};

/// The interval `[0, λ_max]` holding a graph operator's spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralDomain {
    lambda_max: f64,
}

impl SpectralDomain {
    /// Create a domain, rejecting non-positive or non-finite bounds
    pub fn new(lambda_max: f64) -> Result<Self> {
        if !(lambda_max.is_finite() && lambda_max > 0.0) {
            return Err(ChebyshevError::invalid_domain(lambda_max));
        }
        Ok(Self { lambda_max })
    }

    /// Upper spectral bound
    pub fn lambda_max(&self) -> f64 {
        self.lambda_max
    }

    /// Whether `x` lies in `[0, λ_max]`
    pub fn contains(&self, x: f64) -> bool {
        (0.0..=self.lambda_max).contains(&x)
    }

    /// Map one point from `[0, λ_max]` to `[-1, 1]`
    #[inline]
    pub fn rescale(&self, x: f64) -> f64 {
        2.0 * x / self.lambda_max - 1.0
    }

    /// Map one point from `[-1, 1]` back to `[0, λ_max]`
    #[inline]
    pub fn unscale(&self, t: f64) -> f64 {
        (t + 1.0) * self.lambda_max / 2.0
    }

    /// Describe the points of `x` outside the domain, if any
    pub fn check(&self, x: ArrayView1<f64>) -> Option<Diagnostic> {
        let count = x.iter().filter(|&&v| !self.contains(v)).count();
        if count == 0 {
            return None;
        }
        let min = x.iter().copied().fold(f64::INFINITY, f64::min);
        let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Diagnostic::OutOfDomain {
            min,
            max,
            lambda_max: self.lambda_max,
            count,
        })
    }
}

/// Map evaluation points from `[0, λ_max]` onto `[-1, 1]`
///
/// Points outside the domain are still mapped (and later extrapolated), but a
/// [`Diagnostic::OutOfDomain`] is reported to `sink` first.
pub fn to_chebyshev_domain(
    x: ArrayView1<f64>,
    domain: &SpectralDomain,
    sink: &dyn DiagnosticsSink,
) -> Array1<f64> {
    if let Some(diagnostic) = domain.check(x) {
        sink.report(diagnostic);
    }
    x.mapv(|v| domain.rescale(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use ndarray::array;

    #[test]
    fn test_domain_rejects_bad_bounds() {
        assert!(SpectralDomain::new(2.0).is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SpectralDomain::new(bad),
                Err(ChebyshevError::InvalidDomain { .. })
            ));
        }
    }

    #[test]
    fn test_rescale_endpoints() {
        let domain = SpectralDomain::new(4.0).unwrap();
        assert_eq!(domain.rescale(0.0), -1.0);
        assert_eq!(domain.rescale(2.0), 0.0);
        assert_eq!(domain.rescale(4.0), 1.0);
        assert_eq!(domain.unscale(domain.rescale(3.0)), 3.0);
    }

    #[test]
    fn test_out_of_domain_is_reported() {
        let domain = SpectralDomain::new(2.0).unwrap();
        let sink = RecordingSink::new();

        let inside = to_chebyshev_domain(array![0.0, 1.0, 2.0].view(), &domain, &sink);
        assert_eq!(inside, array![-1.0, 0.0, 1.0]);
        assert!(sink.is_empty());

        let outside = to_chebyshev_domain(array![-0.5, 1.0, 3.0].view(), &domain, &sink);
        assert_eq!(outside, array![-1.5, 0.0, 2.0]);
        assert_eq!(
            sink.events(),
            vec![Diagnostic::OutOfDomain {
                min: -0.5,
                max: 3.0,
                lambda_max: 2.0,
                count: 2
            }]
        );
    }
}
