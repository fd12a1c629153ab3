//! Chebyshev Approximation of a Filter Bank
//!
//! Built once per filter set, then reused for any number of evaluations and
//! filtering calls. Nothing inside is mutated after construction, so an
//! approximation can be shared across threads as-is.

use super::coefficients::{ChebyshevCoefficients, CoefficientEngine, FilterBank, FilterSpec};
use super::evaluator::{evaluate_direct, evaluate_recursive, filter_recursive, EvalMethod};
use super::operator::{GraphOperator, RescaledOperator};
use super::{to_chebyshev_domain, SpectralDomain};
use crate::config::ChebyshevConfig;
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::{ChebyshevError, Result};
use ndarray::{Array, Array2, Array3, ArrayView1, ArrayView2, Axis};
use std::sync::Arc;

/// Degree-K Chebyshev approximation of F filters on `[0, λ_max]`
#[derive(Debug, Clone)]
pub struct ChebyshevApproximation {
    coefficients: ChebyshevCoefficients,
    domain: SpectralDomain,
    method: EvalMethod,
    sink: Arc<dyn DiagnosticsSink>,
}

impl ChebyshevApproximation {
    /// Build from a filter spec with `order + 1` quadrature nodes
    ///
    /// # Errors
    ///
    /// [`ChebyshevError::InvalidDomain`] if `lambda_max <= 0`,
    /// [`ChebyshevError::ShapeMismatch`] if supplied coefficients disagree with
    /// `order` or their declared filter count, and
    /// [`ChebyshevError::EmptyCoefficients`] for an empty spec.
    pub fn new(spec: impl Into<FilterSpec>, order: usize, lambda_max: f64) -> Result<Self> {
        let coefficients = CoefficientEngine::new().build(spec.into(), order, lambda_max)?;
        Ok(Self::from_parts(coefficients, SpectralDomain::new(lambda_max)?))
    }

    /// Build with order, node count and default method taken from `config`
    pub fn from_config(
        spec: impl Into<FilterSpec>,
        config: &ChebyshevConfig,
        lambda_max: f64,
    ) -> Result<Self> {
        config.validate()?;
        let coefficients = CoefficientEngine::new()
            .with_num_nodes(config.num_nodes)
            .build(spec.into(), config.order, lambda_max)?;
        let domain = SpectralDomain::new(lambda_max)?;
        Ok(Self::from_parts(coefficients, domain).with_method(config.method))
    }

    fn from_parts(coefficients: ChebyshevCoefficients, domain: SpectralDomain) -> Self {
        Self {
            coefficients,
            domain,
            method: EvalMethod::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Route diagnostics to `sink` instead of the log
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Method used by [`Self::evaluate`]
    pub fn with_method(mut self, method: EvalMethod) -> Self {
        self.method = method;
        self
    }

    /// Polynomial order K
    pub fn order(&self) -> usize {
        self.coefficients.order()
    }

    /// Number of filters F
    pub fn num_filters(&self) -> usize {
        self.coefficients.num_filters()
    }

    /// Upper spectral bound
    pub fn lambda_max(&self) -> f64 {
        self.domain.lambda_max()
    }

    /// Spectral domain the filters are defined on
    pub fn domain(&self) -> &SpectralDomain {
        &self.domain
    }

    /// The `(K+1) × F` coefficients
    pub fn coefficients(&self) -> &ChebyshevCoefficients {
        &self.coefficients
    }

    /// Default evaluation method
    pub fn method(&self) -> EvalMethod {
        self.method
    }

    /// Evaluate all filters at points of `[0, λ_max]`; returns `F × P`
    pub fn evaluate(&self, x: ArrayView1<f64>) -> Result<Array2<f64>> {
        self.evaluate_with(x, self.method)
    }

    /// Evaluate all filters at points of `[0, λ_max]` with an explicit method
    ///
    /// Points outside the domain are extrapolated and reported to the sink.
    pub fn evaluate_with(&self, x: ArrayView1<f64>, method: EvalMethod) -> Result<Array2<f64>> {
        let t = to_chebyshev_domain(x, &self.domain, self.sink.as_ref());
        match method {
            EvalMethod::Direct => evaluate_direct(self.coefficients.view(), t.view()),
            EvalMethod::Recursive => evaluate_recursive(self.coefficients.view(), t.view()),
        }
    }

    /// Filter one graph signal of length N; returns `N × F`
    ///
    /// `op` is rescaled to `2L/λ_max - I` for this call only and the
    /// recurrence is always used.
    pub fn filter<O>(&self, op: &O, signal: ArrayView1<f64>) -> Result<Array2<f64>>
    where
        O: GraphOperator + ?Sized,
    {
        let out = self.filter_signals(op, signal.insert_axis(Axis(1)))?;
        Ok(out.index_axis_move(Axis(1), 0))
    }

    /// Filter `S` graph signals stacked as `N × S`; returns `N × S × F`
    pub fn filter_signals<O>(&self, op: &O, signals: ArrayView2<f64>) -> Result<Array3<f64>>
    where
        O: GraphOperator + ?Sized,
    {
        let rescaled = RescaledOperator::new(op, &self.domain)?;
        tracing::debug!(
            n = signals.nrows(),
            num_signals = signals.ncols(),
            order = self.order(),
            num_filters = self.num_filters(),
            "filtering graph signals"
        );
        filter_recursive(self.coefficients.view(), &rescaled, signals)
    }

    /// Largest absolute deviation from `bank` over `samples` uniform points of
    /// `[0, λ_max]`, one entry per filter
    pub fn max_error(&self, bank: &FilterBank, samples: usize) -> Result<Vec<f64>> {
        if bank.len() != self.num_filters() {
            return Err(ChebyshevError::shape_mismatch(
                "filter bank size",
                self.num_filters(),
                bank.len(),
            ));
        }
        if samples < 2 {
            return Err(ChebyshevError::invalid_parameter(
                "samples",
                "need at least 2 grid points",
            ));
        }

        let grid = Array::linspace(0.0, self.lambda_max(), samples);
        let approx = evaluate_recursive(
            self.coefficients.view(),
            grid.mapv(|x| self.domain.rescale(x)).view(),
        )?;

        Ok(bank
            .kernels()
            .zip(approx.rows())
            .map(|(kernel, row)| {
                grid.iter()
                    .zip(row.iter())
                    .map(|(&x, &p)| (kernel(x) - p).abs())
                    .fold(0.0, f64::max)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, RecordingSink};
    use crate::spectral::SparseOperator;
    use ndarray::array;

    #[test]
    fn test_linear_filter_reproduced() {
        let approx = ChebyshevApproximation::new(FilterBank::from_fn(|x| x), 5, 2.0).unwrap();
        let x = array![0.0, 1.0, 2.0];

        for method in [EvalMethod::Direct, EvalMethod::Recursive] {
            let y = approx.evaluate_with(x.view(), method).unwrap();
            assert_eq!(y.dim(), (1, 3));
            for (got, want) in y.iter().zip(x.iter()) {
                assert!((got - want).abs() < 1e-12, "{method:?}: {got} vs {want}");
            }
        }
    }

    #[test]
    fn test_constant_filter_on_diagonal_operator() {
        let op = SparseOperator::diagonal(&[0.0, 1.0, 2.0]);
        let signal = array![1.0, 1.0, 1.0];

        for order in [0, 1, 2, 7, 30] {
            let approx =
                ChebyshevApproximation::new(FilterBank::new().with_constant(1.0), order, 2.0)
                    .unwrap();
            let out = approx.filter(&op, signal.view()).unwrap();
            assert_eq!(out.dim(), (3, 1));
            for &v in out.iter() {
                assert!((v - 1.0).abs() < 1e-12, "order={order}, v={v}");
            }
        }
    }

    #[test]
    fn test_out_of_domain_warns_and_returns_finite() {
        let sink = Arc::new(RecordingSink::new());
        let approx = ChebyshevApproximation::new(FilterBank::new().with_heat(1.0), 10, 2.0)
            .unwrap()
            .with_sink(sink.clone());

        for method in [EvalMethod::Direct, EvalMethod::Recursive] {
            let y = approx.evaluate_with(array![3.0].view(), method).unwrap();
            assert!(y[[0, 0]].is_finite());
        }
        assert_eq!(sink.len(), 2);
        assert!(matches!(
            sink.events()[0],
            Diagnostic::OutOfDomain { count: 1, .. }
        ));
    }

    #[test]
    fn test_in_domain_is_silent() {
        let sink = Arc::new(RecordingSink::new());
        let approx = ChebyshevApproximation::new(FilterBank::new().with_heat(1.0), 10, 2.0)
            .unwrap()
            .with_sink(sink.clone());
        approx.evaluate(Array::linspace(0.0, 2.0, 11).view()).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = ChebyshevConfig::default()
            .with_order(12)
            .with_num_nodes(Some(64))
            .with_method(EvalMethod::Direct);
        let approx =
            ChebyshevApproximation::from_config(FilterBank::new().with_heat(0.5), &config, 4.0)
                .unwrap();
        assert_eq!(approx.order(), 12);
        assert_eq!(approx.method(), EvalMethod::Direct);
        assert_eq!(approx.lambda_max(), 4.0);
    }

    #[test]
    fn test_max_error_shrinks_with_order() {
        let bank = FilterBank::new().with_heat(2.0).with_low_pass(1.0);
        let low = ChebyshevApproximation::new(bank.clone(), 4, 2.0).unwrap();
        let high = ChebyshevApproximation::new(bank.clone(), 20, 2.0).unwrap();

        let e_low = low.max_error(&bank, 200).unwrap();
        let e_high = high.max_error(&bank, 200).unwrap();
        assert_eq!(e_low.len(), 2);
        for (lo, hi) in e_low.iter().zip(&e_high) {
            assert!(hi < lo, "order 20 error {hi} not below order 4 error {lo}");
        }
        assert!(e_high[0] < 1e-8);
    }

    #[test]
    fn test_max_error_rejects_other_bank() {
        let approx = ChebyshevApproximation::new(FilterBank::new().with_heat(1.0), 4, 2.0).unwrap();
        let other = FilterBank::new().with_heat(1.0).with_heat(2.0);
        assert!(approx.max_error(&other, 10).is_err());
    }

    #[test]
    fn test_filter_rejects_wrong_signal_length() {
        let approx = ChebyshevApproximation::new(FilterBank::new().with_heat(1.0), 4, 2.0).unwrap();
        let op = SparseOperator::diagonal(&[0.0, 1.0, 2.0]);
        assert!(matches!(
            approx.filter(&op, array![1.0, 2.0].view()),
            Err(ChebyshevError::ShapeMismatch { .. })
        ));
    }
}
