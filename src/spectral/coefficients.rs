//! Chebyshev Coefficient Engine
//!
//! Turns a set of filter kernels on `[0, λ_max]` into a `(K+1) × F` array of
//! Chebyshev coefficients, or validates a coefficient array supplied as-is.
//!
//! Coefficients are computed with the DCT formula at `N_s` first-kind nodes:
//!
//! ```text
//! c_k = (2/N_s) Σ_j f(x_j) cos(k θ_j),   θ_j = π(j + ½)/N_s
//! ```
//!
//! and `c_0` is halved before storage, so every stored series is summed
//! directly as `p(t) = Σ_k c_k T_k(t)`.

use super::chebyshev::node_angles;
use super::SpectralDomain;
use crate::error::{ChebyshevError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Scalar filter response on the native domain `[0, λ_max]`
pub type Kernel = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Dense Chebyshev coefficients, row `k` holding the degree-`k` term of every filter
///
/// Immutable once built; `c_0` is stored already halved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<f64>", into = "Array2<f64>")]
pub struct ChebyshevCoefficients {
    values: Array2<f64>,
}

impl ChebyshevCoefficients {
    /// Validate a caller-supplied array against the declared order and filter count
    pub fn from_array(values: Array2<f64>, order: usize, num_filters: usize) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows == 0 || cols == 0 {
            return Err(ChebyshevError::EmptyCoefficients);
        }
        if rows != order + 1 {
            return Err(ChebyshevError::shape_mismatch(
                "coefficient rows (order + 1)",
                order + 1,
                rows,
            ));
        }
        if cols != num_filters {
            return Err(ChebyshevError::shape_mismatch(
                "coefficient columns (filters)",
                num_filters,
                cols,
            ));
        }
        Ok(Self { values })
    }

    /// Polynomial order K (rows - 1)
    pub fn order(&self) -> usize {
        self.values.nrows() - 1
    }

    /// Number of filters F
    pub fn num_filters(&self) -> usize {
        self.values.ncols()
    }

    /// The `(K+1) × F` array
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Coefficients of one filter, degree 0 first
    pub fn filter(&self, f: usize) -> ArrayView1<'_, f64> {
        self.values.column(f)
    }

    /// Coefficient of degree `k` for filter `f`
    pub fn get(&self, k: usize, f: usize) -> Option<f64> {
        self.values.get((k, f)).copied()
    }

    /// Consume into the raw array
    pub fn into_array(self) -> Array2<f64> {
        self.values
    }
}

impl TryFrom<Array2<f64>> for ChebyshevCoefficients {
    type Error = ChebyshevError;

    fn try_from(values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows == 0 {
            return Err(ChebyshevError::EmptyCoefficients);
        }
        Self::from_array(values, rows - 1, cols)
    }
}

impl From<ChebyshevCoefficients> for Array2<f64> {
    fn from(coefficients: ChebyshevCoefficients) -> Self {
        coefficients.values
    }
}

/// Ordered set of filter kernels
#[derive(Clone, Default)]
pub struct FilterBank {
    kernels: Vec<Kernel>,
}

impl fmt::Debug for FilterBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBank")
            .field("num_filters", &self.kernels.len())
            .finish()
    }
}

impl FilterBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank holding a single kernel
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new().with_fn(f)
    }

    /// Append an arbitrary kernel
    pub fn with_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.kernels.push(Arc::new(f));
        self
    }

    /// Append an already shared kernel
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernels.push(kernel);
        self
    }

    /// Append a constant response
    pub fn with_constant(self, value: f64) -> Self {
        self.with_fn(move |_| value)
    }

    /// Append heat diffusion: exp(-t·λ)
    pub fn with_heat(self, time: f64) -> Self {
        self.with_fn(move |lambda| (-time * lambda).clamp(-700.0, 700.0).exp())
    }

    /// Append one heat kernel per diffusion time
    pub fn with_heat_scales(self, times: &[f64]) -> Self {
        times.iter().fold(self, |bank, &t| bank.with_heat(t))
    }

    /// Append a smooth low-pass gate around `cutoff`
    pub fn with_low_pass(self, cutoff: f64) -> Self {
        let steepness = 5.0 / cutoff.max(0.1);
        self.with_fn(move |lambda| logistic(steepness * (lambda - cutoff)))
    }

    /// Append a smooth high-pass gate around `cutoff`
    pub fn with_high_pass(self, cutoff: f64) -> Self {
        let steepness = 5.0 / cutoff.max(0.1);
        self.with_fn(move |lambda| logistic(steepness * (cutoff - lambda)))
    }

    /// Append a smooth band-pass gate on `[low, high]`
    pub fn with_band_pass(self, low: f64, high: f64) -> Self {
        let steepness = 5.0;
        self.with_fn(move |lambda| {
            logistic(steepness * (low - lambda)) * logistic(steepness * (lambda - high))
        })
    }

    /// Number of filters
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// True when the bank holds no filter
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Evaluate filter `f` at `lambda`
    pub fn eval(&self, f: usize, lambda: f64) -> Option<f64> {
        self.kernels.get(f).map(|k| k(lambda))
    }

    /// Iterate over the kernels
    pub fn kernels(&self) -> impl Iterator<Item = &Kernel> {
        self.kernels.iter()
    }
}

/// 1 / (1 + e^z), clamped against overflow
#[inline]
fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + z.clamp(-700.0, 700.0).exp())
}

/// What a Chebyshev approximation is built from
#[derive(Debug, Clone)]
pub enum FilterSpec {
    /// Kernels sampled at Chebyshev nodes
    Functions(FilterBank),
    /// Precomputed coefficients, taken as-is on the same domain convention
    Coefficients {
        /// `(order + 1) × num_filters` array
        values: Array2<f64>,
        /// Declared filter count
        num_filters: usize,
    },
}

impl FilterSpec {
    /// Precomputed coefficients whose filter count is their column count
    pub fn coefficients(values: Array2<f64>) -> Self {
        let num_filters = values.ncols();
        Self::Coefficients {
            values,
            num_filters,
        }
    }

    /// Declared number of filters
    pub fn num_filters(&self) -> usize {
        match self {
            Self::Functions(bank) => bank.len(),
            Self::Coefficients { num_filters, .. } => *num_filters,
        }
    }
}

impl From<FilterBank> for FilterSpec {
    fn from(bank: FilterBank) -> Self {
        Self::Functions(bank)
    }
}

/// Computes Chebyshev coefficients from a [`FilterSpec`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoefficientEngine {
    num_nodes: Option<usize>,
}

impl CoefficientEngine {
    /// Engine sampling `order + 1` nodes
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample a fixed number of nodes instead of `order + 1`
    pub fn with_num_nodes(mut self, num_nodes: Option<usize>) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    /// Build coefficients for `spec` at the given order on `[0, lambda_max]`
    pub fn build(
        &self,
        spec: FilterSpec,
        order: usize,
        lambda_max: f64,
    ) -> Result<ChebyshevCoefficients> {
        let domain = SpectralDomain::new(lambda_max)?;
        match spec {
            FilterSpec::Functions(bank) => self.fit(&bank, order, &domain),
            FilterSpec::Coefficients {
                values,
                num_filters,
            } => ChebyshevCoefficients::from_array(values, order, num_filters),
        }
    }

    /// Sample every kernel of `bank` and project it on T_0..T_order
    pub fn fit(
        &self,
        bank: &FilterBank,
        order: usize,
        domain: &SpectralDomain,
    ) -> Result<ChebyshevCoefficients> {
        if bank.is_empty() {
            return Err(ChebyshevError::EmptyCoefficients);
        }
        let n = self.num_nodes.unwrap_or(order + 1);
        if n < order + 1 {
            return Err(ChebyshevError::invalid_parameter(
                "num_nodes",
                format!("{n} nodes cannot resolve order {order}, need at least {}", order + 1),
            ));
        }

        let thetas = node_angles(n);
        let lambdas: Vec<f64> = thetas.iter().map(|&th| domain.unscale(th.cos())).collect();

        let mut values = Array2::zeros((order + 1, bank.len()));
        let scale = 2.0 / n as f64;

        for (f, kernel) in bank.kernels().enumerate() {
            let samples: Vec<f64> = lambdas.iter().map(|&lambda| kernel(lambda)).collect();
            for k in 0..=order {
                let c_k: f64 = samples
                    .iter()
                    .zip(&thetas)
                    .map(|(&f_j, &th)| f_j * (k as f64 * th).cos())
                    .sum();
                values[[k, f]] = scale * c_k;
            }
            values[[0, f]] *= 0.5;
        }

        tracing::debug!(
            order,
            num_filters = bank.len(),
            num_nodes = n,
            lambda_max = domain.lambda_max(),
            "computed Chebyshev coefficients"
        );

        ChebyshevCoefficients::from_array(values, order, bank.len())
    }
}
