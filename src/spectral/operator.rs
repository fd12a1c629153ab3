//! Graph Operators
//!
//! The filtering path only ever needs `y = L x`, so graph operators are
//! consumed through [`GraphOperator`] and never materialised as powers.

use super::SpectralDomain;
use crate::error::{ChebyshevError, Result};
use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Zip};

/// A linear operator on graph signals (typically a Laplacian)
pub trait GraphOperator: Sync {
    /// `(rows, cols)` of the operator
    fn shape(&self) -> (usize, usize);

    /// Overwrite `y` with `L x`
    ///
    /// Callers guarantee `x.len() == cols` and `y.len() == rows`.
    fn apply(&self, x: ArrayView1<f64>, y: ArrayViewMut1<f64>);

    /// Number of vertices N, failing for non-square operators
    fn dim(&self) -> Result<usize> {
        let (rows, cols) = self.shape();
        if rows != cols {
            return Err(ChebyshevError::shape_mismatch("square operator", rows, cols));
        }
        Ok(rows)
    }
}

impl<O: GraphOperator + ?Sized> GraphOperator for &O {
    fn shape(&self) -> (usize, usize) {
        (**self).shape()
    }

    fn apply(&self, x: ArrayView1<f64>, y: ArrayViewMut1<f64>) {
        (**self).apply(x, y)
    }
}

impl GraphOperator for Array2<f64> {
    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    fn apply(&self, x: ArrayView1<f64>, mut y: ArrayViewMut1<f64>) {
        general_mat_vec_mul(1.0, self, &x, 0.0, &mut y);
    }
}

/// Sparse operator in coordinate form
#[derive(Debug, Clone, PartialEq)]
pub struct SparseOperator {
    /// Sparse representation: (row, col, value)
    entries: Vec<(usize, usize, f64)>,
    /// Matrix dimension
    n: usize,
}

impl SparseOperator {
    /// Build an `n × n` operator from triplets; duplicates are summed on apply
    pub fn from_triplets(n: usize, entries: Vec<(usize, usize, f64)>) -> Result<Self> {
        if let Some(&(i, j, _)) = entries.iter().find(|&&(i, j, _)| i >= n || j >= n) {
            return Err(ChebyshevError::shape_mismatch(
                format!("sparse entry ({i}, {j}) within operator"),
                n,
                i.max(j) + 1,
            ));
        }
        Ok(Self { entries, n })
    }

    /// Keep the non-zero entries of a dense square matrix
    pub fn from_dense(matrix: ArrayView2<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(ChebyshevError::shape_mismatch("square operator", rows, cols));
        }
        let entries = matrix
            .indexed_iter()
            .filter(|(_, &v)| v != 0.0)
            .map(|((i, j), &v)| (i, j, v))
            .collect();
        Ok(Self { entries, n: rows })
    }

    /// Diagonal operator
    pub fn diagonal(values: &[f64]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, i, v))
            .collect();
        Self {
            entries,
            n: values.len(),
        }
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Stored triplets
    pub fn entries(&self) -> &[(usize, usize, f64)] {
        &self.entries
    }
}

impl GraphOperator for SparseOperator {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn apply(&self, x: ArrayView1<f64>, mut y: ArrayViewMut1<f64>) {
        y.fill(0.0);
        for &(i, j, v) in &self.entries {
            y[i] += v * x[j];
        }
    }
}

/// `L' = 2L/λ_max - I`, applied lazily on top of a borrowed operator
///
/// The spectrum of `L'` lies in `[-1, 1]` whenever that of `L` lies in
/// `[0, λ_max]`.
#[derive(Debug, Clone, Copy)]
pub struct RescaledOperator<'a, O: ?Sized> {
    inner: &'a O,
    scale: f64,
    n: usize,
}

impl<'a, O: GraphOperator + ?Sized> RescaledOperator<'a, O> {
    /// Wrap `inner`, which must be square
    pub fn new(inner: &'a O, domain: &SpectralDomain) -> Result<Self> {
        let n = inner.dim()?;
        Ok(Self {
            inner,
            scale: 2.0 / domain.lambda_max(),
            n,
        })
    }
}

impl<O: GraphOperator + ?Sized> GraphOperator for RescaledOperator<'_, O> {
    fn shape(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn apply(&self, x: ArrayView1<f64>, mut y: ArrayViewMut1<f64>) {
        self.inner.apply(x, y.view_mut());
        let scale = self.scale;
        Zip::from(&mut y).and(&x).for_each(|yi, &xi| *yi = scale * *yi - xi);
    }
}
