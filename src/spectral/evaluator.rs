//! Chebyshev Series Evaluation
//!
//! Two interchangeable algorithms for points already mapped to `[-1, 1]`:
//!
//! - **Direct**: `p(t) = Σ_k c_k cos(k·arccos t)`, closed form per term
//! - **Recursive**: three-term recurrence `T_k = 2t·T_{k-1} - T_{k-2}`
//!
//! Only the recurrence makes sense on an operator. There it is carried on
//! already-applied vectors `T_k(L')·s`, costing K operator applications and
//! four length-N buffers per signal column.

use super::chebyshev::chebyshev_t;
use super::operator::GraphOperator;
use crate::error::{ChebyshevError, Result};
use ndarray::{s, Array1, Array2, Array3, ArrayView1, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Algorithm used for scalar-point evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMethod {
    /// Closed-form cosine sum
    Direct,
    /// Three-term recurrence
    #[default]
    Recursive,
}

fn check_coefficients(coefficients: &ArrayView2<f64>) -> Result<()> {
    if coefficients.nrows() == 0 || coefficients.ncols() == 0 {
        return Err(ChebyshevError::EmptyCoefficients);
    }
    Ok(())
}

/// Evaluate every series at `t` via `cos(k·arccos t)`
///
/// Returns an `F × P` array. Points outside `[-1, 1]` use the hyperbolic
/// continuation of T_k.
pub fn evaluate_direct(coefficients: ArrayView2<f64>, t: ArrayView1<f64>) -> Result<Array2<f64>> {
    check_coefficients(&coefficients)?;
    let (order_rows, num_filters) = coefficients.dim();
    let mut result = Array2::zeros((num_filters, t.len()));

    for (p, &tp) in t.iter().enumerate() {
        for k in 0..order_rows {
            let t_k = chebyshev_t(k, tp);
            for f in 0..num_filters {
                result[[f, p]] += coefficients[[k, f]] * t_k;
            }
        }
    }
    Ok(result)
}

/// Evaluate every series at `t` via the three-term recurrence
///
/// Returns an `F × P` array.
pub fn evaluate_recursive(
    coefficients: ArrayView2<f64>,
    t: ArrayView1<f64>,
) -> Result<Array2<f64>> {
    check_coefficients(&coefficients)?;
    let (order_rows, num_filters) = coefficients.dim();
    let mut result = Array2::zeros((num_filters, t.len()));

    let mut t_prev = Array1::<f64>::ones(t.len());
    let mut t_curr = t.to_owned();
    let mut t_next = Array1::<f64>::zeros(t.len());

    accumulate_rows(&mut result, coefficients.row(0), &t_prev);
    if order_rows > 1 {
        accumulate_rows(&mut result, coefficients.row(1), &t_curr);
    }
    for k in 2..order_rows {
        Zip::from(&mut t_next)
            .and(&t)
            .and(&t_curr)
            .and(&t_prev)
            .for_each(|n, &x, &c, &p| *n = 2.0 * x * c - p);
        accumulate_rows(&mut result, coefficients.row(k), &t_next);

        std::mem::swap(&mut t_prev, &mut t_curr);
        std::mem::swap(&mut t_curr, &mut t_next);
    }
    Ok(result)
}

/// result[f, ..] += c[f] * term
fn accumulate_rows(result: &mut Array2<f64>, c: ArrayView1<f64>, term: &Array1<f64>) {
    for (mut row, &c_f) in result.rows_mut().into_iter().zip(c.iter()) {
        row.scaled_add(c_f, term);
    }
}

/// Apply every series to graph signals without forming powers of `op`
///
/// `op` must already be rescaled to `[-1, 1]` and `signals` has shape
/// `N × S`. Returns `N × S × F`. The recurrence vectors are shared by all
/// filters, so the cost is `K` applications of `op` per signal column.
pub fn filter_recursive<O>(
    coefficients: ArrayView2<f64>,
    op: &O,
    signals: ArrayView2<f64>,
) -> Result<Array3<f64>>
where
    O: GraphOperator + ?Sized,
{
    check_coefficients(&coefficients)?;
    let n = op.dim()?;
    let (rows, num_signals) = signals.dim();
    if rows != n {
        return Err(ChebyshevError::shape_mismatch("signal length", n, rows));
    }

    let num_filters = coefficients.ncols();
    let mut out = Array3::zeros((n, num_signals, num_filters));

    #[cfg(feature = "parallel")]
    let columns: Vec<Array2<f64>> = (0..num_signals)
        .into_par_iter()
        .map(|j| filter_column(coefficients, op, signals.column(j)))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let columns: Vec<Array2<f64>> = signals
        .columns()
        .into_iter()
        .map(|column| filter_column(coefficients, op, column))
        .collect();

    for (j, column) in columns.into_iter().enumerate() {
        out.slice_mut(s![.., j, ..]).assign(&column);
    }
    Ok(out)
}

/// Recurrence for one signal column; returns `N × F`
fn filter_column<O>(coefficients: ArrayView2<f64>, op: &O, signal: ArrayView1<f64>) -> Array2<f64>
where
    O: GraphOperator + ?Sized,
{
    let (order_rows, num_filters) = coefficients.dim();
    let n = signal.len();
    let mut out = Array2::zeros((n, num_filters));

    // T_0·s = s
    let mut t_prev = signal.to_owned();
    accumulate_columns(&mut out, coefficients.row(0), &t_prev);
    if order_rows == 1 {
        return out;
    }

    // T_1·s = L'·s
    let mut t_curr = Array1::zeros(n);
    op.apply(signal, t_curr.view_mut());
    accumulate_columns(&mut out, coefficients.row(1), &t_curr);

    // T_k·s = 2·L'·(T_{k-1}·s) - T_{k-2}·s
    let mut t_next = Array1::zeros(n);
    for k in 2..order_rows {
        op.apply(t_curr.view(), t_next.view_mut());
        Zip::from(&mut t_next)
            .and(&t_prev)
            .for_each(|next, &prev| *next = 2.0 * *next - prev);
        accumulate_columns(&mut out, coefficients.row(k), &t_next);

        std::mem::swap(&mut t_prev, &mut t_curr);
        std::mem::swap(&mut t_curr, &mut t_next);
    }
    out
}

/// out[.., f] += c[f] * term
fn accumulate_columns(out: &mut Array2<f64>, c: ArrayView1<f64>, term: &Array1<f64>) {
    for (mut col, &c_f) in out.columns_mut().into_iter().zip(c.iter()) {
        col.scaled_add(c_f, term);
    }
}
