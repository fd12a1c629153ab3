//! Chebyshev Polynomials
//!
//! Closed-form evaluation of T_k and the first-kind Chebyshev nodes used as
//! quadrature points by the coefficient engine.

use std::f64::consts::PI;

/// Evaluate T_k(t) in closed form
///
/// Uses `cos(k·arccos t)` on `[-1, 1]` and the hyperbolic continuation
/// `cosh(k·arccosh |t|)` outside it, with `T_k(-t) = (-1)^k T_k(t)`.
/// NaN propagates.
#[inline]
pub fn chebyshev_t(k: usize, t: f64) -> f64 {
    let kf = k as f64;
    if t.abs() <= 1.0 {
        (kf * t.acos()).cos()
    } else if t > 1.0 {
        (kf * t.acosh()).cosh()
    } else {
        let v = (kf * (-t).acosh()).cosh();
        if k % 2 == 0 {
            v
        } else {
            -v
        }
    }
}

/// Angles θ_j = π(j + ½)/n of the first-kind Chebyshev nodes
pub fn node_angles(n: usize) -> Vec<f64> {
    (0..n)
        .map(|j| PI * (j as f64 + 0.5) / n as f64)
        .collect()
}

/// Chebyshev nodes for interpolation: x_j = cos((2j+1)π/(2n))
pub fn chebyshev_nodes(n: usize) -> Vec<f64> {
    node_angles(n).into_iter().map(f64::cos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference T_k by recurrence
    fn t_recurrence(k: usize, x: f64) -> f64 {
        let (mut t_prev, mut t_curr) = (1.0, x);
        if k == 0 {
            return t_prev;
        }
        for _ in 1..k {
            let t_next = 2.0 * x * t_curr - t_prev;
            t_prev = t_curr;
            t_curr = t_next;
        }
        t_curr
    }

    #[test]
    fn test_low_degrees() {
        let x = 0.5;
        assert!((chebyshev_t(0, x) - 1.0).abs() < 1e-12);
        assert!((chebyshev_t(1, x) - x).abs() < 1e-12);
        assert!((chebyshev_t(2, x) - (2.0 * x * x - 1.0)).abs() < 1e-12);
        assert!((chebyshev_t(3, x) - (4.0 * x.powi(3) - 3.0 * x)).abs() < 1e-12);
    }

    #[test]
    fn test_matches_recurrence_inside_and_outside() {
        let xs = [-1.7, -1.0, -0.75, -0.1, 0.0, 0.1, 0.75, 1.0, 1.3, 2.0];
        for k in 0..12 {
            for &x in &xs {
                let closed = chebyshev_t(k, x);
                let rec = t_recurrence(k, x);
                let tol = 1e-9 * rec.abs().max(1.0);
                assert!(
                    (closed - rec).abs() <= tol,
                    "k={k}, x={x}, closed={closed}, recurrence={rec}"
                );
            }
        }
    }

    #[test]
    fn test_chebyshev_nodes() {
        let nodes = chebyshev_nodes(4);
        assert_eq!(nodes.len(), 4);

        for &x in &nodes {
            assert!(x > -1.0 && x < 1.0);
        }
        // Nodes are the roots of T_n
        for &x in &nodes {
            assert!(chebyshev_t(4, x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_nodes() {
        assert!(chebyshev_nodes(0).is_empty());
    }
}
