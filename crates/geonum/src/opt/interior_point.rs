//! Log-barrier interior point method.
//!
//! Outer loop: `mu` starts at `cfg.mu0` and decays by `0.1` until `mu <= tol`.
//! Inner loop: Newton on `phi(x) = c'x - mu * sum(ln x_i)` with a diagonal
//! Hessian, damped by Armijo backtracking that also keeps `Ax <= b`.
//!
//! The barrier only covers `x > 0`; rows of `Ax <= b` are enforced by
//! rejecting trial points during the line search.

use nalgebra::{DMatrix, DVector};

use super::check_lp_shape;
use crate::cfg::{
    IPM_ARMIJO_C, IPM_CONSTRAINT_SLACK, IPM_INNER_MAX_ITER, IPM_MAX_BACKTRACK, IPM_MU_DECAY,
};
use crate::error::{NumError, Result};
use crate::linalg;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IpmCfg {
    /// Cap on outer (barrier) iterations.
    pub max_iter: usize,
    pub tol: f64,
    pub mu0: f64,
    /// Backtracking shrink factor in `(0, 1)`.
    pub beta: f64,
}

impl Default for IpmCfg {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tol: 1e-8,
            mu0: 1.0,
            beta: 0.5,
        }
    }
}

/// State after one outer iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct BarrierStep {
    pub mu: f64,
    /// `c'x` at the end of the inner loop.
    pub objective: f64,
    pub x: DVector<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IpmResult {
    pub x: DVector<f64>,
    pub objective: f64,
    pub iterations: usize,
    pub converged: bool,
    pub history: Vec<BarrierStep>,
}

/// `c'x - mu * sum(ln x_i)`, or `+inf` outside the positive orthant.
pub fn barrier_objective(c: &DVector<f64>, x: &DVector<f64>, mu: f64) -> f64 {
    if x.iter().any(|&xi| xi <= 0.0) {
        return f64::INFINITY;
    }
    c.dot(x) - mu * x.iter().map(|xi| xi.ln()).sum::<f64>()
}

fn feasible(a: &DMatrix<f64>, b: &DVector<f64>, x: &DVector<f64>, slack: f64) -> bool {
    x.iter().all(|&xi| xi > 0.0) && (a * x).iter().zip(b.iter()).all(|(ax, bi)| *ax <= bi + slack)
}

/// All ones, halved until `Ax <= b`.
fn starting_point(a: &DMatrix<f64>, b: &DVector<f64>) -> DVector<f64> {
    let mut x = DVector::from_element(a.ncols(), 1.0);
    for _ in 0..IPM_MAX_BACKTRACK {
        if feasible(a, b, &x, 0.0) {
            return x;
        }
        x *= 0.5;
    }
    tracing::warn!("no strictly feasible starting point found; continuing from a tiny x");
    x
}

/// Damped Newton steps on the barrier for a fixed `mu`. Returns the number of
/// inner iterations taken.
fn center(
    c: &DVector<f64>,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    x: &mut DVector<f64>,
    mu: f64,
    cfg: &IpmCfg,
) -> usize {
    for k in 0..IPM_INNER_MAX_ITER {
        let grad = DVector::from_fn(x.len(), |i, _| c[i] - mu / x[i]);
        let dx = DVector::from_fn(x.len(), |i, _| -grad[i] * x[i] * x[i] / mu);
        if dx.norm() < cfg.tol {
            return k;
        }
        let f0 = barrier_objective(c, x, mu);
        let slope = grad.dot(&dx);
        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..IPM_MAX_BACKTRACK {
            let trial = &*x + &dx * alpha;
            if feasible(a, b, &trial, IPM_CONSTRAINT_SLACK)
                && barrier_objective(c, &trial, mu) <= f0 + IPM_ARMIJO_C * alpha * slope
            {
                accepted = Some(trial);
                break;
            }
            alpha *= cfg.beta;
        }
        match accepted {
            Some(next) => *x = next,
            None => {
                tracing::trace!(mu, inner = k, "line search found no acceptable step");
                return k;
            }
        }
    }
    IPM_INNER_MAX_ITER
}

/// Minimize `c'x` subject to `Ax <= b`, `x >= 0`.
pub fn solve(
    c: &DVector<f64>,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    cfg: &IpmCfg,
) -> Result<IpmResult> {
    check_lp_shape("interior_point", c, a, b)?;
    tracing::debug!(vars = c.len(), rows = b.len(), ?cfg, "interior point");

    let mut x = starting_point(a, b);
    let mut mu = cfg.mu0;
    let mut history = Vec::new();
    let mut iterations = 0;
    while iterations < cfg.max_iter && mu > cfg.tol {
        let inner = center(c, a, b, &mut x, mu, cfg);
        let objective = c.dot(&x);
        tracing::trace!(iteration = iterations, mu, inner, objective, "barrier step");
        history.push(BarrierStep {
            mu,
            objective,
            x: x.clone(),
        });
        mu *= IPM_MU_DECAY;
        iterations += 1;
    }

    let converged = mu <= cfg.tol;
    let objective = c.dot(&x);
    if converged {
        tracing::debug!(iterations, objective, "interior point converged");
    } else {
        tracing::warn!(iterations, mu, objective, "interior point hit the iteration cap");
    }
    Ok(IpmResult {
        x,
        objective,
        iterations,
        converged,
        history,
    })
}

/// Solve the KKT system
///
/// ```text
/// [ H  A' ] [dx]   [-r_d]
/// [ A  0  ] [dy] = [-r_p]
/// ```
///
/// for diagonal `H = diag(h_diag)` through the Schur complement
/// `S = A H^-1 A'`. Not used by [`solve`], whose Hessian is diagonal and
/// whose constraints are handled by the line search.
pub fn solve_kkt(
    h_diag: &DVector<f64>,
    a: &DMatrix<f64>,
    r_d: &DVector<f64>,
    r_p: &DVector<f64>,
) -> Result<(DVector<f64>, DVector<f64>)> {
    check_lp_shape("solve_kkt", h_diag, a, r_p)?;
    if r_d.len() != a.ncols() {
        return Err(NumError::DimensionMismatch {
            op: "solve_kkt",
            expected: a.ncols(),
            found: r_d.len(),
        });
    }

    let h_inv = h_diag.map(|h| 1.0 / h);
    // A H^-1, column-scaled.
    let mut a_hinv = a.clone();
    for (j, mut col) in a_hinv.column_iter_mut().enumerate() {
        col *= h_inv[j];
    }
    let s = linalg::multiply(&a_hinv, &linalg::transpose(a))?;
    let rhs = r_p - &a_hinv * r_d;
    let dy = linalg::solve(&s, &rhs)?;
    let dx = (-r_d - a.transpose() * &dy).component_mul(&h_inv);
    Ok((dx, dy))
}
