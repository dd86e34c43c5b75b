//! Scalar root finding: Newton-Raphson, bisection, secant, Brent.
//!
//! All solvers share `RootCfg { tol, max_iter }` and return `RootResult`.
//! Non-convergence is a soft failure: `converged = false` plus a
//! `FailReason`, never an `Err`.

mod solvers;

pub use solvers::{bisection, brent, newton_raphson, secant};

/// Tolerance and iteration cap shared by all root finders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootCfg {
    pub tol: f64,
    pub max_iter: usize,
}

impl Default for RootCfg {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iter: 100,
        }
    }
}

/// Why a root finder stopped without converging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailReason {
    /// `|f'(x)| < 1e-14` at an iterate (Newton).
    DerivativeZero,
    /// Bracket endpoints have the same sign (bisection, Brent).
    SameSign,
    /// `|f(x_k) - f(x_{k-1})| < 1e-14` (secant).
    DivisionByZero,
    MaxIterations,
}

/// One recorded iterate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootStep {
    pub x: f64,
    pub fx: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootResult {
    pub x: f64,
    pub converged: bool,
    pub reason: Option<FailReason>,
    pub iterations: usize,
    pub history: Vec<RootStep>,
}

impl RootResult {
    fn ok(x: f64, iterations: usize, history: Vec<RootStep>) -> Self {
        Self {
            x,
            converged: true,
            reason: None,
            iterations,
            history,
        }
    }

    fn fail(x: f64, reason: FailReason, iterations: usize, history: Vec<RootStep>) -> Self {
        tracing::warn!(?reason, x, iterations, "root finder did not converge");
        Self {
            x,
            converged: false,
            reason: Some(reason),
            iterations,
            history,
        }
    }
}

#[cfg(test)]
mod tests;
