//! Dense tableau simplex for `min c'x  s.t.  Ax <= b, x >= 0` with `b >= 0`.
//!
//! Tableau layout, `m` constraints and `n` variables:
//!
//! ```text
//! rows 0..m : [ A | I | b ]
//! row  m    : [ c | 0 | 0 ]
//! ```
//!
//! The slack basis is feasible because `b >= 0`, so no phase one is needed.
//! The objective row's right-hand side holds `-c'x` as pivots proceed.

use nalgebra::{DMatrix, DVector};

use super::check_lp_shape;
use crate::cfg::{SIMPLEX_MAX_ITER, SIMPLEX_PIVOT_EPS};
use crate::error::{NumError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimplexStatus {
    Optimal,
    Unbounded,
    IterationLimit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimplexResult {
    pub status: SimplexStatus,
    pub x: DVector<f64>,
    /// `c'x`; `-inf` when unbounded.
    pub objective: f64,
    pub iterations: usize,
    /// Basic column per constraint row. Columns `>= n` are slacks.
    pub basis: Vec<usize>,
}

struct Tableau {
    t: DMatrix<f64>,
    basis: Vec<usize>,
    m: usize,
    n: usize,
}

impl Tableau {
    fn new(c: &DVector<f64>, a: &DMatrix<f64>, b: &DVector<f64>) -> Self {
        let (m, n) = a.shape();
        let mut t = DMatrix::<f64>::zeros(m + 1, n + m + 1);
        t.view_mut((0, 0), (m, n)).copy_from(a);
        for i in 0..m {
            t[(i, n + i)] = 1.0;
            t[(i, n + m)] = b[i];
        }
        for j in 0..n {
            t[(m, j)] = c[j];
        }
        Self {
            t,
            basis: (n..n + m).collect(),
            m,
            n,
        }
    }

    #[inline]
    fn rhs(&self) -> usize {
        self.n + self.m
    }

    /// Most negative reduced cost; the first one wins ties.
    fn entering(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for j in 0..self.rhs() {
            let v = self.t[(self.m, j)];
            if v < -SIMPLEX_PIVOT_EPS && best.is_none_or(|(_, b)| v < b) {
                best = Some((j, v));
            }
        }
        best.map(|(j, _)| j)
    }

    /// Minimum-ratio row over entries `> SIMPLEX_PIVOT_EPS`.
    fn leaving(&self, col: usize) -> Option<usize> {
        let rhs = self.rhs();
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.m {
            let e = self.t[(i, col)];
            if e > SIMPLEX_PIVOT_EPS {
                let ratio = self.t[(i, rhs)] / e;
                if best.is_none_or(|(_, r)| ratio < r) {
                    best = Some((i, ratio));
                }
            }
        }
        best.map(|(i, _)| i)
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let width = self.t.ncols();
        let p = self.t[(row, col)];
        for j in 0..width {
            self.t[(row, j)] /= p;
        }
        for i in 0..=self.m {
            let f = self.t[(i, col)];
            if i == row || f == 0.0 {
                continue;
            }
            for j in 0..width {
                self.t[(i, j)] -= f * self.t[(row, j)];
            }
        }
        self.basis[row] = col;
    }

    fn solution(&self) -> DVector<f64> {
        let rhs = self.rhs();
        let mut x = DVector::zeros(self.n);
        for (i, &col) in self.basis.iter().enumerate() {
            if col < self.n {
                x[col] = self.t[(i, rhs)];
            }
        }
        x
    }

    fn objective(&self) -> f64 {
        -self.t[(self.m, self.rhs())]
    }
}

/// Minimize `c'x` subject to `Ax <= b`, `x >= 0`. Every `b_i` must be
/// non-negative.
pub fn solve(c: &DVector<f64>, a: &DMatrix<f64>, b: &DVector<f64>) -> Result<SimplexResult> {
    check_lp_shape("simplex", c, a, b)?;
    if let Some((row, &value)) = b.iter().enumerate().find(|(_, v)| **v < 0.0) {
        return Err(NumError::NegativeRhs { row, value });
    }
    tracing::debug!(vars = a.ncols(), rows = a.nrows(), "simplex");

    let mut tab = Tableau::new(c, a, b);
    let mut iterations = 0;
    let status = loop {
        if iterations >= SIMPLEX_MAX_ITER {
            break SimplexStatus::IterationLimit;
        }
        let Some(col) = tab.entering() else {
            break SimplexStatus::Optimal;
        };
        let Some(row) = tab.leaving(col) else {
            break SimplexStatus::Unbounded;
        };
        tracing::trace!(iteration = iterations, row, col, "pivot");
        tab.pivot(row, col);
        iterations += 1;
    };

    let objective = match status {
        SimplexStatus::Unbounded => f64::NEG_INFINITY,
        _ => tab.objective(),
    };
    match status {
        SimplexStatus::Optimal => tracing::debug!(iterations, objective, "simplex optimal"),
        _ => tracing::warn!(?status, iterations, "simplex stopped without an optimum"),
    }
    Ok(SimplexResult {
        status,
        x: tab.solution(),
        objective,
        iterations,
        basis: tab.basis,
    })
}

/// Dual simplex entry point. Not available; always returns
/// `NumError::NotImplemented`.
pub fn dual_simplex(
    _c: &DVector<f64>,
    _a: &DMatrix<f64>,
    _b: &DVector<f64>,
) -> Result<SimplexResult> {
    Err(NumError::NotImplemented("dual simplex"))
}
