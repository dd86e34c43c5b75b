use nalgebra::{DMatrix, DVector};

use super::{ensure_square, multiply};
use crate::cfg::{EIGEN_MAX_ITER, EIGEN_OFFDIAG_EPS};
use crate::error::Result;

/// Thin QR factors: `Q` is `m×n` with orthonormal columns, `R` is `n×n` upper triangular.
#[derive(Clone, Debug, PartialEq)]
pub struct Qr {
    pub q: DMatrix<f64>,
    pub r: DMatrix<f64>,
}

/// Classical (non-modified) Gram-Schmidt.
///
/// Accuracy caveat: orthogonality of `Q` degrades for ill-conditioned columns.
/// A column that is (numerically) dependent on earlier ones yields a zero
/// column in `Q` and a zero on `R`'s diagonal.
pub fn qr(a: &DMatrix<f64>) -> Qr {
    let (m, n) = a.shape();
    let mut q = DMatrix::<f64>::zeros(m, n);
    let mut r = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        let mut v: DVector<f64> = a.column(j).into_owned();
        for i in 0..j {
            // Project the original column, not the running residual.
            let rij = q.column(i).dot(&a.column(j));
            r[(i, j)] = rij;
            v -= q.column(i) * rij;
        }
        let norm = v.norm();
        r[(j, j)] = norm;
        if norm > 0.0 {
            q.set_column(j, &(v / norm));
        }
    }
    Qr { q, r }
}

/// Eigenvalues by unshifted QR iteration `A_{k+1} = R_k Q_k`.
///
/// Returns the diagonal of the last iterate. Converges for symmetric and
/// otherwise well-behaved inputs; no shifts or deflation are attempted, and
/// non-convergence after `max_iter` steps is not reported.
pub fn eigenvalues(a: &DMatrix<f64>, max_iter: usize) -> Result<DVector<f64>> {
    let n = ensure_square(a)?;
    let mut ak = a.clone();
    for k in 0..max_iter {
        let Qr { q, r } = qr(&ak);
        ak = multiply(&r, &q)?;
        let mut off = 0.0;
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    off += ak[(i, j)] * ak[(i, j)];
                }
            }
        }
        if off < EIGEN_OFFDIAG_EPS {
            tracing::trace!(iterations = k + 1, off, "qr iteration converged");
            break;
        }
    }
    Ok(ak.diagonal())
}

/// `eigenvalues` with the default 100-iteration cap.
#[inline]
pub fn eigenvalues_default(a: &DMatrix<f64>) -> Result<DVector<f64>> {
    eigenvalues(a, EIGEN_MAX_ITER)
}
