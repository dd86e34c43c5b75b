use nalgebra::{DMatrix, DVector};

use super::ensure_square;
use crate::cfg::PIVOT_EPS;
use crate::error::{NumError, Result};

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    let n = ensure_square(a)?;
    if b.len() != n {
        return Err(NumError::DimensionMismatch {
            op: "solve",
            expected: n,
            found: b.len(),
        });
    }
    // Augmented [A | b].
    let mut m = DMatrix::<f64>::zeros(n, n + 1);
    m.view_mut((0, 0), (n, n)).copy_from(a);
    m.set_column(n, b);

    for col in 0..n {
        let mut piv_row = col;
        for r in col + 1..n {
            if m[(r, col)].abs() > m[(piv_row, col)].abs() {
                piv_row = r;
            }
        }
        m.swap_rows(col, piv_row);
        let pivot = m[(col, col)];
        if pivot.abs() < PIVOT_EPS {
            return Err(NumError::SingularMatrix { pivot, col });
        }
        for r in col + 1..n {
            let factor = m[(r, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                m[(r, k)] -= factor * m[(col, k)];
            }
        }
    }

    let mut x = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut s = m[(i, n)];
        for k in i + 1..n {
            s -= m[(i, k)] * x[k];
        }
        x[i] = s / m[(i, i)];
    }
    Ok(x)
}

/// Partial-pivoted LU factors: `(P A)[i] = A[perm[i]]` and `P A = L U`.
///
/// `L` is unit lower triangular; `perm` is an index array, not a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Lu {
    pub l: DMatrix<f64>,
    pub u: DMatrix<f64>,
    pub perm: Vec<usize>,
}

impl Lu {
    /// Solve `A x = b` with the stored factors (forward then back substitution).
    pub fn solve(&self, b: &DVector<f64>) -> Result<DVector<f64>> {
        let n = self.perm.len();
        if b.len() != n {
            return Err(NumError::DimensionMismatch {
                op: "lu_solve",
                expected: n,
                found: b.len(),
            });
        }
        let mut y = DVector::<f64>::zeros(n);
        for i in 0..n {
            let mut s = b[self.perm[i]];
            for k in 0..i {
                s -= self.l[(i, k)] * y[k];
            }
            y[i] = s;
        }
        let mut x = DVector::<f64>::zeros(n);
        for i in (0..n).rev() {
            let mut s = y[i];
            for k in i + 1..n {
                s -= self.u[(i, k)] * x[k];
            }
            x[i] = s / self.u[(i, i)];
        }
        Ok(x)
    }

    /// Number of transpositions in `perm`, via cycle decomposition.
    pub fn transpositions(&self) -> usize {
        let n = self.perm.len();
        let mut seen = vec![false; n];
        let mut swaps = 0;
        for start in 0..n {
            if seen[start] {
                continue;
            }
            let mut len = 0;
            let mut j = start;
            while !seen[j] {
                seen[j] = true;
                j = self.perm[j];
                len += 1;
            }
            swaps += len - 1;
        }
        swaps
    }
}

/// Doolittle LU with partial pivoting.
pub fn lu(a: &DMatrix<f64>) -> Result<Lu> {
    let n = ensure_square(a)?;
    let mut u = a.clone();
    let mut l = DMatrix::<f64>::zeros(n, n);
    let mut perm: Vec<usize> = (0..n).collect();

    for col in 0..n {
        let mut piv_row = col;
        for r in col + 1..n {
            if u[(r, col)].abs() > u[(piv_row, col)].abs() {
                piv_row = r;
            }
        }
        if piv_row != col {
            u.swap_rows(col, piv_row);
            perm.swap(col, piv_row);
            // Only the multipliers already computed move with the rows.
            for k in 0..col {
                let tmp = l[(col, k)];
                l[(col, k)] = l[(piv_row, k)];
                l[(piv_row, k)] = tmp;
            }
        }
        let pivot = u[(col, col)];
        if pivot.abs() < PIVOT_EPS {
            return Err(NumError::SingularMatrix { pivot, col });
        }
        for r in col + 1..n {
            let factor = u[(r, col)] / pivot;
            l[(r, col)] = factor;
            for k in col..n {
                u[(r, k)] -= factor * u[(col, k)];
            }
        }
    }
    for i in 0..n {
        l[(i, i)] = 1.0;
    }
    Ok(Lu { l, u, perm })
}

/// Inverse assembled column by column from LU solves against unit vectors.
pub fn inverse(a: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let f = lu(a)?;
    let n = f.perm.len();
    let mut inv = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        let mut e = DVector::<f64>::zeros(n);
        e[j] = 1.0;
        let col = f.solve(&e)?;
        inv.set_column(j, &col);
    }
    Ok(inv)
}

/// `det(A) = (-1)^swaps * prod(diag(U))`.
pub fn determinant(a: &DMatrix<f64>) -> Result<f64> {
    if a.nrows() == 0 && a.ncols() == 0 {
        return Ok(1.0);
    }
    let f = lu(a)?;
    let mut det: f64 = f.u.diagonal().iter().product();
    if f.transpositions() % 2 == 1 {
        det = -det;
    }
    Ok(det)
}

/// Triple-loop product `A B`.
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if a.ncols() != b.nrows() {
        return Err(NumError::DimensionMismatch {
            op: "multiply",
            expected: a.ncols(),
            found: b.nrows(),
        });
    }
    let mut out = DMatrix::<f64>::zeros(a.nrows(), b.ncols());
    for i in 0..a.nrows() {
        for j in 0..b.ncols() {
            let mut s = 0.0;
            for k in 0..a.ncols() {
                s += a[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = s;
        }
    }
    Ok(out)
}

pub fn transpose(a: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.ncols(), a.nrows(), |i, j| a[(j, i)])
}
