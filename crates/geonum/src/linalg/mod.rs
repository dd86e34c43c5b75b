//! Dense linear algebra on `DMatrix<f64>` storage.
//!
//! - `solve`: Gaussian elimination with partial pivoting.
//! - `lu`, `inverse`, `determinant`: partial-pivoted LU and its consumers.
//! - `multiply`, `transpose`: plain loops.
//! - `qr`, `eigenvalues`: classical Gram-Schmidt and unshifted QR iteration.
//!
//! Singularity is a hard stop: a pivot with `|p| < 1e-14` after the row swap
//! returns `NumError::SingularMatrix`.

mod dense;
mod qr;

pub use dense::{determinant, inverse, lu, multiply, solve, transpose, Lu};
pub use qr::{eigenvalues, eigenvalues_default, qr, Qr};

use crate::error::{NumError, Result};
use nalgebra::DMatrix;

#[inline]
pub(crate) fn ensure_square(a: &DMatrix<f64>) -> Result<usize> {
    if a.nrows() != a.ncols() {
        return Err(NumError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(a.nrows())
}

#[cfg(test)]
mod tests;
