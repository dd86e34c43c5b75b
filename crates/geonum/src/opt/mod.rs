//! Linear programs `min c'x  s.t.  Ax <= b, x >= 0`.
//!
//! - `interior_point`: log-barrier continuation with damped Newton steps.
//! - `simplex`: dense tableau simplex with the Dantzig entering rule.
//!
//! Both take `DMatrix`/`DVector` inputs and leave them untouched.

pub mod interior_point;
pub mod simplex;

pub use interior_point::{barrier_objective, solve_kkt, BarrierStep, IpmCfg, IpmResult};
pub use simplex::{dual_simplex, SimplexResult, SimplexStatus};

use crate::error::{NumError, Result};
use nalgebra::{DMatrix, DVector};

/// Check `c` has one entry per column of `a` and `b` one entry per row.
pub(crate) fn check_lp_shape(
    op: &'static str,
    c: &DVector<f64>,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
) -> Result<()> {
    if c.len() != a.ncols() {
        return Err(NumError::DimensionMismatch {
            op,
            expected: a.ncols(),
            found: c.len(),
        });
    }
    if b.len() != a.nrows() {
        return Err(NumError::DimensionMismatch {
            op,
            expected: a.nrows(),
            found: b.len(),
        });
    }
    Ok(())
}
