//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants; caller-tunable knobs live in the per-solver cfg structs
//!   (`RootCfg`, `IpmCfg`, `Bounds`).

/// Pivot magnitude below which a matrix is declared singular.
pub(crate) const PIVOT_EPS: f64 = 1e-14;
/// Derivative / secant-denominator magnitude treated as zero by root finders.
pub(crate) const ROOT_DENOM_EPS: f64 = 1e-14;
/// Coincidence tolerance for sweep-line and site comparisons.
pub(crate) const GEOM_EPS: f64 = 1e-10;
/// QR iteration stops once the squared off-diagonal mass falls below this.
pub(crate) const EIGEN_OFFDIAG_EPS: f64 = 1e-10;
pub(crate) const EIGEN_MAX_ITER: usize = 100;
/// Minimum pivot-column entry admitted by the simplex ratio test.
pub(crate) const SIMPLEX_PIVOT_EPS: f64 = 1e-10;
pub(crate) const SIMPLEX_MAX_ITER: usize = 1000;
/// Length of the ray used to close unbounded Voronoi edges.
pub(crate) const VORONOI_RAY_LEN: f64 = 10_000.0;
/// Allowed violation of `Ax <= b` during the barrier line search.
pub(crate) const IPM_CONSTRAINT_SLACK: f64 = 1e-6;
pub(crate) const IPM_ARMIJO_C: f64 = 0.01;
pub(crate) const IPM_INNER_MAX_ITER: usize = 50;
/// Geometric decay of the barrier weight per outer iteration.
pub(crate) const IPM_MU_DECAY: f64 = 0.1;
/// Backtracking gives up after this many step halvings.
pub(crate) const IPM_MAX_BACKTRACK: usize = 60;
