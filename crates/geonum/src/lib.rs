//! Computational-geometry and numerical-methods core.
//!
//! Pure, synchronous routines consumed in-process by the CAM layer: Voronoi
//! (Fortune) and Delaunay (Bowyer-Watson) construction, dense linear algebra,
//! FFT, scalar root finding, and LP solvers (log-barrier, tableau simplex).
//!
//! Conventions
//! - Points are `Vec2` (= `nalgebra::Vector2<f64>`); matrices are `DMatrix<f64>`.
//! - Hard failures return `Err(NumError)`; expected non-convergence is reported
//!   in the result structs; degenerate geometry degrades silently.
//! - Every call builds its own scratch state. Nothing is shared between calls.

pub mod api;
pub(crate) mod cfg;
pub mod collections;
pub mod error;
pub mod fft;
pub mod geom;
pub mod linalg;
pub mod opt;
pub mod roots;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{NumError, Result};
pub use nalgebra::{Complex, DMatrix, DVector, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{NumError, Result};
    pub use crate::geom::{Bounds, Triangle, Triangulation, VoronoiDiagram};
    pub use crate::opt::{IpmCfg, SimplexStatus};
    pub use crate::roots::{RootCfg, RootResult};
    pub use nalgebra::{Complex, DMatrix, DVector, Vector2 as Vec2};
}

/// Twice the signed area of triangle `(a, b, c)`.
/// Positive for a→b→c counterclockwise (y up), negative otherwise.
#[inline]
pub fn orient2d(a: Vec2<f64>, b: Vec2<f64>, c: Vec2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
