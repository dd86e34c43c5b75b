//! Flat re-export surface for callers that do not want to track module paths.
//!
//! Names that collide across modules (`compute`, `solve`) are aliased by
//! algorithm.

// Support structures
pub use crate::collections::{PriorityQueue, RedBlackTree};
// Geometry
pub use crate::geom::delaunay::compute as delaunay;
pub use crate::geom::voronoi::compute as voronoi;
pub use crate::geom::{
    circumcircle, clip_segment, in_circumcircle, point_in_polygon, polygon_area, Bounds, Triangle,
    Triangulation, VoronoiCell, VoronoiDiagram, VoronoiEdge,
};
pub use crate::orient2d;
// Linear algebra and spectra
pub use crate::fft::{convolve, forward as fft, forward_complex as fft_complex, inverse as ifft};
pub use crate::linalg::{
    determinant, eigenvalues, eigenvalues_default, inverse, lu, multiply, qr, solve as lin_solve,
    transpose, Lu, Qr,
};
// Roots
pub use crate::roots::{
    bisection, brent, newton_raphson, secant, FailReason, RootCfg, RootResult, RootStep,
};
// Linear programs
pub use crate::opt::interior_point::solve as ipm_solve;
pub use crate::opt::simplex::solve as simplex_solve;
pub use crate::opt::{
    barrier_objective, dual_simplex, solve_kkt, BarrierStep, IpmCfg, IpmResult, SimplexResult,
    SimplexStatus,
};
// Errors
pub use crate::error::{NumError, Result};
