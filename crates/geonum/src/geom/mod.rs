//! Planar geometry: Voronoi (Fortune sweep), Delaunay (Bowyer-Watson), and
//! the clipping helpers used to post-process them.
//!
//! Assumptions and conventions
//! - Points are `Vec2` in a y-up frame. The Voronoi sweep line moves toward +y.
//! - Near-equal `y` values (within `1e-10`) are treated as coincident by the
//!   sweep; no other robustness technique (exact predicates, symbolic
//!   perturbation) is applied.
//! - Degenerate inputs (duplicates, collinear or cocircular sites) degrade
//!   silently to fewer vertices/edges/triangles. They never panic and never
//!   return an error.
//! - Inputs are borrowed immutably; every call owns its scratch state.

pub mod clip;
pub mod delaunay;
mod types;
pub mod voronoi;

pub use clip::{clip_segment, point_in_polygon, polygon_area};
pub use delaunay::{in_circumcircle, Triangle, Triangulation};
pub use types::{circumcircle, Bounds};
pub use voronoi::{VoronoiCell, VoronoiDiagram, VoronoiEdge};
