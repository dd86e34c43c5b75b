//! Voronoi diagrams by Fortune's sweep-line algorithm.
//!
//! Pipeline
//! - `beachline::Sweep` consumes site/circle events in `(y, x)` order and
//!   records vertices plus half-edge pairs traced by breakpoints.
//! - Finalization turns each pair into one segment. Missing ends are rays,
//!   extended 10 000 units along the sites' bisector, and every segment is
//!   Cohen-Sutherland clipped to the caller's `Bounds`. Segments that clip
//!   away entirely are dropped.
//!
//! Degenerate inputs (duplicate, collinear, or cocircular sites) are not
//! detected. They can yield fewer vertices, zero-width cells, or coincident
//! vertices, but never a panic.

mod beachline;

use nalgebra::Vector2;

use self::beachline::Sweep;
use super::clip::clip_segment;
use super::Bounds;
use crate::cfg::{GEOM_EPS, VORONOI_RAY_LEN};

/// Clipped segment of the bisector between two sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoronoiEdge {
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
    pub left_site: usize,
    pub right_site: usize,
}

/// Cell of one input site; `edges` index into `VoronoiDiagram::edges`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCell {
    pub site: usize,
    pub point: Vector2<f64>,
    pub edges: Vec<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoronoiDiagram {
    /// Circumcenters produced by circle events (unclipped).
    pub vertices: Vec<Vector2<f64>>,
    pub edges: Vec<VoronoiEdge>,
    pub cells: Vec<VoronoiCell>,
    pub site_count: usize,
}

/// Build the Voronoi diagram of `sites`, clipping edges to `bounds`.
pub fn compute(sites: &[Vector2<f64>], bounds: Bounds) -> VoronoiDiagram {
    let sweep = Sweep::run(sites);

    let mut edges = Vec::with_capacity(sweep.half_edges.len() / 2);
    let mut pair_to_edge = vec![None; sweep.half_edges.len()];
    for (id, h) in sweep.half_edges.iter().enumerate().step_by(2) {
        if h.retired {
            continue;
        }
        let l = sites[h.left_site];
        let r = sites[h.right_site];
        // Direction in which the breakpoint tracing `h` moves.
        let dir = Vector2::new(-(r.y - l.y), r.x - l.x);
        let len = dir.norm();
        if len < GEOM_EPS {
            continue;
        }
        let ray = dir * (VORONOI_RAY_LEN / len);
        let vx = |i: usize| sweep.vertices[i];
        let (a, b) = match (h.start, h.end) {
            (Some(s), Some(e)) => (vx(s), vx(e)),
            (Some(s), None) => (vx(s), vx(s) + ray),
            (None, Some(e)) => (vx(e) - ray, vx(e)),
            (None, None) => {
                let mid = (l + r) * 0.5;
                (mid - ray, mid + ray)
            }
        };
        if (b - a).norm() < GEOM_EPS {
            continue;
        }
        if let Some((a, b)) = clip_segment(a, b, &bounds) {
            pair_to_edge[id] = Some(edges.len());
            edges.push(VoronoiEdge {
                a,
                b,
                left_site: h.left_site,
                right_site: h.right_site,
            });
        }
    }

    let cells = sites
        .iter()
        .enumerate()
        .map(|(site, &point)| VoronoiCell {
            site,
            point,
            edges: sweep.cell_edges[site]
                .iter()
                .filter_map(|&h| pair_to_edge[h])
                .collect(),
        })
        .collect();

    tracing::debug!(
        sites = sites.len(),
        vertices = sweep.vertices.len(),
        edges = edges.len(),
        "voronoi"
    );
    VoronoiDiagram {
        vertices: sweep.vertices,
        edges,
        cells,
        site_count: sites.len(),
    }
}

impl VoronoiDiagram {
    /// Convex polygon of cell `i` clipped to `bounds`, counterclockwise.
    ///
    /// Built from the cell's clipped edge endpoints plus the corners of
    /// `bounds` whose nearest site is `i`. Empty if fewer than three distinct
    /// points remain.
    pub fn cell_polygon(&self, i: usize, bounds: &Bounds) -> Vec<Vector2<f64>> {
        let Some(cell) = self.cells.get(i) else {
            return Vec::new();
        };
        let mut pts: Vec<Vector2<f64>> = Vec::with_capacity(2 * cell.edges.len() + 4);
        for &e in &cell.edges {
            pts.push(self.edges[e].a);
            pts.push(self.edges[e].b);
        }
        for corner in bounds.corners() {
            let own = (corner - cell.point).norm_squared();
            let nearest = self
                .cells
                .iter()
                .map(|c| (corner - c.point).norm_squared())
                .fold(f64::INFINITY, f64::min);
            if own <= nearest + GEOM_EPS {
                pts.push(corner);
            }
        }
        if pts.len() < 3 {
            return Vec::new();
        }
        let centroid = pts.iter().fold(Vector2::<f64>::zeros(), |acc, p| acc + p) / pts.len() as f64;
        pts.sort_by(|a, b| {
            let ta = (a.y - centroid.y).atan2(a.x - centroid.x);
            let tb = (b.y - centroid.y).atan2(b.x - centroid.x);
            ta.total_cmp(&tb)
        });
        pts.dedup_by(|a, b| (*a - *b).norm() < 1e-9);
        while pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() < 1e-9 {
            pts.pop();
        }
        if pts.len() < 3 {
            return Vec::new();
        }
        pts
    }

    /// Index of the cell containing `p` (nearest site).
    pub fn locate(&self, p: Vector2<f64>) -> Option<usize> {
        self.cells
            .iter()
            .map(|c| (c.site, (p - c.point).norm_squared()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}
