//! Delaunay triangulation by Bowyer-Watson incremental insertion.
//!
//! Algorithm
//! 1. Build a super-triangle about 10× the extent of the input.
//! 2. Insert points in input order: collect triangles whose circumcircle
//!    contains the point, keep the edges not shared by two of them (the
//!    cavity boundary), and fan new triangles from the point to that boundary.
//! 3. Drop triangles touching a super vertex, then list unique edges.
//!
//! The in-circle test treats super vertices as points at infinity along
//! their direction from the input's center (see `in_cavity`). A finite
//! super vertex can sit inside the circumcircle of a real hull triangle,
//! which then disappears together with the super vertex.
//!
//! Complexity: the bad-triangle search is a linear scan, so O(n²) worst case.
//! Coincident points are skipped silently; all-collinear input yields no
//! proper triangles.

use nalgebra::Vector2;
use std::collections::BTreeSet;

use super::{circumcircle, Bounds};
use crate::orient2d;

/// Triangle as indices into the input point slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    /// Circumcenter against the point slice the triangle indexes into.
    pub fn circumcenter(&self, points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
        circumcircle(points[self.a], points[self.b], points[self.c]).map(|(c, _)| c)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    pub triangles: Vec<Triangle>,
    /// Unique undirected edges, smaller index first, sorted.
    pub edges: Vec<(usize, usize)>,
    pub point_count: usize,
}

/// Strict in-circle test, valid for either winding of `(a, b, c)`.
pub fn in_circumcircle(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> bool {
    let (ax, ay) = (a.x - p.x, a.y - p.y);
    let (bx, by) = (b.x - p.x, b.y - p.y);
    let (cx, cy) = (c.x - p.x, c.y - p.y);
    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);
    if orient2d(a, b, c) > 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

/// Bowyer-Watson cavity test for triangle `t` over `pts`, where indices
/// `>= n` are super vertices sent to infinity along `pts[s] - mid`.
///
/// - No super vertex: the ordinary strict in-circle test.
/// - One super vertex `s`, real edge `(u, v)`: the circle tends to the open
///   half-plane of line `uv` on the side of `s`, plus the open segment `uv`.
/// - Two super vertices, real vertex `u`: the circle tends to the open
///   half-plane through `u` whose normal is the circumcenter of
///   `(0, d1, d2)`.
/// - Three: the whole plane.
fn in_cavity(
    p: Vector2<f64>,
    t: &Triangle,
    pts: &[Vector2<f64>],
    n: usize,
    mid: Vector2<f64>,
) -> bool {
    let verts = [t.a, t.b, t.c];
    let dir = |s: usize| pts[s] - mid;
    match verts.iter().filter(|&&v| v >= n).count() {
        0 => in_circumcircle(p, pts[t.a], pts[t.b], pts[t.c]),
        1 => {
            let Some(k) = verts.iter().position(|&v| v >= n) else {
                return false;
            };
            let (u, v) = (pts[verts[(k + 1) % 3]], pts[verts[(k + 2) % 3]]);
            let side = orient2d(u, v, p);
            if side == 0.0 {
                return (p - u).dot(&(p - v)) < 0.0;
            }
            let mut far = orient2d(u, v, u + dir(verts[k]));
            if far == 0.0 {
                far = orient2d(u, v, mid);
            }
            side * far > 0.0
        }
        2 => {
            let Some(k) = verts.iter().position(|&v| v < n) else {
                return false;
            };
            let u = pts[verts[k]];
            let (d1, d2) = (dir(verts[(k + 1) % 3]), dir(verts[(k + 2) % 3]));
            match circumcircle(Vector2::zeros(), d1, d2) {
                Some((normal, _)) => (p - u).dot(&normal) > 0.0,
                None => false,
            }
        }
        _ => true,
    }
}

#[inline]
fn canonical((u, v): (usize, usize)) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Triangulate `points`. Fewer than three points yield an empty result.
pub fn compute(points: &[Vector2<f64>]) -> Triangulation {
    let n = points.len();
    if n < 3 {
        return Triangulation {
            point_count: n,
            ..Default::default()
        };
    }
    let Some(b) = Bounds::from_points(points) else {
        return Triangulation::default();
    };
    let delta = b.width().max(b.height()).max(1.0);
    let mid = Vector2::new(0.5 * (b.min_x + b.max_x), 0.5 * (b.min_y + b.max_y));

    let mut pts: Vec<Vector2<f64>> = Vec::with_capacity(n + 3);
    pts.extend_from_slice(points);
    pts.push(Vector2::new(mid.x - 10.0 * delta, mid.y - 10.0 * delta));
    pts.push(Vector2::new(mid.x + 10.0 * delta, mid.y - 10.0 * delta));
    pts.push(Vector2::new(mid.x, mid.y + 10.0 * delta));

    let mut triangles = vec![Triangle::new(n, n + 1, n + 2)];
    for (i, &p) in points.iter().enumerate() {
        let (bad, good): (Vec<Triangle>, Vec<Triangle>) = triangles
            .into_iter()
            .partition(|t| in_cavity(p, t, &pts, n, mid));
        triangles = good;

        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for (k, t) in bad.iter().enumerate() {
            for e in t.edges() {
                let key = canonical(e);
                let shared = bad
                    .iter()
                    .enumerate()
                    .any(|(j, o)| j != k && o.edges().iter().any(|&f| canonical(f) == key));
                if !shared {
                    boundary.push(e);
                }
            }
        }
        for (u, v) in boundary {
            triangles.push(Triangle::new(u, v, i));
        }
    }

    triangles.retain(|t| t.a < n && t.b < n && t.c < n);

    let edges: BTreeSet<(usize, usize)> = triangles
        .iter()
        .flat_map(|t| t.edges())
        .map(canonical)
        .collect();

    tracing::debug!(
        points = n,
        triangles = triangles.len(),
        edges = edges.len(),
        "delaunay"
    );
    Triangulation {
        triangles,
        edges: edges.into_iter().collect(),
        point_count: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn too_few_points() {
        let t = compute(&[vector![0.0, 0.0], vector![1.0, 1.0]]);
        assert!(t.triangles.is_empty() && t.edges.is_empty());
        assert_eq!(t.point_count, 2);
        assert!(compute(&[]).triangles.is_empty());
    }

    #[test]
    fn single_triangle_and_square() {
        let tri = [vector![0.0, 0.0], vector![1.0, 0.0], vector![0.5, 1.0]];
        let t = compute(&tri);
        assert_eq!(t.triangles.len(), 1);
        assert_eq!(t.edges, vec![(0, 1), (0, 2), (1, 2)]);

        // Unit square with a slight skew: two triangles, five edges.
        let sq = [
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.05],
        ];
        let t = compute(&sq);
        assert_eq!(t.triangles.len(), 2);
        assert_eq!(t.edges.len(), 5);
    }

    #[test]
    fn in_circumcircle_either_winding() {
        let (a, b, c) = (vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]);
        let inside = vector![0.4, 0.4];
        let outside = vector![2.0, 2.0];
        assert!(in_circumcircle(inside, a, b, c));
        assert!(in_circumcircle(inside, a, c, b));
        assert!(!in_circumcircle(outside, a, b, c));
        assert!(!in_circumcircle(outside, a, c, b));
        // On the circle is not strictly inside.
        assert!(!in_circumcircle(vector![1.0, 1.0], a, b, c));
    }

    #[test]
    fn random_points_satisfy_empty_circle() {
        let mut rng = StdRng::seed_from_u64(17);
        let pts: Vec<Vector2<f64>> = (0..60)
            .map(|_| vector![rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
            .collect();
        let t = compute(&pts);
        assert!(!t.triangles.is_empty());
        for tri in &t.triangles {
            let (a, b, c) = (pts[tri.a], pts[tri.b], pts[tri.c]);
            for (i, &p) in pts.iter().enumerate() {
                if tri.contains_vertex(i) {
                    continue;
                }
                assert!(!in_circumcircle(p, a, b, c));
            }
        }
        // Every input point is used.
        for i in 0..pts.len() {
            assert!(t.triangles.iter().any(|tri| tri.contains_vertex(i)));
        }
        // Each edge appears in one or two triangles.
        for &(u, v) in &t.edges {
            let k = t
                .triangles
                .iter()
                .filter(|tri| tri.contains_vertex(u) && tri.contains_vertex(v))
                .count();
            assert!(k == 1 || k == 2);
        }
    }

    /// Strict convex hull vertex count by Andrew's monotone chain.
    fn hull_size(pts: &[Vector2<f64>]) -> usize {
        let mut sorted = pts.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        let mut hull: Vec<Vector2<f64>> = Vec::with_capacity(2 * sorted.len());
        for pass in 0..2 {
            let start = hull.len();
            for &p in &sorted {
                while hull.len() >= start + 2
                    && orient2d(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
                {
                    hull.pop();
                }
                hull.push(p);
            }
            hull.pop();
            if pass == 0 {
                sorted.reverse();
            }
        }
        hull.len()
    }

    #[test]
    fn random_triangulations_are_complete() {
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(1000 + seed);
            let n = rng.gen_range(50..400);
            let pts: Vec<Vector2<f64>> = (0..n)
                .map(|_| vector![rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)])
                .collect();
            let h = hull_size(&pts);
            let t = compute(&pts);
            assert_eq!(t.triangles.len(), 2 * n - 2 - h, "seed {seed} n {n} hull {h}");
            assert_eq!(t.edges.len(), 3 * n - 3 - h, "seed {seed} n {n} hull {h}");
        }
    }

    #[test]
    fn hull_triangles_survive_super_vertex_removal() {
        // Thin strip in convex position: the triangles along its long sides
        // have circumcircles as wide as a 10x super-triangle.
        let pts: Vec<Vector2<f64>> = (0..12)
            .map(|i| {
                let x = i as f64 * 100.0;
                let sag = 1e-7 * (x - 550.0) * (x - 550.0);
                vector![x, if i % 2 == 0 { sag } else { 0.5 - sag }]
            })
            .collect();
        assert_eq!(hull_size(&pts), 12);
        let t = compute(&pts);
        assert_eq!(t.triangles.len(), 10);
        assert_eq!(t.edges.len(), 21);
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        let collinear: Vec<Vector2<f64>> = (0..5).map(|i| vector![i as f64, 2.0 * i as f64]).collect();
        let t = compute(&collinear);
        for tri in &t.triangles {
            assert!(tri.a < 5 && tri.b < 5 && tri.c < 5);
        }
        let dup = [
            vector![0.0, 0.0],
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![0.0, 3.0],
        ];
        let t = compute(&dup);
        assert_eq!(t.triangles.len(), 1);
        assert_eq!(t.point_count, 4);
    }

    #[test]
    fn circumcenter_of_right_triangle() {
        let pts = [vector![0.0, 0.0], vector![4.0, 0.0], vector![0.0, 3.0]];
        let c = Triangle::new(0, 1, 2).circumcenter(&pts).unwrap();
        assert!((c - vector![2.0, 1.5]).norm() < 1e-12);
    }
}
