//! Cohen-Sutherland segment clipping and polygon predicates.

use nalgebra::Vector2;

use super::Bounds;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

#[inline]
fn region_code(p: Vector2<f64>, b: &Bounds) -> u8 {
    let mut code = INSIDE;
    if p.x < b.min_x {
        code |= LEFT;
    } else if p.x > b.max_x {
        code |= RIGHT;
    }
    if p.y < b.min_y {
        code |= BOTTOM;
    } else if p.y > b.max_y {
        code |= TOP;
    }
    code
}

/// Clip segment `a→b` to `bounds`. `None` when nothing remains.
pub fn clip_segment(
    mut a: Vector2<f64>,
    mut b: Vector2<f64>,
    bounds: &Bounds,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let mut ca = region_code(a, bounds);
    let mut cb = region_code(b, bounds);
    loop {
        if ca | cb == INSIDE {
            return Some((a, b));
        }
        if ca & cb != INSIDE {
            return None;
        }
        // Move the endpoint that is outside onto the violated boundary.
        let out = if ca != INSIDE { ca } else { cb };
        let d = b - a;
        let p = if out & TOP != 0 {
            Vector2::new(a.x + d.x * (bounds.max_y - a.y) / d.y, bounds.max_y)
        } else if out & BOTTOM != 0 {
            Vector2::new(a.x + d.x * (bounds.min_y - a.y) / d.y, bounds.min_y)
        } else if out & RIGHT != 0 {
            Vector2::new(bounds.max_x, a.y + d.y * (bounds.max_x - a.x) / d.x)
        } else {
            Vector2::new(bounds.min_x, a.y + d.y * (bounds.min_x - a.x) / d.x)
        };
        if !(p.x.is_finite() && p.y.is_finite()) {
            return None;
        }
        if out == ca {
            a = p;
            ca = region_code(a, bounds);
        } else {
            b = p;
            cb = region_code(b, bounds);
        }
    }
}

/// Even-odd ray casting. Points exactly on the boundary may go either way.
pub fn point_in_polygon(p: Vector2<f64>, poly: &[Vector2<f64>]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pj.x + (p.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Signed shoelace area (positive for counterclockwise order).
pub fn polygon_area(poly: &[Vector2<f64>]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let mut s = 0.0;
    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        s += a.x * b.y - b.x * a.y;
    }
    0.5 * s
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn unit_box() -> Bounds {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn clip_inside_unchanged() {
        let (a, b) = clip_segment(vector![0.2, 0.2], vector![0.8, 0.5], &unit_box()).unwrap();
        assert_eq!((a, b), (vector![0.2, 0.2], vector![0.8, 0.5]));
    }

    #[test]
    fn clip_crossing_and_outside() {
        let (a, b) = clip_segment(vector![-1.0, 0.5], vector![2.0, 0.5], &unit_box()).unwrap();
        assert!((a - vector![0.0, 0.5]).norm() < 1e-12);
        assert!((b - vector![1.0, 0.5]).norm() < 1e-12);
        // Diagonal through a corner region.
        let (a, b) = clip_segment(vector![-1.0, -1.0], vector![2.0, 2.0], &unit_box()).unwrap();
        assert!((a - vector![0.0, 0.0]).norm() < 1e-12);
        assert!((b - vector![1.0, 1.0]).norm() < 1e-12);
        // Both endpoints on the same outside side.
        assert!(clip_segment(vector![2.0, 0.0], vector![3.0, 1.0], &unit_box()).is_none());
        // Different outside regions, still missing the box.
        assert!(clip_segment(vector![-0.5, 0.8], vector![0.3, 2.0], &unit_box()).is_none());
    }

    #[test]
    fn polygon_predicates() {
        let sq = [
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
        ];
        assert!(point_in_polygon(vector![1.0, 1.0], &sq));
        assert!(!point_in_polygon(vector![3.0, 1.0], &sq));
        assert!(!point_in_polygon(vector![1.0, 1.0], &sq[..2]));
        assert!((polygon_area(&sq) - 4.0).abs() < 1e-12);
        let rev: Vec<_> = sq.iter().rev().copied().collect();
        assert!((polygon_area(&rev) + 4.0).abs() < 1e-12);
    }
}
