//! Shared 2D types: axis-aligned `Bounds` and the circumcircle helper.

use nalgebra::Vector2;

use crate::cfg::GEOM_EPS;

/// Axis-aligned clipping rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 1000.0,
            min_y: 0.0,
            max_y: 1000.0,
        }
    }
}

impl Bounds {
    #[inline]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Tight box around `points`; `None` when empty.
    pub fn from_points(points: &[Vector2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self::new(first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Corners in counterclockwise order starting at `(min_x, min_y)`.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            Vector2::new(self.min_x, self.min_y),
            Vector2::new(self.max_x, self.min_y),
            Vector2::new(self.max_x, self.max_y),
            Vector2::new(self.min_x, self.max_y),
        ]
    }
}

/// Center and radius of the circle through `a`, `b`, `c`; `None` if collinear.
pub fn circumcircle(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Option<(Vector2<f64>, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < GEOM_EPS {
        return None;
    }
    let a2 = a.norm_squared();
    let b2 = b.norm_squared();
    let c2 = c.norm_squared();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = Vector2::new(ux, uy);
    Some((center, (a - center).norm()))
}
