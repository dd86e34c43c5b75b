//! Fortune sweep state: arc arena (the beachline), circle-event arena, and
//! the half-edge pairs traced by breakpoints.
//!
//! Links are indices into arenas that only grow during one sweep, so a stale
//! index can never alias a different object. Circle events are never removed
//! from the queue; they are flagged invalid and skipped when popped.

use nalgebra::Vector2;
use std::cmp::Ordering;

use crate::cfg::GEOM_EPS;
use crate::collections::PriorityQueue;
use crate::geom::circumcircle;
use crate::orient2d;

pub(super) type ArcId = usize;
pub(super) type EdgeId = usize;
type CircleId = usize;

/// Beachline node: one parabola segment of the current envelope.
#[derive(Clone, Debug)]
struct Arc {
    site: usize,
    prev: Option<ArcId>,
    next: Option<ArcId>,
    /// Half-edge traced by the breakpoint with `prev`.
    left_edge: Option<EdgeId>,
    /// Half-edge traced by the breakpoint with `next`.
    right_edge: Option<EdgeId>,
    /// Pending circle event (non-owning).
    circle: Option<CircleId>,
}

#[derive(Clone, Copy, Debug)]
struct CircleEvent {
    arc: ArcId,
    center: Vector2<f64>,
    valid: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Event {
    Site { site: usize, x: f64, y: f64 },
    Circle { id: CircleId, x: f64, y: f64 },
}

impl Event {
    #[inline]
    fn key(&self) -> (f64, f64) {
        match *self {
            Event::Site { x, y, .. } | Event::Circle { x, y, .. } => (y, x),
        }
    }
}

fn event_order(a: &Event, b: &Event) -> Ordering {
    let (ay, ax) = a.key();
    let (by, bx) = b.key();
    ay.total_cmp(&by).then(ax.total_cmp(&bx))
}

type EventQueue = PriorityQueue<Event, fn(&Event, &Event) -> Ordering>;

/// Directed half of a Voronoi edge separating `left_site` and `right_site`.
///
/// Twins are allocated as consecutive pairs `(2k, 2k + 1)`. Closing a
/// half-edge at vertex `v` sets its `end` and its twin's `start`.
#[derive(Clone, Copy, Debug)]
pub(super) struct HalfEdge {
    pub left_site: usize,
    pub right_site: usize,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub twin: EdgeId,
    /// Set when the pair never traced anything and must not be emitted.
    pub retired: bool,
}

pub(super) struct Sweep<'a> {
    sites: &'a [Vector2<f64>],
    queue: EventQueue,
    arcs: Vec<Arc>,
    head: Option<ArcId>,
    circles: Vec<CircleEvent>,
    sweep_y: f64,
    pub vertices: Vec<Vector2<f64>>,
    pub half_edges: Vec<HalfEdge>,
    /// Per site: primary half-edge of every pair bounding its cell.
    pub cell_edges: Vec<Vec<EdgeId>>,
}

impl<'a> Sweep<'a> {
    /// Run the sweep to completion.
    pub fn run(sites: &'a [Vector2<f64>]) -> Self {
        let mut sweep = Sweep {
            sites,
            queue: PriorityQueue::with_capacity(
                event_order as fn(&Event, &Event) -> Ordering,
                sites.len(),
            ),
            arcs: Vec::with_capacity(2 * sites.len()),
            head: None,
            circles: Vec::new(),
            sweep_y: f64::NEG_INFINITY,
            vertices: Vec::new(),
            half_edges: Vec::new(),
            cell_edges: vec![Vec::new(); sites.len()],
        };
        for (site, p) in sites.iter().enumerate() {
            if p.x.is_finite() && p.y.is_finite() {
                sweep.queue.insert(Event::Site {
                    site,
                    x: p.x,
                    y: p.y,
                });
            }
        }
        while let Some(ev) = sweep.queue.extract_min() {
            match ev {
                Event::Site { site, y, .. } => {
                    sweep.sweep_y = y;
                    sweep.handle_site(site);
                }
                Event::Circle { id, y, .. } => {
                    if !sweep.circles[id].valid {
                        continue;
                    }
                    sweep.sweep_y = y;
                    sweep.handle_circle(id);
                }
            }
        }
        sweep
    }

    fn new_arc(&mut self, site: usize) -> ArcId {
        self.arcs.push(Arc {
            site,
            prev: None,
            next: None,
            left_edge: None,
            right_edge: None,
            circle: None,
        });
        self.arcs.len() - 1
    }

    /// Allocate a twin pair between `left` and `right`; registers it on both cells.
    fn new_edge_pair(&mut self, left: usize, right: usize) -> EdgeId {
        let h = self.half_edges.len();
        self.half_edges.push(HalfEdge {
            left_site: left,
            right_site: right,
            start: None,
            end: None,
            twin: h + 1,
            retired: false,
        });
        self.half_edges.push(HalfEdge {
            left_site: right,
            right_site: left,
            start: None,
            end: None,
            twin: h,
            retired: false,
        });
        self.cell_edges[left].push(h);
        self.cell_edges[right].push(h);
        h
    }

    fn close_edge(&mut self, e: EdgeId, v: usize) {
        self.half_edges[e].end = Some(v);
        let t = self.half_edges[e].twin;
        self.half_edges[t].start = Some(v);
    }

    fn invalidate(&mut self, arc: ArcId) {
        if let Some(c) = self.arcs[arc].circle.take() {
            self.circles[c].valid = false;
        }
    }

    fn site_of(&self, arc: ArcId) -> Vector2<f64> {
        self.sites[self.arcs[arc].site]
    }

    /// Arc whose parabola is on the envelope at `x` for the current directrix.
    fn find_arc_above(&self, head: ArcId, x: f64) -> ArcId {
        let mut cur = head;
        while let Some(next) = self.arcs[cur].next {
            let bp = breakpoint(self.site_of(cur), self.site_of(next), self.sweep_y);
            if x <= bp {
                return cur;
            }
            cur = next;
        }
        cur
    }

    fn handle_site(&mut self, site: usize) {
        let p = self.sites[site];
        let Some(head) = self.head else {
            let a = self.new_arc(site);
            self.head = Some(a);
            return;
        };
        let found = self.find_arc_above(head, p.x);
        self.invalidate(found);
        let found_site = self.arcs[found].site;
        let q = self.sites[found_site];

        if (q.y - p.y).abs() < GEOM_EPS {
            self.insert_beside(found, site, p.x < q.x);
            return;
        }

        // Split `found` into [found, new, right].
        let new = self.new_arc(site);
        let right = self.new_arc(found_site);
        let old_next = self.arcs[found].next;
        self.arcs[right].next = old_next;
        self.arcs[right].right_edge = self.arcs[found].right_edge;
        if let Some(n) = old_next {
            self.arcs[n].prev = Some(right);
        }
        self.arcs[right].prev = Some(new);
        self.arcs[new].prev = Some(found);
        self.arcs[new].next = Some(right);
        self.arcs[found].next = Some(new);

        let h = self.new_edge_pair(found_site, site);
        let twin = self.half_edges[h].twin;
        self.arcs[found].right_edge = Some(h);
        self.arcs[new].left_edge = Some(h);
        self.arcs[new].right_edge = Some(twin);
        self.arcs[right].left_edge = Some(twin);

        self.check_circle(found);
        self.check_circle(new);
        self.check_circle(right);
    }

    /// Degenerate split: the found arc is a vertical ray at the same height.
    ///
    /// The new arc lands between `found` and one of its neighbors, so the
    /// breakpoint they shared is replaced by a fresh pair on each side.
    fn insert_beside(&mut self, found: ArcId, site: usize, before: bool) {
        let new = self.new_arc(site);
        let found_site = self.arcs[found].site;
        if before {
            let old_prev = self.arcs[found].prev;
            self.arcs[new].prev = old_prev;
            self.arcs[new].next = Some(found);
            self.arcs[found].prev = Some(new);
            match old_prev {
                Some(pv) => {
                    self.arcs[pv].next = Some(new);
                    if let Some(e) = self.arcs[found].left_edge {
                        self.retire_open(e);
                    }
                    let pv_site = self.arcs[pv].site;
                    let g = self.new_edge_pair(pv_site, site);
                    self.arcs[pv].right_edge = Some(g);
                    self.arcs[new].left_edge = Some(g);
                }
                None => self.head = Some(new),
            }
            let h = self.new_edge_pair(site, found_site);
            self.arcs[new].right_edge = Some(h);
            self.arcs[found].left_edge = Some(h);
            if let Some(pv) = old_prev {
                self.check_circle(pv);
            }
        } else {
            let old_next = self.arcs[found].next;
            self.arcs[new].next = old_next;
            self.arcs[new].prev = Some(found);
            self.arcs[found].next = Some(new);
            if let Some(nx) = old_next {
                self.arcs[nx].prev = Some(new);
                if let Some(e) = self.arcs[found].right_edge {
                    self.retire_open(e);
                }
                let nx_site = self.arcs[nx].site;
                let g = self.new_edge_pair(site, nx_site);
                self.arcs[new].right_edge = Some(g);
                self.arcs[nx].left_edge = Some(g);
            }
            let h = self.new_edge_pair(found_site, site);
            self.arcs[found].right_edge = Some(h);
            self.arcs[new].left_edge = Some(h);
            if let Some(nx) = old_next {
                self.check_circle(nx);
            }
        }
        self.check_circle(found);
        self.check_circle(new);
    }

    /// Drop a pair whose breakpoint vanished before reaching any vertex.
    fn retire_open(&mut self, e: EdgeId) {
        let h = e - e % 2;
        if self.half_edges[h].start.is_some() || self.half_edges[h].end.is_some() {
            return;
        }
        for id in [h, h + 1] {
            self.half_edges[id].retired = true;
        }
        let (l, r) = (self.half_edges[h].left_site, self.half_edges[h].right_site);
        self.cell_edges[l].retain(|&x| x != h);
        self.cell_edges[r].retain(|&x| x != h);
    }

    fn handle_circle(&mut self, id: CircleId) {
        let CircleEvent { arc, center, .. } = self.circles[id];
        self.circles[id].valid = false;
        self.arcs[arc].circle = None;
        let (Some(prev), Some(next)) = (self.arcs[arc].prev, self.arcs[arc].next) else {
            return;
        };
        self.invalidate(prev);
        self.invalidate(next);

        let v = self.vertices.len();
        self.vertices.push(center);
        if let Some(e) = self.arcs[arc].left_edge {
            self.close_edge(e, v);
        }
        if let Some(e) = self.arcs[arc].right_edge {
            self.close_edge(e, v);
        }

        // The new breakpoint starts at `v` and traces `h`.
        let (left, right) = (self.arcs[prev].site, self.arcs[next].site);
        let h = self.new_edge_pair(left, right);
        self.half_edges[h].start = Some(v);
        let twin = self.half_edges[h].twin;
        self.half_edges[twin].end = Some(v);
        self.arcs[prev].right_edge = Some(h);
        self.arcs[next].left_edge = Some(h);

        self.arcs[prev].next = Some(next);
        self.arcs[next].prev = Some(prev);
        self.arcs[arc].prev = None;
        self.arcs[arc].next = None;

        self.check_circle(prev);
        self.check_circle(next);
    }

    /// Schedule the collapse of `arc` if its neighbors' breakpoints converge
    /// and the circle's far point is not behind the sweep line.
    fn check_circle(&mut self, arc: ArcId) {
        self.invalidate(arc);
        let (Some(prev), Some(next)) = (self.arcs[arc].prev, self.arcs[arc].next) else {
            return;
        };
        let (a, b, c) = (self.site_of(prev), self.site_of(arc), self.site_of(next));
        // Breakpoints converge only for a clockwise turn as seen from the
        // sweep line, i.e. a positive orientation in this y-up frame.
        if orient2d(a, b, c) <= 0.0 {
            return;
        }
        let Some((center, r)) = circumcircle(a, b, c) else {
            return;
        };
        let y = center.y + r;
        if y < self.sweep_y - GEOM_EPS {
            return;
        }
        let id = self.circles.len();
        self.circles.push(CircleEvent {
            arc,
            center,
            valid: true,
        });
        self.arcs[arc].circle = Some(id);
        self.queue.insert(Event::Circle {
            id,
            x: center.x,
            y,
        });
    }
}

/// x of the breakpoint between the arcs of `p` (left) and `q` (right) for
/// directrix `y = d`.
///
/// A site on the directrix is a vertical ray, so the breakpoint is its x.
/// Equal site heights make the quadratic degenerate; its linear root is used.
pub(super) fn breakpoint(p: Vector2<f64>, q: Vector2<f64>, d: f64) -> f64 {
    let dp = 2.0 * (p.y - d);
    let dq = 2.0 * (q.y - d);
    if dp.abs() < GEOM_EPS {
        return p.x;
    }
    if dq.abs() < GEOM_EPS {
        return q.x;
    }
    // y_p(x) - y_q(x) = a x² + b x + c
    let a = 1.0 / dp - 1.0 / dq;
    let b = -2.0 * (p.x / dp - q.x / dq);
    let c = (p.x * p.x + p.y * p.y - d * d) / dp - (q.x * q.x + q.y * q.y - d * d) / dq;
    if (p.y - q.y).abs() < GEOM_EPS || a.abs() < GEOM_EPS * GEOM_EPS {
        if b.abs() < GEOM_EPS * GEOM_EPS {
            return 0.5 * (p.x + q.x);
        }
        return -c / b;
    }
    let disc = (b * b - 4.0 * a * c).max(0.0);
    let sq = disc.sqrt();
    let x1 = (-b - sq) / (2.0 * a);
    let x2 = (-b + sq) / (2.0 * a);
    // `p` must dominate on the left, so the difference crosses zero downward.
    if a > 0.0 {
        x1.min(x2)
    } else {
        x1.max(x2)
    }
}
