//! Planar geometry kernel
//!
//! Value types for points, segments, rings and multi-part regions, plus the
//! predicates the generators and the navigation mesh rely on. Boolean and
//! buffer operations are delegated to clipper2 (see [`clip`]); constrained
//! triangulation is delegated to spade (see [`triangulate`]).

pub mod clip;
pub mod region;
pub mod triangle;
pub mod triangulate;

pub use region::{Region, Ring};
pub use triangle::Triangle;

use serde::{Deserialize, Serialize};

/// Absolute tolerance for boundary and collinearity tests.
pub const EPSILON: f64 = 1e-9;

/// A point (or vector) in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Lexicographic order on (x, y), used to canonicalize segments.
    fn lex_le(&self, other: Point) -> bool {
        self.x < other.x || (self.x == other.x && self.y <= other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// A straight line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Same segment with endpoints in lexicographic order, so two cells that
    /// compute the same border store bit-identical values.
    pub fn canonical(self) -> Self {
        if self.start.lex_le(self.end) {
            self
        } else {
            Self::new(self.end, self.start)
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }

    /// Distance from `p` to the closest point of the segment.
    pub fn distance_to(&self, p: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return p.distance(self.start);
        }
        let t = (((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0);
        p.distance(self.point_at(t))
    }

    /// Whether the closed segments share at least one point.
    pub fn intersects(&self, other: &Segment) -> bool {
        let d1 = orient(other.start, other.end, self.start);
        let d2 = orient(other.start, other.end, self.end);
        let d3 = orient(self.start, self.end, other.start);
        let d4 = orient(self.start, self.end, other.end);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        other.distance_to(self.start) <= EPSILON
            || other.distance_to(self.end) <= EPSILON
            || self.distance_to(other.start) <= EPSILON
            || self.distance_to(other.end) <= EPSILON
    }

    /// Parameters along `self` where it meets `other`.
    ///
    /// A crossing or touch yields one parameter; a collinear overlap yields the
    /// parameters of both overlap endpoints. Parameters are clamped to [0, 1].
    pub fn contact_params(&self, other: &Segment) -> Vec<f64> {
        let r = (self.end.x - self.start.x, self.end.y - self.start.y);
        let s = (other.end.x - other.start.x, other.end.y - other.start.y);
        let len_sq = r.0 * r.0 + r.1 * r.1;
        if len_sq == 0.0 {
            return Vec::new();
        }
        let qp = (other.start.x - self.start.x, other.start.y - self.start.y);
        let denom = r.0 * s.1 - r.1 * s.0;
        let scale = len_sq.sqrt() * (s.0 * s.0 + s.1 * s.1).sqrt();

        if denom.abs() <= EPSILON * scale.max(1.0) {
            // Parallel: only collinear overlaps contribute.
            if self.distance_to_line(other.start) > EPSILON {
                return Vec::new();
            }
            let t0 = (qp.0 * r.0 + qp.1 * r.1) / len_sq;
            let t1 = t0 + (s.0 * r.0 + s.1 * r.1) / len_sq;
            let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            if hi < 0.0 || lo > 1.0 {
                return Vec::new();
            }
            return vec![lo.max(0.0), hi.min(1.0)];
        }

        let t = (qp.0 * s.1 - qp.1 * s.0) / denom;
        let u = (qp.0 * r.1 - qp.1 * r.0) / denom;
        let slack_t = EPSILON / len_sq.sqrt();
        let slack_u = EPSILON / (s.0 * s.0 + s.1 * s.1).sqrt().max(EPSILON);
        if t < -slack_t || t > 1.0 + slack_t || u < -slack_u || u > 1.0 + slack_u {
            return Vec::new();
        }
        vec![t.clamp(0.0, 1.0)]
    }

    fn distance_to_line(&self, p: Point) -> f64 {
        let len = self.length();
        if len == 0.0 {
            return p.distance(self.start);
        }
        orient(self.start, self.end, p).abs() / len
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x + EPSILON
            && other.min_x <= self.max_x + EPSILON
            && self.min_y <= other.max_y + EPSILON
            && other.min_y <= self.max_y + EPSILON
    }
}

/// Twice the signed area of triangle (a, b, c); positive when counter-clockwise.
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_segment_is_order_independent() {
        let a = Point::new(3.0, 1.0);
        let b = Point::new(1.0, 2.0);
        assert_eq!(Segment::new(a, b).canonical(), Segment::new(b, a).canonical());
        assert_eq!(Segment::new(a, b).canonical().start, b);
    }

    #[test]
    fn test_segment_intersection_cases() {
        let horizontal = Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        let crossing = Segment::new(Point::new(1.0, -1.0), Point::new(1.0, 1.0));
        let touching = Segment::new(Point::new(2.0, 0.0), Point::new(3.0, 5.0));
        let apart = Segment::new(Point::new(0.0, 1.0), Point::new(2.0, 1.0));

        assert!(horizontal.intersects(&crossing));
        assert!(horizontal.intersects(&touching));
        assert!(!horizontal.intersects(&apart));
    }

    #[test]
    fn test_contact_params_collinear_overlap() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let overlap = Segment::new(Point::new(3.0, 0.0), Point::new(1.0, 0.0));
        assert_eq!(seg.contact_params(&overlap), vec![0.25, 0.75]);

        let crossing = Segment::new(Point::new(2.0, -1.0), Point::new(2.0, 1.0));
        assert_eq!(seg.contact_params(&crossing), vec![0.5]);
    }

    #[test]
    fn test_bounds_from_points() {
        let pts = [Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)];
        let b = Bounds::from_points(&pts).unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-2.0, -1.0, 4.0, 5.0));
        assert!(Bounds::from_points(&Vec::<Point>::new()).is_none());
    }
}
