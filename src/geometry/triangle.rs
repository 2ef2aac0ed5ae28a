//! Triangles produced by the triangulator, and the adjacency test between them.

use serde::{Deserialize, Serialize};

use super::{orient, Point, Segment, EPSILON};

/// A counter-clockwise triangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [Point; 3],
}

impl Triangle {
    /// Build a triangle, reordering the vertices counter-clockwise if needed.
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        if orient(a, b, c) < 0.0 {
            Self { vertices: [a, c, b] }
        } else {
            Self { vertices: [a, b, c] }
        }
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        orient(a, b, c) * 0.5
    }

    pub fn centroid(&self) -> Point {
        let [a, b, c] = self.vertices;
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    pub fn edges(&self) -> [Segment; 3] {
        let [a, b, c] = self.vertices;
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)]
    }

    /// Closed containment (boundary included).
    pub fn contains_point(&self, p: Point) -> bool {
        self.edges()
            .iter()
            .all(|e| orient(e.start, e.end, p) >= -EPSILON * e.length().max(1.0))
    }

    /// Tolerance scaled to the magnitude of the coordinates involved.
    fn tolerance_with(&self, other: &Triangle) -> f64 {
        let magnitude = self
            .vertices
            .iter()
            .chain(other.vertices.iter())
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(1.0, f64::max);
        EPSILON * magnitude
    }

    /// Whether the interiors share a positive area (separating axis test).
    pub fn interiors_overlap(&self, other: &Triangle) -> bool {
        let tolerance = self.tolerance_with(other);
        for edge in self.edges().iter().chain(other.edges().iter()) {
            let normal = (edge.start.y - edge.end.y, edge.end.x - edge.start.x);
            let slack = tolerance * normal.0.hypot(normal.1);
            let (a_min, a_max) = project(&self.vertices, normal);
            let (b_min, b_max) = project(&other.vertices, normal);
            if a_max <= b_min + slack || b_max <= a_min + slack {
                return false;
            }
        }
        true
    }

    /// The intersection with `other`, if and only if it is exactly one line
    /// segment of positive length. Area overlaps and single touching points
    /// yield `None`. The result is canonically ordered.
    pub fn shared_border(&self, other: &Triangle) -> Option<Segment> {
        if self.interiors_overlap(other) {
            return None;
        }
        let tolerance = self.tolerance_with(other);
        // Two convex sets without common area meet in a point or a segment;
        // a segment must come from collinear, overlapping edges.
        for mine in self.edges() {
            for theirs in other.edges() {
                if let Some(border) = collinear_overlap(&mine, &theirs, tolerance) {
                    return Some(border.canonical());
                }
            }
        }
        None
    }
}

fn project(vertices: &[Point; 3], axis: (f64, f64)) -> (f64, f64) {
    vertices
        .iter()
        .map(|p| p.x * axis.0 + p.y * axis.1)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Overlap of two collinear segments, if it has positive length. The
/// endpoints are taken from the input endpoints, never recomputed.
fn collinear_overlap(a: &Segment, b: &Segment, tolerance: f64) -> Option<Segment> {
    let len = a.length();
    if len <= tolerance || b.length() <= tolerance {
        return None;
    }
    let off_line = |p: Point| orient(a.start, a.end, p).abs() / len;
    if off_line(b.start) > tolerance || off_line(b.end) > tolerance {
        return None;
    }

    let dir = ((a.end.x - a.start.x) / len, (a.end.y - a.start.y) / len);
    let along = |p: Point| (p.x - a.start.x) * dir.0 + (p.y - a.start.y) * dir.1;

    let (b_lo, b_hi) = if along(b.start) <= along(b.end) {
        (b.start, b.end)
    } else {
        (b.end, b.start)
    };
    let lo = if along(b_lo) > 0.0 { b_lo } else { a.start };
    let hi = if along(b_hi) < len { b_hi } else { a.end };

    if along(hi) - along(lo) > tolerance {
        Some(Segment::new(lo, hi))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into())
    }

    #[test]
    fn test_new_orders_counter_clockwise() {
        let t = tri((0.0, 0.0), (0.0, 1.0), (1.0, 0.0));
        assert!((t.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shared_edge_is_border() {
        let a = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let b = tri((1.0, 0.0), (1.0, 1.0), (0.0, 1.0));
        let border = a.shared_border(&b).expect("triangles share an edge");
        assert_eq!(border, b.shared_border(&a).unwrap());
        assert_eq!(border, Segment::new(Point::new(0.0, 1.0), Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_partial_edge_overlap_is_border() {
        let a = tri((0.0, 0.0), (4.0, 0.0), (2.0, 2.0));
        let b = tri((1.0, 0.0), (3.0, 0.0), (2.0, -1.0));
        let border = a.shared_border(&b).unwrap();
        assert_eq!(border, Segment::new(Point::new(1.0, 0.0), Point::new(3.0, 0.0)));
    }

    #[test]
    fn test_point_contact_is_not_border() {
        let a = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let b = tri((1.0, 0.0), (2.0, 0.0), (2.0, 1.0));
        assert!(a.shared_border(&b).is_none());
    }

    #[test]
    fn test_area_overlap_is_not_border() {
        let a = tri((0.0, 0.0), (2.0, 0.0), (0.0, 2.0));
        let b = tri((0.5, 0.5), (2.0, 0.5), (0.5, 2.0));
        assert!(a.interiors_overlap(&b));
        assert!(a.shared_border(&b).is_none());
    }

    #[test]
    fn test_disjoint_triangles() {
        let a = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let b = tri((5.0, 5.0), (6.0, 5.0), (5.0, 6.0));
        assert!(!a.interiors_overlap(&b));
        assert!(a.shared_border(&b).is_none());
    }

    #[test]
    fn test_contains_point_includes_boundary() {
        let t = tri((0.0, 0.0), (2.0, 0.0), (0.0, 2.0));
        assert!(t.contains_point(Point::new(0.5, 0.5)));
        assert!(t.contains_point(Point::new(1.0, 1.0)));
        assert!(t.contains_point(Point::new(0.0, 0.0)));
        assert!(!t.contains_point(Point::new(1.5, 1.5)));
    }
}
