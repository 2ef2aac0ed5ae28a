//! Rings and multi-part regions with holes.

use serde::{Deserialize, Serialize};

use super::{clip, orient, Bounds, Point, Segment, EPSILON};
use crate::error::MapError;

/// Intersections smaller than this are treated as touching, not overlapping.
pub const AREA_TOLERANCE: f64 = 1e-6;

/// A closed ring of vertices. The closing edge from the last vertex back to
/// the first is implicit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[(i + 1) % self.points.len()];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    pub fn is_hole(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Whether every vertex lies on one line (or on one point). Such a ring
    /// bounds no area, however it folds back on itself.
    pub fn is_degenerate(&self) -> bool {
        let Some(&first) = self.points.first() else {
            return true;
        };
        let Some(&second) = self.points.iter().find(|p| p.distance(first) > EPSILON) else {
            return true;
        };
        let len = first.distance(second);
        self.points
            .iter()
            .all(|&p| orient(first, second, p).abs() / len <= EPSILON)
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Winding number of the ring around `p` (Sunday's crossing rule).
    pub fn winding_number(&self, p: Point) -> i32 {
        let mut wn = 0;
        for edge in self.edges() {
            let (a, b) = (edge.start, edge.end);
            if a.y <= p.y {
                if b.y > p.y && orient(a, b, p) > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && orient(a, b, p) < 0.0 {
                wn -= 1;
            }
        }
        wn
    }

    fn map_points(&self, f: impl Fn(Point) -> Point) -> Ring {
        Ring::new(self.points.iter().map(|&p| f(p)).collect())
    }
}

/// A possibly multi-part region with holes.
///
/// Outer rings wind counter-clockwise and holes clockwise, so the interior is
/// exactly the set of points with a non-zero total winding number.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    rings: Vec<Ring>,
}

impl Region {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from rings, dropping any with fewer than three vertices.
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self {
            rings: rings.into_iter().filter(|r| r.len() >= 3).collect(),
        }
    }

    /// Axis-aligned rectangle with its minimum corner at (x, y).
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_rings(vec![Ring::new(vec![
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])])
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }

    pub fn hole_count(&self) -> usize {
        self.rings.iter().filter(|r| r.is_hole()).count()
    }

    /// Total enclosed area (holes subtract).
    pub fn area(&self) -> f64 {
        self.rings.iter().map(Ring::signed_area).sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.rings.iter().flat_map(|r| r.points().iter()))
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.rings.iter().flat_map(Ring::edges)
    }

    pub fn winding_number(&self, p: Point) -> i32 {
        self.rings.iter().map(|r| r.winding_number(p)).sum()
    }

    pub fn on_boundary(&self, p: Point) -> bool {
        self.edges().any(|e| e.distance_to(p) <= EPSILON)
    }

    /// Strict containment: boundary points are NOT contained.
    pub fn contains_point(&self, p: Point) -> bool {
        self.winding_number(p) != 0 && !self.on_boundary(p)
    }

    /// Closed containment: interior or boundary.
    pub fn covers_point(&self, p: Point) -> bool {
        self.winding_number(p) != 0 || self.on_boundary(p)
    }

    /// Whether the segment lies inside the closed region and passes through
    /// its interior somewhere. A segment running only along the boundary is
    /// not contained; a zero-length segment is contained iff its point is.
    pub fn contains_segment(&self, segment: &Segment) -> bool {
        if segment.length() <= EPSILON {
            return self.contains_point(segment.start);
        }
        if !self.covers_point(segment.start) || !self.covers_point(segment.end) {
            return false;
        }

        let mut params = vec![0.0, 1.0];
        for edge in self.edges() {
            params.extend(segment.contact_params(&edge));
        }
        params.sort_by(|a, b| a.total_cmp(b));
        params.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);

        // Between consecutive contacts the segment is wholly inside, outside,
        // or on the boundary; one midpoint decides each piece.
        let mut touches_interior = false;
        for pair in params.windows(2) {
            let mid = segment.point_at((pair[0] + pair[1]) * 0.5);
            if !self.covers_point(mid) {
                return false;
            }
            if self.contains_point(mid) {
                touches_interior = true;
            }
        }
        touches_interior
    }

    /// Whether the closed regions share at least one point.
    pub fn intersects(&self, other: &Region) -> bool {
        let (Some(a), Some(b)) = (self.bounds(), other.bounds()) else {
            return false;
        };
        if !a.intersects(&b) {
            return false;
        }
        for edge in self.edges() {
            if other.edges().any(|o| edge.intersects(&o)) {
                return true;
            }
        }
        // No boundary contact: one is nested in the other or they are apart.
        let nested = |inner: &Region, outer: &Region| {
            inner.rings.iter().filter_map(|r| r.points().first()).any(|&p| outer.covers_point(p))
        };
        nested(self, other) || nested(other, self)
    }

    /// Whether the interiors share a positive area.
    pub fn interiors_overlap(&self, other: &Region) -> Result<bool, MapError> {
        let (Some(a), Some(b)) = (self.bounds(), other.bounds()) else {
            return Ok(false);
        };
        if !a.intersects(&b) {
            return Ok(false);
        }
        Ok(clip::intersection(self, other)?.area() > AREA_TOLERANCE)
    }

    pub fn union(&self, other: &Region) -> Result<Region, MapError> {
        clip::union_all([self, other])
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Region {
        Region {
            rings: self.rings.iter().map(|r| r.map_points(|p| p.translate(dx, dy))).collect(),
        }
    }

    /// Scale about the origin. Factors must be positive so ring orientation
    /// (and with it the outer/hole distinction) is preserved.
    pub fn scale(&self, sx: f64, sy: f64) -> Region {
        Region {
            rings: self
                .rings
                .iter()
                .map(|r| r.map_points(|p| Point::new(p.x * sx, p.y * sy)))
                .collect(),
        }
    }

    /// Translate so the bounding box minimum corner sits at the origin.
    /// Returns the applied offset alongside the moved region.
    pub fn translate_to_origin(&self) -> (Region, (f64, f64)) {
        match self.bounds() {
            Some(b) => (self.translate(-b.min_x, -b.min_y), (-b.min_x, -b.min_y)),
            None => (self.clone(), (0.0, 0.0)),
        }
    }

    /// Translate and rescale so the bounding box becomes exactly
    /// `[0, width] x [0, height]`. Axes with zero extent are only translated.
    pub fn fit_to(&self, width: f64, height: f64) -> Region {
        let Some(b) = self.bounds() else {
            return self.clone();
        };
        let sx = if b.width() > 0.0 { width / b.width() } else { 1.0 };
        let sy = if b.height() > 0.0 { height / b.height() } else { 1.0 };
        let mut fitted = self.translate(-b.min_x, -b.min_y).scale(sx, sy);
        // Pin the extreme coordinates so the box is exact despite rounding.
        for ring in &mut fitted.rings {
            for p in &mut ring.points {
                if b.width() > 0.0 && (p.x - width).abs() <= width * 1e-12 {
                    p.x = width;
                }
                if b.height() > 0.0 && (p.y - height).abs() <= height * 1e-12 {
                    p.y = height;
                }
            }
        }
        fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 square with a 4x4 hole in the middle.
    fn square_with_hole() -> Region {
        let outer = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let hole = Ring::new(vec![
            Point::new(3.0, 3.0),
            Point::new(3.0, 7.0),
            Point::new(7.0, 7.0),
            Point::new(7.0, 3.0),
        ]);
        Region::from_rings(vec![outer, hole])
    }

    #[test]
    fn test_area_subtracts_holes() {
        let region = square_with_hole();
        assert!((region.area() - 84.0).abs() < 1e-12);
        assert_eq!(region.hole_count(), 1);
    }

    #[test]
    fn test_degenerate_rings() {
        let collinear = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)]);
        let folded = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(3.0, 3.0),
        ]);
        assert!(collinear.is_degenerate());
        assert!(folded.is_degenerate());
        assert_eq!(folded.signed_area(), 0.0);
        assert!(!square_with_hole().rings()[1].is_degenerate());
    }

    #[test]
    fn test_boundary_convention() {
        let region = Region::rectangle(0.0, 0.0, 10.0, 10.0);
        let on_edge = Point::new(10.0, 5.0);
        let corner = Point::new(0.0, 0.0);

        assert!(region.contains_point(Point::new(5.0, 5.0)));
        assert!(!region.contains_point(on_edge));
        assert!(!region.contains_point(corner));
        assert!(region.covers_point(on_edge));
        assert!(region.covers_point(corner));
        assert!(!region.covers_point(Point::new(10.5, 5.0)));
    }

    #[test]
    fn test_points_in_hole_are_outside() {
        let region = square_with_hole();
        assert!(!region.contains_point(Point::new(5.0, 5.0)));
        assert!(region.contains_point(Point::new(1.0, 1.0)));
        assert!(!region.contains_point(Point::new(3.0, 5.0)));
    }

    #[test]
    fn test_contains_segment() {
        let region = square_with_hole();
        let clear = Segment::new(Point::new(1.0, 1.0), Point::new(9.0, 1.0));
        let through_hole = Segment::new(Point::new(1.0, 5.0), Point::new(9.0, 5.0));
        let leaving = Segment::new(Point::new(5.0, 1.0), Point::new(12.0, 1.0));
        let along_edge = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let grazing_hole = Segment::new(Point::new(1.0, 3.0), Point::new(9.0, 3.0));

        assert!(region.contains_segment(&clear));
        assert!(!region.contains_segment(&through_hole));
        assert!(!region.contains_segment(&leaving));
        assert!(!region.contains_segment(&along_edge));
        assert!(region.contains_segment(&grazing_hole));
    }

    #[test]
    fn test_zero_length_segment() {
        let region = square_with_hole();
        let p = Point::new(1.5, 8.5);
        assert!(region.contains_segment(&Segment::new(p, p)));
        let q = Point::new(5.0, 5.0);
        assert!(!region.contains_segment(&Segment::new(q, q)));
    }

    #[test]
    fn test_intersects_touching_and_nested() {
        let a = Region::rectangle(0.0, 0.0, 2.0, 2.0);
        let touching = Region::rectangle(2.0, 0.0, 2.0, 2.0);
        let nested = Region::rectangle(0.5, 0.5, 0.5, 0.5);
        let apart = Region::rectangle(5.0, 5.0, 1.0, 1.0);

        assert!(a.intersects(&touching));
        assert!(a.intersects(&nested));
        assert!(nested.intersects(&a));
        assert!(!a.intersects(&apart));
        assert!(!square_with_hole().intersects(&Region::rectangle(4.0, 4.0, 1.0, 1.0)));
    }

    #[test]
    fn test_fit_to_exact_box() {
        let region = Region::rectangle(-3.0, 7.0, 2.5, 0.3).fit_to(800.0, 600.0);
        let b = region.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, 0.0, 800.0, 600.0));
        assert!(region.area() > 0.0);
    }

    #[test]
    fn test_translate_to_origin() {
        let (region, offset) = Region::rectangle(5.0, -2.0, 1.0, 1.0).translate_to_origin();
        assert_eq!(offset, (-5.0, 2.0));
        let b = region.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y), (0.0, 0.0));
    }
}
