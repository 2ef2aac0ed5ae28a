//! Region triangulation using Constrained Delaunay Triangulation (CDT).
//!
//! Every ring edge (outer boundaries and holes alike) is inserted into spade's
//! CDT as a constraint, so no triangle crosses the region boundary. Faces whose
//! centroid lies outside the region are then discarded.

use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};
use tracing::warn;

use super::{Point, Region, Ring, Triangle};

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Inserts all ring vertices and adds each ring edge as a constraint.
fn build_constrained_cdt(region: &Region) -> Cdt {
    let mut cdt = Cdt::new();

    // Collinear rings have no interior and would only add overlapping
    // constraints.
    for ring in region.rings().iter().filter(|r| !r.is_degenerate()) {
        let handles: Vec<FixedVertexHandle> = ring
            .points()
            .iter()
            .filter_map(|p| match cdt.insert(Point2::new(p.x, p.y)) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!(x = p.x, y = p.y, error = ?e, "skipping vertex rejected by triangulator");
                    None
                }
            })
            .collect();

        for i in 0..handles.len() {
            let from = handles[i];
            let to = handles[(i + 1) % handles.len()];
            if from == to {
                continue;
            }
            // Crossing constraints would panic inside spade.
            if cdt.can_add_constraint(from, to) {
                cdt.add_constraint(from, to);
            } else {
                warn!(?from, ?to, "skipping boundary edge that crosses an existing constraint");
            }
        }
    }

    cdt
}

/// Triangulates a region (holes respected) into counter-clockwise triangles
/// covering its interior. Empty or zero-area regions yield no triangles.
pub fn triangulate_region(region: &Region) -> Vec<Triangle> {
    if region.vertex_count() < 3 || region.rings().iter().all(Ring::is_degenerate) {
        return Vec::new();
    }

    let cdt = build_constrained_cdt(region);

    cdt.inner_faces()
        .filter_map(|face| {
            let [a, b, c] = face.vertices().map(|v| {
                let pos = v.position();
                Point::new(pos.x, pos.y)
            });
            let triangle = Triangle::new(a, b, c);
            if triangle.area() <= 0.0 {
                return None;
            }
            (region.winding_number(triangle.centroid()) != 0).then_some(triangle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ring;

    #[test]
    fn test_square_splits_into_two_triangles() {
        let triangles = triangulate_region(&Region::rectangle(0.0, 0.0, 4.0, 4.0));
        assert_eq!(triangles.len(), 2);
        let area: f64 = triangles.iter().map(Triangle::area).sum();
        assert!((area - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_is_not_covered() {
        let outer = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let hole = Ring::new(vec![
            Point::new(4.0, 4.0),
            Point::new(4.0, 6.0),
            Point::new(6.0, 6.0),
            Point::new(6.0, 4.0),
        ]);
        let region = Region::from_rings(vec![outer, hole]);
        let triangles = triangulate_region(&region);

        let area: f64 = triangles.iter().map(Triangle::area).sum();
        assert!((area - region.area()).abs() < 1e-9);
        assert!(triangles.iter().all(|t| !t.contains_point(Point::new(5.0, 5.0))));
    }

    #[test]
    fn test_concave_region_respects_boundary() {
        // U shape: the notch between the arms must stay uncovered.
        let ring = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 6.0),
            Point::new(4.0, 6.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 6.0),
            Point::new(0.0, 6.0),
        ]);
        let region = Region::from_rings(vec![ring]);
        let triangles = triangulate_region(&region);
        let area: f64 = triangles.iter().map(Triangle::area).sum();
        assert!((area - region.area()).abs() < 1e-9);
        assert!(triangles.iter().all(|t| !t.contains_point(Point::new(3.0, 4.0))));
    }

    #[test]
    fn test_collinear_rings_are_skipped() {
        let line = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)]);
        assert!(triangulate_region(&Region::from_rings(vec![line.clone()])).is_empty());

        // A stray collinear ring next to a real square leaves the square intact.
        let mut rings = Region::rectangle(0.0, 1.0, 2.0, 2.0).rings().to_vec();
        rings.push(line);
        let triangles = triangulate_region(&Region::from_rings(rings));
        let area: f64 = triangles.iter().map(Triangle::area).sum();
        assert!((area - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_region_has_no_triangles() {
        assert!(triangulate_region(&Region::empty()).is_empty());
    }
}
