//! Navigation mesh cells and their identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Segment, Triangle};

/// Identifier of a cell within one mesh. Ids are handed out in insertion
/// order, so a cell's id is also its index in the mesh's cell arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

impl CellId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell_{}", self.0)
    }
}

/// Monotonic id sequence scoped to a single mesh build.
#[derive(Clone, Debug, Default)]
pub struct CellIdGenerator {
    next: usize,
}

impl CellIdGenerator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> CellId {
        let id = CellId(self.next);
        self.next += 1;
        id
    }
}

/// One adjacency link: the neighbouring cell and the border both share.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeighborEdge {
    pub cell: CellId,
    pub border: Segment,
}

/// A convex cell of the mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavMeshCell {
    id: CellId,
    triangle: Triangle,
    neighbors: Vec<NeighborEdge>,
}

impl NavMeshCell {
    pub(crate) fn new(id: CellId, triangle: Triangle) -> Self {
        Self {
            id,
            triangle,
            neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn polygon(&self) -> &Triangle {
        &self.triangle
    }

    pub fn neighbors(&self) -> &[NeighborEdge] {
        &self.neighbors
    }

    /// Border shared with `other`, if the two cells are adjacent.
    pub fn border_with(&self, other: CellId) -> Option<Segment> {
        self.neighbors.iter().find(|n| n.cell == other).map(|n| n.border)
    }

    pub fn centroid(&self) -> Point {
        self.triangle.centroid()
    }

    /// Centroid-to-centroid distance.
    pub fn distance(&self, other: &NavMeshCell) -> f64 {
        self.centroid().distance(other.centroid())
    }

    /// Closed containment: points on the cell's edges count.
    pub fn contains_point(&self, p: Point) -> bool {
        self.triangle.contains_point(p)
    }

    pub(crate) fn add_neighbor(&mut self, cell: CellId, border: Segment) {
        self.neighbors.push(NeighborEdge { cell, border });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_generator() {
        let mut a = CellIdGenerator::new();
        let mut b = CellIdGenerator::new();
        assert_eq!(a.next_id(), CellId(0));
        assert_eq!(a.next_id(), CellId(1));
        // A second build starts over.
        assert_eq!(b.next_id(), CellId(0));
        assert_eq!(CellId(7).to_string(), "Cell_7");
        assert_eq!(b.next_id().index(), 1);
    }

    #[test]
    fn test_border_lookup() {
        let tri = Triangle::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0));
        let mut cell = NavMeshCell::new(CellId(0), tri);
        let border = Segment::new(Point::new(1.0, 0.0), Point::new(0.0, 1.0)).canonical();
        cell.add_neighbor(CellId(1), border);

        assert_eq!(cell.border_with(CellId(1)), Some(border));
        assert_eq!(cell.border_with(CellId(2)), None);
        assert!(cell.contains_point(Point::new(0.5, 0.5)));
        assert!(!cell.contains_point(Point::new(0.8, 0.8)));

        // Centroids (1/3, 1/3) and (4/3, 1/3) sit one unit apart.
        let shifted = Triangle::new(Point::new(1.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 1.0));
        assert!((cell.distance(&NavMeshCell::new(CellId(1), shifted)) - 1.0).abs() < 1e-12);
    }
}
