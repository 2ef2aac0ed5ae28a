//! Navigation mesh built from a finished region
//!
//! The region is triangulated and every triangle becomes a [`NavMeshCell`].
//! Cells live in a single arena (`Vec`) indexed by [`CellId`]; adjacency is
//! stored as ids plus the shared border, so the cyclic neighbour graph needs no
//! shared ownership. Once built the mesh is never mutated, so it can be shared
//! freely between readers (e.g. behind an `Arc`).

pub mod cell;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MapError;
use crate::geometry::triangulate::triangulate_region;
use crate::geometry::{Point, Region, Segment};
use crate::random::RandomSource;

pub use cell::{CellId, CellIdGenerator, NavMeshCell, NeighborEdge};

/// Default number of samples [`NavMesh::random_position`] may draw.
pub const DEFAULT_POSITION_BUDGET: usize = 100_000;

/// A region decomposed into triangular cells with an adjacency graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavMesh {
    region: Region,
    cells: Vec<NavMeshCell>,
}

impl NavMesh {
    /// Triangulate `region` and build the cell adjacency graph.
    ///
    /// Each new cell is compared against every existing cell; a neighbour
    /// link is recorded on both sides iff the two triangles meet in exactly
    /// one segment. Empty or zero-area regions produce a mesh with no cells.
    pub fn new(region: Region) -> Self {
        let triangles = triangulate_region(&region);
        let mut ids = CellIdGenerator::new();
        let mut cells: Vec<NavMeshCell> = Vec::with_capacity(triangles.len());
        let mut links = 0usize;

        for triangle in triangles {
            let id = ids.next_id();
            let mut cell = NavMeshCell::new(id, triangle);
            for existing in cells.iter_mut() {
                if let Some(border) = existing.polygon().shared_border(&triangle) {
                    existing.add_neighbor(id, border);
                    cell.add_neighbor(existing.id(), border);
                    links += 1;
                }
            }
            cells.push(cell);
        }

        debug!(
            cells = cells.len(),
            links,
            area = region.area(),
            "built navigation mesh"
        );

        Self { region, cells }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn cells(&self) -> &[NavMeshCell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&NavMeshCell> {
        self.cells.get(id.index()).filter(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of undirected neighbour links.
    pub fn neighbor_edge_count(&self) -> usize {
        self.cells.iter().map(|c| c.neighbors().len()).sum::<usize>() / 2
    }

    /// Whether the region strictly contains `p`. Points on the region
    /// boundary (outer edges and hole edges) are NOT contained.
    pub fn contains(&self, p: Point) -> bool {
        self.region.contains_point(p)
    }

    /// First cell whose closed triangle contains `p`, in arena order. A point
    /// on a border shared by several cells resolves to the lowest id.
    pub fn find_cell(&self, p: Point) -> Option<&NavMeshCell> {
        self.cells.iter().find(|c| c.contains_point(p))
    }

    /// Uniform point strictly inside the region, by rejection sampling over
    /// its bounding box with the default budget.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point, MapError> {
        self.random_position_with_budget(rng, DEFAULT_POSITION_BUDGET)
    }

    pub fn random_position_with_budget<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        budget: usize,
    ) -> Result<Point, MapError> {
        let Some(bounds) = self.region.bounds() else {
            return Err(MapError::ProbabilisticTimeout {
                operation: "random position sampling on an empty region",
                attempts: 0,
            });
        };
        for _ in 0..budget {
            let p = Point::new(
                rng.uniform(bounds.min_x, bounds.max_x),
                rng.uniform(bounds.min_y, bounds.max_y),
            );
            if self.region.contains_point(p) {
                return Ok(p);
            }
        }
        Err(MapError::ProbabilisticTimeout {
            operation: "random position sampling",
            attempts: budget,
        })
    }

    /// Whether the straight segment `a -> b` stays inside the region. This is
    /// a direct containment test on the region, not a walk over cells.
    pub fn has_line_of_sight(&self, a: Point, b: Point) -> bool {
        self.region.contains_segment(&Segment::new(a, b))
    }

    /// Sum of cell areas; equals the region area up to triangulation.
    pub fn cell_area(&self) -> f64 {
        self.cells.iter().map(|c| c.polygon().area()).sum()
    }

    /// Check the arena invariants of a mesh that did not come from
    /// [`NavMesh::new`] (e.g. one read back from disk): ids match arena
    /// positions, links point at existing cells and are mirrored with the same
    /// border.
    pub fn check_integrity(&self) -> Result<(), String> {
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.id().index() != index {
                return Err(format!("{} stored at position {index}", cell.id()));
            }
            for link in cell.neighbors() {
                let Some(other) = self.cell(link.cell) else {
                    return Err(format!("{} links to missing {}", cell.id(), link.cell));
                };
                if other.border_with(cell.id()) != Some(link.border) {
                    return Err(format!("link {} -> {} is not mirrored", cell.id(), link.cell));
                }
            }
        }
        Ok(())
    }
}
