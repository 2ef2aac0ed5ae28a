//! Grid maze carving
//!
//! A randomized backtracking walk over a 4-connected grid picks which grid
//! connections become corridors. The carved connections are drawn as line
//! segments between grid nodes, buffered into blocky corridors, simplified and
//! finally stretched to fill the requested output box exactly.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::MapError;
use crate::geometry::clip::{self, Join};
use crate::geometry::{Point, Region};
use crate::random::RandomSource;

/// Chance per step that the walk may connect to any neighbour, closing loops.
pub const DEFAULT_LOOP_CHANCE: f64 = 0.2;

/// Grid spacing used while buffering. clipper2 rounds to 0.01 units, so the
/// grid is blown up before buffering and the final fit scales it back down.
const GRID_UNIT: f64 = 100.0;

/// Simplification tolerance in grid steps.
const SIMPLIFY_TOLERANCE: f64 = 0.01;

fn default_loop_chance() -> f64 {
    DEFAULT_LOOP_CHANCE
}

/// Parameters for [`generate_maze`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeParams {
    /// Grid rows (at least 1).
    pub rows: usize,
    /// Grid columns (at least 1).
    pub cols: usize,
    /// Corridor half-width in grid steps.
    pub half_width: f64,
    /// Output width; the final region spans exactly `[0, width]`.
    pub width: f64,
    /// Output height; the final region spans exactly `[0, height]`.
    pub height: f64,
    /// Probability per step of allowing a connection back into visited cells.
    #[serde(default = "default_loop_chance")]
    pub loop_chance: f64,
}

impl MazeParams {
    pub fn new(rows: usize, cols: usize, half_width: f64, width: f64, height: f64) -> Self {
        Self {
            rows,
            cols,
            half_width,
            width,
            height,
            loop_chance: DEFAULT_LOOP_CHANCE,
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MapError::config(format!(
                "maze grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(self.half_width > 0.0) {
            return Err(MapError::config(format!(
                "maze corridor half-width must be positive, got {}",
                self.half_width
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(MapError::config(format!(
                "maze output size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.loop_chance) {
            return Err(MapError::config(format!(
                "maze loop chance must be within [0, 1], got {}",
                self.loop_chance
            )));
        }
        Ok(())
    }
}

impl Default for MazeParams {
    fn default() -> Self {
        Self::new(15, 15, 0.35, 800.0, 800.0)
    }
}

/// A carved maze: the grid connections and the resulting corridor region.
#[derive(Clone, Debug)]
pub struct MazeLayout {
    pub rows: usize,
    pub cols: usize,
    /// Grid index (`row * cols + col`) where the walk started.
    pub start: usize,
    /// Carved connections as `(low index, high index)` pairs, sorted.
    pub edges: Vec<(usize, usize)>,
    pub region: Region,
}

/// Grid index of a (row, col) pair.
pub fn rc_to_index(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// (row, col) of a grid index.
pub fn index_to_rc(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// 4-connected adjacency lists for a `rows x cols` grid.
fn grid_neighbors(rows: usize, cols: usize) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::with_capacity(4); rows * cols];
    for row in 0..rows {
        for col in 0..cols {
            let idx = rc_to_index(row, col, cols);
            if row > 0 {
                neighbors[idx].push(rc_to_index(row - 1, col, cols));
            }
            if row + 1 < rows {
                neighbors[idx].push(rc_to_index(row + 1, col, cols));
            }
            if col > 0 {
                neighbors[idx].push(rc_to_index(row, col - 1, cols));
            }
            if col + 1 < cols {
                neighbors[idx].push(rc_to_index(row, col + 1, cols));
            }
        }
    }
    neighbors
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Run the backtracking walk and return the start cell and carved connections.
///
/// Each step either records a new connection or pops a dead end, so the walk
/// takes at most `cells + grid edges` steps.
pub fn carve_connections<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    loop_chance: f64,
    rng: &mut R,
) -> Result<(usize, BTreeSet<(usize, usize)>), MapError> {
    if rows == 0 || cols == 0 {
        return Err(MapError::config(format!(
            "maze grid must have at least one row and column, got {rows}x{cols}"
        )));
    }
    let neighbors = grid_neighbors(rows, cols);
    let start = rng.index(rows * cols);

    // Visited = currently on the stack or already closed.
    let mut visited = vec![false; rows * cols];
    let mut connections = BTreeSet::new();
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(&cell) = stack.last() {
        let candidates: Vec<usize> = if rng.chance(loop_chance) {
            neighbors[cell]
                .iter()
                .copied()
                .filter(|&n| !connections.contains(&edge_key(cell, n)))
                .collect()
        } else {
            neighbors[cell].iter().copied().filter(|&n| !visited[n]).collect()
        };

        let Some(&next) = rng.pick(&candidates) else {
            trace!(cell, "dead end, backtracking");
            stack.pop();
            continue;
        };

        connections.insert(edge_key(cell, next));
        // Loop connections into visited territory are carved but not explored.
        if !visited[next] {
            visited[next] = true;
            stack.push(next);
        }
    }

    Ok((start, connections))
}

/// Carve a maze and build its corridor region.
pub fn generate_maze<R: Rng + ?Sized>(params: &MazeParams, rng: &mut R) -> Result<MazeLayout, MapError> {
    params.validate()?;

    let (start, connections) = carve_connections(params.rows, params.cols, params.loop_chance, rng)?;
    let cols = params.cols;
    let node = |idx: usize| {
        let (row, col) = index_to_rc(idx, cols);
        Point::new(col as f64 * GRID_UNIT, row as f64 * GRID_UNIT)
    };

    let half_width = params.half_width * GRID_UNIT;
    let corridors = if connections.is_empty() {
        // A single-cell grid has nothing to connect; keep the lone node's square.
        let c = node(start);
        Region::rectangle(c.x - half_width, c.y - half_width, 2.0 * half_width, 2.0 * half_width)
    } else {
        let lines: Vec<Vec<Point>> = connections.iter().map(|&(a, b)| vec![node(a), node(b)]).collect();
        clip::buffer_polylines(&lines, half_width, Join::Square)
    };

    let simplified = clip::simplify(&corridors, SIMPLIFY_TOLERANCE * GRID_UNIT);
    let region = simplified.fit_to(params.width, params.height);

    debug!(
        rows = params.rows,
        cols = params.cols,
        connections = connections.len(),
        vertices = region.vertex_count(),
        holes = region.hole_count(),
        "carved maze"
    );

    Ok(MazeLayout {
        rows: params.rows,
        cols: params.cols,
        start,
        edges: connections.into_iter().collect(),
        region,
    })
}
