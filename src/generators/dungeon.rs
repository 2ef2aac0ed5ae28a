//! Room-and-corridor dungeon generation
//!
//! Rooms are random axis-aligned rectangles placed without retries: a room
//! whose interior overlaps an earlier room is simply dropped. Each accepted
//! room is wired to a random earlier room with an L-shaped corridor, unless it
//! already sits on an existing corridor.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::MapError;
use crate::geometry::clip::{self, Join};
use crate::geometry::{Point, Region};
use crate::random::RandomSource;

fn default_max_point_samples() -> usize {
    1_000
}

/// Parameters for [`generate_dungeon`].
///
/// `width` and `height` only bound where rooms may be placed; the finished
/// region is moved to the origin but not rescaled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonParams {
    pub width: f64,
    pub height: f64,
    pub min_room_size: f64,
    pub max_room_size: f64,
    /// Number of placement attempts (rejected rooms are not retried).
    pub max_room_attempts: usize,
    /// Corridors added between random distinct rooms after placement.
    pub extra_corridors: usize,
    pub tunnel_width: f64,
    /// Budget for rejection-sampling one corridor endpoint inside a room.
    #[serde(default = "default_max_point_samples")]
    pub max_point_samples: usize,
}

impl DungeonParams {
    pub fn new(
        width: f64,
        height: f64,
        min_room_size: f64,
        max_room_size: f64,
        max_room_attempts: usize,
        extra_corridors: usize,
        tunnel_width: f64,
    ) -> Self {
        Self {
            width,
            height,
            min_room_size,
            max_room_size,
            max_room_attempts,
            extra_corridors,
            tunnel_width,
            max_point_samples: default_max_point_samples(),
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(MapError::config(format!(
                "dungeon size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.min_room_size > 0.0) {
            return Err(MapError::config(format!(
                "minimum room size must be positive, got {}",
                self.min_room_size
            )));
        }
        if self.min_room_size > self.max_room_size {
            return Err(MapError::config(format!(
                "minimum room size {} exceeds maximum {}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_room_size > self.width || self.max_room_size > self.height {
            return Err(MapError::config(format!(
                "maximum room size {} does not fit in {}x{}",
                self.max_room_size, self.width, self.height
            )));
        }
        if !(self.tunnel_width > 0.0) {
            return Err(MapError::config(format!(
                "tunnel width must be positive, got {}",
                self.tunnel_width
            )));
        }
        if self.min_room_size <= self.tunnel_width {
            return Err(MapError::config(format!(
                "rooms ({}) must be wider than tunnels ({}) to hold corridor endpoints",
                self.min_room_size, self.tunnel_width
            )));
        }
        if self.max_point_samples == 0 {
            return Err(MapError::config("corridor endpoint sample budget must be non-zero"));
        }
        Ok(())
    }
}

impl Default for DungeonParams {
    fn default() -> Self {
        Self::new(800.0, 800.0, 30.0, 100.0, 25, 0, 10.0)
    }
}

/// A generated dungeon in final (origin-aligned) coordinates.
#[derive(Clone, Debug)]
pub struct DungeonLayout {
    pub rooms: Vec<Region>,
    pub corridors: Vec<Region>,
    pub region: Region,
}

/// Rejection-sample a point inside `room`, at least `margin` from its bounding
/// box edges.
fn random_point_in<R: Rng + ?Sized>(
    room: &Region,
    margin: f64,
    budget: usize,
    rng: &mut R,
) -> Result<Point, MapError> {
    let Some(b) = room.bounds() else {
        return Err(MapError::Geometry("cannot sample inside an empty room".into()));
    };
    for _ in 0..budget {
        let p = Point::new(
            rng.uniform(b.min_x + margin, b.max_x - margin),
            rng.uniform(b.min_y + margin, b.max_y - margin),
        );
        if room.contains_point(p) {
            return Ok(p);
        }
    }
    Err(MapError::ProbabilisticTimeout {
        operation: "corridor endpoint sampling",
        attempts: budget,
    })
}

/// L-shaped corridor between random points of two rooms.
fn tunnel_between<R: Rng + ?Sized>(
    from: &Region,
    to: &Region,
    params: &DungeonParams,
    rng: &mut R,
) -> Result<Region, MapError> {
    let half = params.tunnel_width / 2.0;
    let a = random_point_in(from, half, params.max_point_samples, rng)?;
    let b = random_point_in(to, half, params.max_point_samples, rng)?;

    let elbow = if rng.chance(0.5) {
        // Horizontal first, then vertical.
        Point::new(b.x, a.y)
    } else {
        Point::new(a.x, b.y)
    };
    Ok(clip::buffer_polyline(&[a, elbow, b], half, Join::Miter))
}

/// Place rooms, connect them, and union everything into one region.
pub fn generate_dungeon<R: Rng + ?Sized>(
    params: &DungeonParams,
    rng: &mut R,
) -> Result<DungeonLayout, MapError> {
    params.validate()?;

    let mut rooms: Vec<Region> = Vec::new();
    let mut corridors: Vec<Region> = Vec::new();
    let mut room_union = Region::empty();
    let mut corridor_union = Region::empty();

    for attempt in 0..params.max_room_attempts {
        let room_width = rng.uniform(params.min_room_size, params.max_room_size);
        let room_height = rng.uniform(params.min_room_size, params.max_room_size);
        let x = rng.uniform(0.0, params.width - room_width);
        let y = rng.uniform(0.0, params.height - room_height);
        let room = Region::rectangle(x, y, room_width, room_height);

        if room.interiors_overlap(&room_union)? {
            trace!(attempt, "room overlaps an earlier room, dropped");
            continue;
        }

        if !rooms.is_empty() && !room.interiors_overlap(&corridor_union)? {
            let target = rng.index(rooms.len());
            let corridor = tunnel_between(&room, &rooms[target], params, rng)?;
            corridor_union = corridor_union.union(&corridor)?;
            corridors.push(corridor);
        }

        room_union = room_union.union(&room)?;
        rooms.push(room);
    }

    if rooms.len() >= 2 {
        for _ in 0..params.extra_corridors {
            let a = rng.index(rooms.len());
            let mut b = rng.index(rooms.len() - 1);
            if b >= a {
                b += 1;
            }
            corridors.push(tunnel_between(&rooms[a], &rooms[b], params, rng)?);
        }
    } else if params.extra_corridors > 0 {
        warn!(
            rooms = rooms.len(),
            extra_corridors = params.extra_corridors,
            "not enough rooms for extra corridors, skipping"
        );
    }

    let merged = clip::union_all(rooms.iter().chain(corridors.iter()))?;
    let (region, (dx, dy)) = merged.translate_to_origin();

    debug!(
        attempts = params.max_room_attempts,
        rooms = rooms.len(),
        corridors = corridors.len(),
        area = region.area(),
        "generated dungeon"
    );

    Ok(DungeonLayout {
        rooms: rooms.iter().map(|r| r.translate(dx, dy)).collect(),
        corridors: corridors.iter().map(|c| c.translate(dx, dy)).collect(),
        region,
    })
}
