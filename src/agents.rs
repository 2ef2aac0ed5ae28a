//! Agent-facing helpers for the hide-and-seek game.
//!
//! Agents never mutate the mesh; they hold it through an `Arc` and only run
//! queries, so any number of agents (on any threads) can share one build.
//! Deciding *where* to move is left to the agent implementations.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::MapError;
use crate::geometry::{Point, Segment};
use crate::navmesh::NavMesh;

pub const SEEKER_SPEED: f64 = 3.0;
pub const HIDER_SPEED: f64 = SEEKER_SPEED * 0.9;
/// Seeker-hider distance at which a visible hider is caught.
pub const TAG_DISTANCE: f64 = 10.0;
/// Samples allowed when looking for a hidden hider start.
pub const DEFAULT_SPAWN_BUDGET: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Seeker,
    Hider,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Seeker => f.write_str("seeker"),
            Role::Hider => f.write_str("hider"),
        }
    }
}

/// Static description of an agent, fixed at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub role: Role,
    pub max_speed: f64,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, role: Role, max_speed: f64) -> Self {
        Self {
            name: name.into(),
            role,
            max_speed,
        }
    }

    pub fn seeker(name: impl Into<String>) -> Self {
        Self::new(name, Role::Seeker, SEEKER_SPEED)
    }

    pub fn hider(name: impl Into<String>) -> Self {
        Self::new(name, Role::Hider, HIDER_SPEED)
    }

    pub fn is_seeker(&self) -> bool {
        self.role == Role::Seeker
    }
}

/// What an agent is told about the world each frame. The hider position is
/// `None` when the seeker cannot see it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub seeker_position: Point,
    pub hider_position: Option<Point>,
    pub frame: u64,
}

/// Snapshot for the seeker: the hider is included only when in sight.
pub fn observe(mesh: &NavMesh, seeker: Point, hider: Point, frame: u64) -> WorldState {
    let visible = mesh.has_line_of_sight(seeker, hider);
    WorldState {
        seeker_position: seeker,
        hider_position: visible.then_some(hider),
        frame,
    }
}

/// Sample a hider start that the seeker cannot see.
pub fn hidden_spawn<R: Rng + ?Sized>(
    mesh: &NavMesh,
    seeker: Point,
    rng: &mut R,
    budget: usize,
) -> Result<Point, MapError> {
    for attempt in 0..budget {
        let candidate = mesh.random_position(rng)?;
        if !mesh.has_line_of_sight(seeker, candidate) {
            trace!(attempt, "found hidden spawn");
            return Ok(candidate);
        }
    }
    Err(MapError::ProbabilisticTimeout {
        operation: "hidden spawn sampling",
        attempts: budget,
    })
}

/// Apply a requested move. It is legal iff it is no longer than `max_speed`
/// and the straight path stays inside the region; illegal moves return `None`
/// and the agent stays put.
pub fn try_step(mesh: &NavMesh, from: Point, delta: (f64, f64), max_speed: f64) -> Option<Point> {
    let to = from.translate(delta.0, delta.1);
    let path = Segment::new(from, to);
    if path.length() > max_speed {
        return None;
    }
    mesh.region().contains_segment(&path).then_some(to)
}

/// The seeker wins once the hider is within `tag_distance` and visible.
pub fn is_tagged(mesh: &NavMesh, seeker: Point, hider: Point, tag_distance: f64) -> bool {
    seeker.distance(hider) <= tag_distance && mesh.has_line_of_sight(seeker, hider)
}

/// An agent bound to a shared, read-only mesh.
#[derive(Clone, Debug)]
pub struct Agent {
    pub profile: AgentProfile,
    mesh: Arc<NavMesh>,
}

impl Agent {
    pub fn new(profile: AgentProfile, mesh: Arc<NavMesh>) -> Self {
        Self { profile, mesh }
    }

    pub fn mesh(&self) -> &NavMesh {
        &self.mesh
    }

    pub fn is_seeker(&self) -> bool {
        self.profile.is_seeker()
    }

    /// [`try_step`] with this agent's speed limit.
    pub fn try_step(&self, from: Point, delta: (f64, f64)) -> Option<Point> {
        try_step(&self.mesh, from, delta, self.profile.max_speed)
    }
}
