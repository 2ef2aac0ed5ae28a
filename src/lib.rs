//! Region generation and navigation mesh library
//!
//! Generates 2D playable regions (mazes, dungeons, spaghetti caves) and
//! decomposes them into navigation meshes. Re-exports modules for use by
//! binaries and tools.

pub mod agents;
pub mod config;
pub mod error;
pub mod generators;
pub mod geometry;
pub mod navmesh;
pub mod persistence;
pub mod random;
pub mod render;
pub mod seeds;

pub use error::{MapError, PersistenceError};
pub use generators::{GenerationParams, MapKind};
pub use geometry::{Point, Region};
pub use navmesh::{CellId, NavMesh, NavMeshCell};

/// Installs the fmt subscriber used by the binaries. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
