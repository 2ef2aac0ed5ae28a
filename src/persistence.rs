//! Map save files.
//!
//! A generated map is stored as JSON together with the seed and parameters
//! that produced it, so it can be regenerated or inspected by hand. Neighbour
//! links are stored as cell ids, so a loaded mesh has the same adjacency graph
//! as the one that was saved.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PersistenceError;
use crate::generators::GenerationParams;
use crate::navmesh::NavMesh;

const SAVE_VERSION: u32 = 1;

/// On-disk layout of a map file.
#[derive(Serialize, Deserialize)]
struct MapSaveFile {
    /// Format version for forward compatibility
    version: u32,
    /// Seed the region was generated from
    seed: u64,
    params: GenerationParams,
    generated_at: DateTime<Utc>,
    mesh: NavMesh,
}

/// A map read back from disk.
#[derive(Debug)]
pub struct LoadedMap {
    pub mesh: NavMesh,
    pub seed: u64,
    pub params: GenerationParams,
    pub generated_at: DateTime<Utc>,
}

/// Path of the save file for `params` inside `dir` (`<map_name>.json`).
pub fn map_path(dir: &Path, params: &GenerationParams) -> PathBuf {
    dir.join(format!("{}.json", params.map_name()))
}

/// Save a built mesh with the seed and parameters that produced it.
pub fn save_map(
    mesh: &NavMesh,
    seed: u64,
    params: &GenerationParams,
    path: &Path,
) -> Result<(), PersistenceError> {
    let save = MapSaveFile {
        version: SAVE_VERSION,
        seed,
        params: params.clone(),
        generated_at: Utc::now(),
        mesh: mesh.clone(),
    };

    let json = serde_json::to_string(&save)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), cells = mesh.len(), "saved map");
    Ok(())
}

/// Load a map file, rejecting newer format versions and meshes whose
/// adjacency links do not line up.
pub fn load_map(path: &Path) -> Result<LoadedMap, PersistenceError> {
    let text = fs::read_to_string(path)?;
    let save: MapSaveFile = serde_json::from_str(&text)?;

    if save.version > SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: save.version,
            supported: SAVE_VERSION,
        });
    }

    save.mesh.check_integrity().map_err(PersistenceError::Corrupt)?;

    Ok(LoadedMap {
        mesh: save.mesh,
        seed: save.seed,
        params: save.params,
        generated_at: save.generated_at,
    })
}
