//! Batch configuration for map generation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, PersistenceError};
use crate::generators::{DungeonParams, GenerationParams, MapKind, MazeParams, SpaghettiParams};

/// What one run of the batch generator produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory map files (and PNGs) are written to.
    pub output_dir: PathBuf,

    /// Also write a PNG next to each map file.
    #[serde(default)]
    pub render: bool,

    /// Outline the mesh cells in rendered PNGs.
    #[serde(default)]
    pub draw_cells: bool,

    /// One entry per map to generate.
    pub jobs: Vec<GenerationParams>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let mut jobs: Vec<GenerationParams> = Vec::new();
        for halls in (10..=20).step_by(5) {
            jobs.push(SpaghettiParams::new(800.0, 800.0, halls, 5.0, 20.0).into());
        }
        for side in (5..=30).step_by(5) {
            jobs.push(MazeParams::new(side, side, 0.35, 800.0, 800.0).into());
        }
        for attempts in (5..=45).step_by(10) {
            jobs.push(DungeonParams::new(800.0, 800.0, 30.0, 100.0, attempts, 0, 10.0).into());
        }

        Self {
            output_dir: PathBuf::from("maps"),
            render: false,
            draw_cells: false,
            jobs,
        }
    }
}

impl BatchConfig {
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check every job before any work starts. Map names must be unique
    /// since they become file names.
    pub fn validate(&self) -> Result<(), MapError> {
        let mut names = std::collections::HashSet::new();
        for job in &self.jobs {
            job.validate()?;
            let name = job.map_name();
            if !names.insert(name.clone()) {
                return Err(MapError::config(format!("duplicate map name '{name}' in batch")));
            }
        }
        Ok(())
    }

    /// Keep only the jobs of one generator kind.
    pub fn retain_kind(&mut self, kind: MapKind) {
        self.jobs.retain(|job| job.kind() == kind);
    }
}
