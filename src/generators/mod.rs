//! Region generators
//!
//! Each generator is a pure function of its parameters and an injected RNG and
//! produces a [`Region`]. Generators know nothing about navigation meshes.
//!
//! - `maze`: backtracking carve over a grid, rescaled to the output box
//! - `dungeon`: non-overlapping rooms joined by L-shaped corridors
//! - `spaghetti`: a connected tangle of randomly thrown halls

pub mod dungeon;
pub mod maze;
pub mod spaghetti;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::geometry::Region;

pub use dungeon::{generate_dungeon, DungeonLayout, DungeonParams};
pub use maze::{generate_maze, MazeLayout, MazeParams};
pub use spaghetti::{generate_spaghetti, Hall, SpaghettiLayout, SpaghettiParams};

/// The generator families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKind {
    Maze,
    Dungeon,
    Spaghetti,
}

impl MapKind {
    pub fn all() -> &'static [MapKind] {
        &[MapKind::Spaghetti, MapKind::Maze, MapKind::Dungeon]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapKind::Maze => "maze",
            MapKind::Dungeon => "dungeon",
            MapKind::Spaghetti => "spaghetti",
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maze" => Ok(MapKind::Maze),
            "dungeon" => Ok(MapKind::Dungeon),
            "spaghetti" => Ok(MapKind::Spaghetti),
            other => Err(MapError::config(format!(
                "unknown map kind '{other}' (expected maze, dungeon or spaghetti)"
            ))),
        }
    }
}

/// Parameters for one generated map, tagged by generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationParams {
    Maze(MazeParams),
    Dungeon(DungeonParams),
    Spaghetti(SpaghettiParams),
}

impl GenerationParams {
    pub fn kind(&self) -> MapKind {
        match self {
            GenerationParams::Maze(_) => MapKind::Maze,
            GenerationParams::Dungeon(_) => MapKind::Dungeon,
            GenerationParams::Spaghetti(_) => MapKind::Spaghetti,
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        match self {
            GenerationParams::Maze(p) => p.validate(),
            GenerationParams::Dungeon(p) => p.validate(),
            GenerationParams::Spaghetti(p) => p.validate(),
        }
    }

    /// File stem for this map: the kind plus its size parameter
    /// (grid side for mazes, room attempts for dungeons, hall count for
    /// spaghetti).
    pub fn map_name(&self) -> String {
        match self {
            GenerationParams::Maze(p) if p.rows == p.cols => format!("maze_{}", p.rows),
            GenerationParams::Maze(p) => format!("maze_{}x{}", p.rows, p.cols),
            GenerationParams::Dungeon(p) => format!("dungeon_{}", p.max_room_attempts),
            GenerationParams::Spaghetti(p) => format!("spaghetti_{}", p.corridor_count),
        }
    }

    /// Run the matching generator and return only the region.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Region, MapError> {
        match self {
            GenerationParams::Maze(p) => generate_maze(p, rng).map(|layout| layout.region),
            GenerationParams::Dungeon(p) => generate_dungeon(p, rng).map(|layout| layout.region),
            GenerationParams::Spaghetti(p) => generate_spaghetti(p, rng).map(|layout| layout.region),
        }
    }
}

impl From<MazeParams> for GenerationParams {
    fn from(params: MazeParams) -> Self {
        GenerationParams::Maze(params)
    }
}

impl From<DungeonParams> for GenerationParams {
    fn from(params: DungeonParams) -> Self {
        GenerationParams::Dungeon(params)
    }
}

impl From<SpaghettiParams> for GenerationParams {
    fn from(params: SpaghettiParams) -> Self {
        GenerationParams::Spaghetti(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_map_names() {
        assert_eq!(GenerationParams::from(MazeParams::new(15, 15, 0.35, 800.0, 800.0)).map_name(), "maze_15");
        assert_eq!(GenerationParams::from(MazeParams::new(4, 6, 0.35, 800.0, 800.0)).map_name(), "maze_4x6");
        assert_eq!(GenerationParams::from(DungeonParams::default()).map_name(), "dungeon_25");
        assert_eq!(
            GenerationParams::from(SpaghettiParams::new(800.0, 800.0, 10, 5.0, 20.0)).map_name(),
            "spaghetti_10"
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("maze".parse::<MapKind>().unwrap(), MapKind::Maze);
        assert_eq!("Dungeon".parse::<MapKind>().unwrap(), MapKind::Dungeon);
        assert!("castle".parse::<MapKind>().is_err());
        for kind in MapKind::all() {
            assert_eq!(kind.to_string().parse::<MapKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_params_json_is_tagged() {
        let params = GenerationParams::from(MazeParams::default());
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"kind\":\"maze\""));
        let back: GenerationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_optional_budgets_default_when_missing() {
        let json = r#"{"kind":"spaghetti","width":800.0,"height":800.0,"corridor_count":3,"min_width":5.0,"max_width":20.0}"#;
        let params: GenerationParams = serde_json::from_str(json).unwrap();
        match params {
            GenerationParams::Spaghetti(p) => assert_eq!(p.max_samples_per_corridor, 10_000),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_generate_dispatches() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for params in [
            GenerationParams::from(MazeParams::new(4, 4, 0.35, 400.0, 400.0)),
            GenerationParams::from(DungeonParams::new(800.0, 800.0, 30.0, 100.0, 10, 0, 10.0)),
            GenerationParams::from(SpaghettiParams::new(800.0, 800.0, 5, 5.0, 20.0)),
        ] {
            let region = params.generate(&mut rng).unwrap();
            assert!(region.area() > 0.0, "{}", params.map_name());
        }
    }
}
