//! Seed management for batch map generation
//!
//! A batch run has one master seed. Every map (and every auxiliary draw such as
//! agent spawn points) gets its own seed derived from the master and a label,
//! so a single map can be regenerated without re-running the whole batch.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for one batch of generated maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
}

impl MapSeeds {
    pub fn from_master(master: u64) -> Self {
        Self { master }
    }

    /// Seed for generating the map with the given name (e.g. `maze_15`).
    pub fn for_map(&self, map_name: &str) -> u64 {
        derive_seed(self.master, map_name)
    }

    /// Seed for sampling agent spawn positions on a given map.
    pub fn for_spawns(&self, map_name: &str) -> u64 {
        derive_seed(self.for_map(map_name), "spawns")
    }
}

impl Default for MapSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a sub-seed from a master seed and a label.
/// Uses hashing so different labels get different but deterministic seeds.
pub fn derive_seed(master: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for MapSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapSeeds {{ master: {} }}", self.master)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = MapSeeds::from_master(12345);
        let seeds2 = MapSeeds::from_master(12345);

        assert_eq!(seeds1.for_map("maze_5"), seeds2.for_map("maze_5"));
        assert_eq!(seeds1.for_spawns("maze_5"), seeds2.for_spawns("maze_5"));
    }

    #[test]
    fn test_different_maps_get_different_seeds() {
        let seeds = MapSeeds::from_master(12345);

        assert_ne!(seeds.for_map("maze_5"), seeds.for_map("maze_10"));
        assert_ne!(seeds.for_map("dungeon_5"), seeds.for_map("spaghetti_5"));
        assert_ne!(seeds.for_map("maze_5"), seeds.for_spawns("maze_5"));
    }
}
