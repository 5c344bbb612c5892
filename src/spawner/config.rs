// src/spawner/config.rs
//! Data-driven spawner tuning + `.spawner.ron` loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::placement::PlacementParams;

/// Collision group bits the level uses (rapier `Group` bits).
pub mod layers {
    pub const GROUND: u32 = 1 << 0;
    pub const OBSTACLE: u32 = 1 << 1;
    pub const PLAYER: u32 = 1 << 2;
}

#[derive(Asset, TypePath, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// How many diamonds to place.
    pub total: usize,
    /// Minimum distance between two diamonds (meters).
    pub min_spacing: f32,
    /// Collision groups the floor ray may hit.
    pub ground_groups: u32,
    /// Collision groups that block a placement.
    pub obstacle_groups: u32,
    /// Ray starts this far above the sample and reaches twice as far down.
    pub raycast_height: f32,
    pub max_attempts_per_diamond: usize,
    /// Tilt instances so local +Y follows the floor normal.
    pub align_to_ground_normal: bool,
    pub use_navmesh_check: bool,
    pub navmesh_max_distance: f32,
    pub obstacle_probe_radius: f32,
    /// Obstacle ball is centred this far above the floor point.
    pub obstacle_probe_lift: f32,
    /// Fixed seed for reproducible layouts; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            total: 20,
            min_spacing: 1.0,
            ground_groups: layers::GROUND,
            obstacle_groups: layers::OBSTACLE,
            raycast_height: 5.0,
            max_attempts_per_diamond: 100,
            align_to_ground_normal: false,
            use_navmesh_check: false,
            navmesh_max_distance: 0.5,
            obstacle_probe_radius: 0.2,
            obstacle_probe_lift: 0.1,
            seed: None,
        }
    }
}

impl SpawnerConfig {
    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            target_count: self.total,
            min_spacing: self.min_spacing,
            max_attempts_per_item: self.max_attempts_per_diamond,
        }
    }
}

#[derive(Default)]
pub struct SpawnerConfigLoader;

impl AssetLoader for SpawnerConfigLoader {
    type Asset = SpawnerConfig;
    type Settings = ();
    type Error = SpawnerConfigLoadError;

    fn extensions(&self) -> &[&str] {
        &["spawner.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_config(&bytes)
    }
}

pub fn parse_config(bytes: &[u8]) -> Result<SpawnerConfig, SpawnerConfigLoadError> {
    ron::de::from_bytes(bytes).map_err(|e| SpawnerConfigLoadError::Ron(e.to_string()))
}

#[derive(thiserror::Error, Debug)]
pub enum SpawnerConfigLoadError {
    #[error("I/O while reading spawner config: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let cfg = parse_config(b"(total: 8, min_spacing: 2.5, seed: Some(99))").unwrap();
        assert_eq!(cfg.total, 8);
        assert_eq!(cfg.min_spacing, 2.5);
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.raycast_height, 5.0);
        assert_eq!(cfg.max_attempts_per_diamond, 100);
        assert!(!cfg.use_navmesh_check);
    }

    #[test]
    fn bad_ron_is_reported() {
        let err = parse_config(b"(total: \"lots\")").unwrap_err();
        assert!(matches!(err, SpawnerConfigLoadError::Ron(_)));
    }

    #[test]
    fn params_mirror_config() {
        let cfg = SpawnerConfig { total: 3, min_spacing: 0.5, max_attempts_per_diamond: 7, ..default() };
        let p = cfg.placement_params();
        assert_eq!((p.target_count, p.min_spacing, p.max_attempts_per_item), (3, 0.5, 7));
        assert_eq!(p.attempt_budget(), 21);
    }
}
