use bevy::prelude::*;

use super::config::SpawnerConfig;
use crate::placement::SpawnVolume;

/// Box region diamonds may be sampled in, local to the entity's transform.
#[derive(Component, Clone, Copy, Debug)]
pub struct SpawnArea {
    pub center: Vec3,
    /// Full size; the sampled half-extents are `size * 0.5`.
    pub size: Vec3,
}

impl SpawnArea {
    pub fn volume(&self, global: &GlobalTransform) -> SpawnVolume {
        SpawnVolume::new(self.center, self.size * 0.5, global.affine())
    }
}

/// Rendering for one spawned diamond.
#[derive(Clone, Debug)]
pub struct DiamondPrefab {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Places `config.total` diamonds inside `areas`; spawned diamonds become children.
#[derive(Component, Clone, Debug, Default)]
pub struct DiamondSpawner {
    pub config: SpawnerConfig,
    /// Entities carrying a [`SpawnArea`].
    pub areas: Vec<Entity>,
    pub prefab: Option<DiamondPrefab>,
    /// Positions accepted by the last run.
    pub placed: Vec<Vec3>,
    /// Diamonds from the last run the player has picked up.
    pub collected: usize,
}

/// Take `DiamondSpawner::config` from this asset once it loads (and on hot reload).
#[derive(Component, Clone, Debug)]
pub struct SpawnerConfigHandle(pub Handle<SpawnerConfig>);

/// Marker on every spawned diamond.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Diamond;
