// src/spawner/pickup.rs
use bevy::prelude::*;

use super::components::{Diamond, DiamondSpawner};
use crate::player::PlayerController;

#[derive(Resource, Clone, Copy, Debug)]
pub struct PickupSettings {
    pub radius: f32,
}

impl Default for PickupSettings {
    fn default() -> Self {
        Self { radius: 0.8 }
    }
}

/// Score for the current level.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiamondsCollected {
    pub collected: usize,
    /// Diamonds placed by the latest spawner runs.
    pub spawned: usize,
}

impl DiamondsCollected {
    /// Swap one spawner's previous run (`placed`, of which `collected` were
    /// picked up) for a fresh run of `spawned` diamonds.
    pub fn replace_run(&mut self, placed: usize, collected: usize, spawned: usize) {
        self.spawned = self.spawned.saturating_sub(placed) + spawned;
        self.collected = self.collected.saturating_sub(collected);
    }
}

pub fn within_pickup(player: Vec3, diamond: Vec3, radius: f32) -> bool {
    player.distance_squared(diamond) <= radius * radius
}

pub fn collect_diamonds(
    mut commands: Commands,
    settings: Res<PickupSettings>,
    mut score: ResMut<DiamondsCollected>,
    players: Query<&GlobalTransform, With<PlayerController>>,
    diamonds: Query<(Entity, &GlobalTransform, Option<&ChildOf>), With<Diamond>>,
    mut spawners: Query<&mut DiamondSpawner>,
) {
    for player in &players {
        let p = player.translation();
        for (entity, diamond, child_of) in &diamonds {
            if !within_pickup(p, diamond.translation(), settings.radius) {
                continue;
            }
            commands.entity(entity).despawn();
            score.collected += 1;
            if let Some(mut spawner) = child_of.and_then(|c| spawners.get_mut(c.parent()).ok()) {
                spawner.collected += 1;
            }
            debug!("Spawner: collected diamond {entity}");
        }
    }
}

pub fn reset_score(mut score: ResMut<DiamondsCollected>) {
    *score = DiamondsCollected::default();
}
