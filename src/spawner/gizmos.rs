// src/spawner/gizmos.rs
//! Debug view of spawn areas and the last accepted positions.

use bevy::math::Isometry3d;
use bevy::prelude::*;

use super::components::{DiamondSpawner, SpawnArea};

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct SpawnerGizmos {
    pub enabled: bool,
}

pub fn toggle_spawner_gizmos(keys: Res<ButtonInput<KeyCode>>, mut gizmos: ResMut<SpawnerGizmos>) {
    if keys.just_pressed(KeyCode::F3) {
        gizmos.enabled = !gizmos.enabled;
        info!("Spawner: gizmos {}", if gizmos.enabled { "on" } else { "off" });
    }
}

pub fn draw_spawner_gizmos(
    mut gizmos: Gizmos,
    settings: Res<SpawnerGizmos>,
    spawners: Query<&DiamondSpawner>,
    areas: Query<(&SpawnArea, &GlobalTransform)>,
) {
    if !settings.enabled {
        return;
    }
    for spawner in &spawners {
        for &area_entity in &spawner.areas {
            let Ok((area, global)) = areas.get(area_entity) else { continue; };
            let local = Transform::from_translation(area.center).with_scale(area.size);
            gizmos.cuboid(global.mul_transform(local), Color::srgba(0.0, 0.6, 1.0, 0.6));
        }
        for &p in &spawner.placed {
            gizmos.sphere(Isometry3d::from_translation(p), 0.15, Color::srgb(1.0, 0.92, 0.016));
        }
    }
}
