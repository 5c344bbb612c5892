use bevy::prelude::*;

use super::config::{SpawnerConfig, SpawnerConfigLoader};
use super::gizmos::{draw_spawner_gizmos, toggle_spawner_gizmos, SpawnerGizmos};
use super::nav::NavRegions;
use super::pickup::{collect_diamonds, reset_score, DiamondsCollected, PickupSettings};
use super::systems::{
    apply_loaded_configs, init_new_spawners, respawn_hotkey, spawn_diamonds, tick_pending_spawns,
};
use crate::state::{AppScene, GameState};

/// "Spawn now" for one `DiamondSpawner` entity.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnDiamonds(pub Entity);

pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<SpawnerConfig>()
            .register_asset_loader(SpawnerConfigLoader)
            .add_event::<SpawnDiamonds>()
            .init_resource::<NavRegions>()
            .init_resource::<SpawnerGizmos>()
            .init_resource::<PickupSettings>()
            .init_resource::<DiamondsCollected>()
            .add_systems(OnEnter(AppScene::Game), reset_score)
            .add_systems(
                Update,
                (
                    init_new_spawners,
                    apply_loaded_configs.after(init_new_spawners),
                    tick_pending_spawns.after(apply_loaded_configs),
                    respawn_hotkey.run_if(in_state(GameState::Running)),
                    spawn_diamonds.after(tick_pending_spawns).after(respawn_hotkey),
                ),
            )
            .add_systems(
                Update,
                (collect_diamonds, toggle_spawner_gizmos).run_if(in_state(GameState::Running)),
            )
            .add_systems(PostUpdate, draw_spawner_gizmos);
    }
}
