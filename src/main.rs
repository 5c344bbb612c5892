use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

mod setup;
mod input;
mod actions;
mod state;
mod ui;
mod pause;
mod placement;
mod grounding;
mod player;
mod scenes;
mod spawner;

use actions::ActionState;
use grounding::GroundingPlugin;
use input::input_mapping_system;
use pause::PausePlugin;
use player::PlayerPlugin;
use scenes::ScenesPlugin;
use spawner::SpawnerPlugin;
use state::{AppScene, GameState};
use ui::{button_feedback_system, spawn_hud, update_hud};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Diamond Run".to_string(),
                ..default()
            }),
            ..default()
        }))
        // physics: rays, overlaps, the player's rigid body
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // states + scene switching first; everything else keys off them
        .add_plugins(ScenesPlugin)
        .add_plugins(PausePlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(SpawnerPlugin)
        .add_plugins(GroundingPlugin)
        .init_resource::<ActionState>()
        // level + HUD are rebuilt each time the game scene is entered
        .add_systems(OnEnter(AppScene::Game), (setup::setup_level, spawn_hud))
        .add_systems(Update, input_mapping_system.run_if(in_state(GameState::Running)))
        .add_systems(Update, (button_feedback_system, update_hud))
        .run();
}
