use bevy::prelude::*;

use crate::player::systems::{init_player_camera, player_camera_look, player_movement, player_rotation};
use crate::state::GameState;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, init_player_camera)
            .add_systems(
                Update,
                (player_rotation, player_camera_look.after(player_rotation))
                    .after(crate::input::input_mapping_system)
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(FixedUpdate, player_movement.run_if(in_state(GameState::Running)));
    }
}
