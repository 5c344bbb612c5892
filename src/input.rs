use bevy::input::mouse::MouseMotion;
use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;

use crate::actions::{ActionState, PlayerAction};
use crate::state::GameState;

pub fn input_mapping_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut action_state: ResMut<ActionState>,
) {
    action_state.set(PlayerAction::MoveForward, keys.pressed(KeyCode::KeyW));
    action_state.set(PlayerAction::MoveBackward, keys.pressed(KeyCode::KeyS));
    action_state.set(PlayerAction::MoveLeft, keys.pressed(KeyCode::KeyA));
    action_state.set(PlayerAction::MoveRight, keys.pressed(KeyCode::KeyD));

    action_state.look = motion_evr.read().map(|ev| ev.delta).sum();
}

/// Drop held keys and look delta so nothing leaks across a pause.
pub fn clear_actions(mut action_state: ResMut<ActionState>) {
    action_state.clear();
}

pub fn pause_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    current_state: Res<State<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::Running => {
                next_state.set(GameState::Paused);
                info!("Paused game");
            }
            GameState::Paused => {
                next_state.set(GameState::Running);
                info!("Resumed game");
            }
        }
    }
}
