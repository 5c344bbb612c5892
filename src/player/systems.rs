// src/player/systems.rs

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use super::components::{CameraPitch, PlayerCamera, PlayerController};
use super::motion::{
    apply_pitch, heading_rotation, move_direction, pitch_from_rotation, pitch_rotation,
    planar_basis, target_velocity, turn_toward, yaw_delta, INPUT_DEADZONE,
};
use crate::actions::ActionState;

/// Seed the pitch from a child camera's current local rotation.
pub fn init_player_camera(
    mut players: Query<(Entity, &mut CameraPitch), Added<PlayerController>>,
    cameras: Query<(&Transform, &ChildOf), With<PlayerCamera>>,
) {
    for (player, mut pitch) in &mut players {
        let Some((tf, _)) = cameras.iter().find(|(_, child_of)| child_of.parent() == player) else {
            info!("Player: no child camera, movement follows the free camera");
            continue;
        };
        **pitch = pitch_from_rotation(tf.rotation);
        info!("Player: camera is a child of the player, using parent-child camera");
    }
}

/// FixedUpdate: set planar velocity from input, relative to the camera heading.
pub fn player_movement(
    action_state: Res<ActionState>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut players: Query<(&PlayerController, &mut Velocity)>,
) {
    let Ok(camera) = cameras.single() else { return; };
    let (forward, right) = planar_basis(*camera.forward(), *camera.right());
    let direction = move_direction(forward, right, action_state.move_axis());

    for (controller, mut velocity) in &mut players {
        velocity.linvel = target_velocity(velocity.linvel, direction, controller.move_speed);
    }
}

/// Turn the body toward the direction it is being driven.
pub fn player_rotation(
    time: Res<Time>,
    action_state: Res<ActionState>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut players: Query<(&PlayerController, &mut Transform)>,
) {
    let input = action_state.move_axis();
    if input.length() <= INPUT_DEADZONE {
        return;
    }
    let Ok(camera) = cameras.single() else { return; };
    let (forward, right) = planar_basis(*camera.forward(), *camera.right());
    let Some(target) = heading_rotation(move_direction(forward, right, input)) else { return; };

    for (controller, mut tf) in &mut players {
        tf.rotation = turn_toward(tf.rotation, target, controller.rotation_speed, time.delta_secs());
    }
}

/// Mouse look: pitch the child camera, yaw the body. A camera that is not a
/// child of the player is left alone.
pub fn player_camera_look(
    action_state: Res<ActionState>,
    mut players: Query<(Entity, &PlayerController, &mut CameraPitch, &mut Transform)>,
    mut cameras: Query<(&mut Transform, &ChildOf), (With<PlayerCamera>, Without<PlayerController>)>,
) {
    let look = action_state.look;
    for (mut cam_tf, child_of) in &mut cameras {
        let Ok((_, controller, mut pitch, mut body)) = players.get_mut(child_of.parent()) else {
            continue;
        };

        **pitch = apply_pitch(
            **pitch,
            look.y,
            controller.mouse_sensitivity.y,
            controller.invert_mouse_y,
            controller.pitch_limits,
        );
        cam_tf.rotation = pitch_rotation(**pitch);
        body.rotate_y(yaw_delta(look.x, controller.mouse_sensitivity.x));
    }
}
