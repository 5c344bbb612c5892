// src/player/motion.rs
//! Camera-relative movement math, kept free of ECS queries.

use bevy::prelude::*;

/// Below this input magnitude the controller treats the stick as idle.
pub const INPUT_DEADZONE: f32 = 0.1;

/// Flatten the camera axes onto the XZ plane.
pub fn planar_basis(camera_forward: Vec3, camera_right: Vec3) -> (Vec3, Vec3) {
    let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
    let right = Vec3::new(camera_right.x, 0.0, camera_right.z).normalize_or_zero();
    (forward, right)
}

/// Normalized world direction for a move axis (x = strafe, y = forward).
pub fn move_direction(forward: Vec3, right: Vec3, input: Vec2) -> Vec3 {
    (forward * input.y + right * input.x).normalize_or_zero()
}

/// New body velocity: planar part from `direction`, vertical part kept so gravity still acts.
pub fn target_velocity(current: Vec3, direction: Vec3, speed: f32) -> Vec3 {
    if direction.length() > INPUT_DEADZONE {
        let mut v = direction * speed;
        v.y = current.y;
        v
    } else {
        Vec3::new(0.0, current.y, 0.0)
    }
}

/// Rotation whose -Z faces `direction` on the horizontal plane.
pub fn heading_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Transform::IDENTITY.looking_to(flat, Vec3::Y).rotation)
}

/// Step `current` toward `target` by `rate * dt` (clamped to a full step).
pub fn turn_toward(current: Quat, target: Quat, rate: f32, dt: f32) -> Quat {
    current.slerp(target, (rate * dt).clamp(0.0, 1.0))
}

/// Apply vertical mouse motion to a downward pitch and clamp it.
/// `look_y` is screen-space (+ = mouse moved down).
pub fn apply_pitch(pitch: f32, look_y: f32, sensitivity: f32, invert: bool, limits: (f32, f32)) -> f32 {
    let mut delta = look_y * sensitivity;
    if invert {
        delta = -delta;
    }
    (pitch + delta).clamp(limits.0, limits.1)
}

/// Yaw change in radians for horizontal mouse motion; mouse right turns right.
pub fn yaw_delta(look_x: f32, sensitivity: f32) -> f32 {
    -(look_x * sensitivity).to_radians()
}

/// Local camera rotation for a downward pitch in degrees.
pub fn pitch_rotation(pitch_down_deg: f32) -> Quat {
    Quat::from_rotation_x(-pitch_down_deg.to_radians())
}

/// Inverse of [`pitch_rotation`].
pub fn pitch_from_rotation(rotation: Quat) -> f32 {
    let (x, _, _) = rotation.to_euler(EulerRot::XYZ);
    -x.to_degrees()
}
