use bevy::prelude::*;

/// Camera-relative character controller driving a dynamic rapier body.
#[derive(Component, Clone, Debug)]
pub struct PlayerController {
    /// Planar speed in m/s.
    pub move_speed: f32,
    /// Slerp rate toward the movement heading (per second).
    pub rotation_speed: f32,
    /// Degrees of yaw (x) / pitch (y) per pixel of mouse motion.
    pub mouse_sensitivity: Vec2,
    pub invert_mouse_y: bool,
    /// Allowed camera pitch in degrees, negative looks up, positive looks down.
    pub pitch_limits: (f32, f32),
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 10.0,
            mouse_sensitivity: Vec2::splat(0.2),
            invert_mouse_y: false,
            pitch_limits: (-30.0, 60.0),
        }
    }
}

/// Marks the camera the controller steers and moves relative to.
#[derive(Component)]
pub struct PlayerCamera;

/// Current downward camera pitch in degrees (only used for a child camera).
#[derive(Component, Default, Deref, DerefMut, Clone, Copy, Debug)]
pub struct CameraPitch(pub f32);
