use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
}

/// Per-frame snapshot of the player's intent, filled by `input_mapping_system`.
#[derive(Default, Resource)]
pub struct ActionState {
    pressed: HashMap<PlayerAction, bool>,
    /// Mouse delta accumulated this frame (pixels, +y = down).
    pub look: Vec2,
}

impl ActionState {
    pub fn set(&mut self, action: PlayerAction, is_pressed: bool) {
        self.pressed.insert(action, is_pressed);
    }

    pub fn pressed(&self, action: PlayerAction) -> bool {
        *self.pressed.get(&action).unwrap_or(&false)
    }

    /// WASD as a stick: x = strafe (right +), y = forward (+). Not normalized.
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.pressed(PlayerAction::MoveForward) { axis.y += 1.0; }
        if self.pressed(PlayerAction::MoveBackward) { axis.y -= 1.0; }
        if self.pressed(PlayerAction::MoveRight) { axis.x += 1.0; }
        if self.pressed(PlayerAction::MoveLeft) { axis.x -= 1.0; }
        axis
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
        self.look = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut state = ActionState::default();
        state.set(PlayerAction::MoveForward, true);
        state.set(PlayerAction::MoveBackward, true);
        state.set(PlayerAction::MoveRight, true);
        assert_eq!(state.move_axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn unset_actions_read_as_released() {
        let state = ActionState::default();
        assert!(!state.pressed(PlayerAction::MoveLeft));
        assert_eq!(state.move_axis(), Vec2::ZERO);
    }
}
