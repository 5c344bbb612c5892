// src/player/mod.rs

mod components;
mod motion;
mod plugin;
mod systems;

pub use components::{CameraPitch, PlayerCamera, PlayerController};
pub use plugin::PlayerPlugin;
