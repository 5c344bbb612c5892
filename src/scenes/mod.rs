// src/scenes/mod.rs

mod loader;
mod menu;
mod plugin;

pub use loader::{LoadScene, SceneError, SceneLoader, SceneNames};
pub use plugin::ScenesPlugin;
