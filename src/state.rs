use bevy::prelude::*;

/// Top-level screen the app is showing. Entities spawned for a scene carry
/// `StateScoped(scene)` and are torn down when it is left.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppScene {
    #[default]
    MainMenu,
    Game,
    Settings,
    Credits,
    /// One-frame hop used to reload the active scene.
    Loading,
}

/// Gameplay sub-state; only exists while `AppScene::Game` is active.
#[derive(SubStates, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[source(AppScene = AppScene::Game)]
pub enum GameState {
    #[default]
    Running,
    Paused,
}
