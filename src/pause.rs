// src/pause.rs
//! Escape-toggled pause: stops virtual time, shows the overlay, frees the cursor.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::input::{clear_actions, pause_toggle_system};
use crate::scenes::SceneLoader;
use crate::state::{AppScene, GameState};
use crate::ui::{despawn_pause_overlay, spawn_pause_overlay, PauseMenuAction};

#[derive(Resource, Clone, Debug)]
pub struct PauseSettings {
    /// Lock and hide the cursor while playing.
    pub lock_cursor_in_gameplay: bool,
}

impl Default for PauseSettings {
    fn default() -> Self {
        Self { lock_cursor_in_gameplay: true }
    }
}

/// Grab mode and visibility for gameplay (`true`) or menus (`false`).
pub fn cursor_mode(gameplay: bool, lock_in_gameplay: bool) -> (CursorGrabMode, bool) {
    if gameplay && lock_in_gameplay {
        (CursorGrabMode::Locked, false)
    } else {
        (CursorGrabMode::None, true)
    }
}

fn apply_cursor(window: &mut Window, gameplay: bool, settings: &PauseSettings) {
    let (grab_mode, visible) = cursor_mode(gameplay, settings.lock_cursor_in_gameplay);
    window.cursor_options.grab_mode = grab_mode;
    window.cursor_options.visible = visible;
}

fn gameplay_cursor(settings: Res<PauseSettings>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.single_mut() {
        apply_cursor(&mut window, true, &settings);
    }
}

fn menu_cursor(settings: Res<PauseSettings>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.single_mut() {
        apply_cursor(&mut window, false, &settings);
    }
}

pub fn freeze_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

pub fn restore_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

pub fn pause_menu_actions(
    interactions: Query<(&Interaction, &PauseMenuAction), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut time: ResMut<Time<Virtual>>,
    mut scenes: SceneLoader,
) {
    for (interaction, action) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            PauseMenuAction::Resume => next_state.set(GameState::Running),
            PauseMenuAction::RestartLevel => {
                time.unpause();
                scenes.reload_active();
            }
            PauseMenuAction::MainMenu => {
                time.unpause();
                scenes.load_main_menu();
            }
            PauseMenuAction::Quit => scenes.quit_game(),
        }
    }
}

pub struct PausePlugin;

impl Plugin for PausePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PauseSettings>()
            .add_systems(OnEnter(AppScene::Game), gameplay_cursor)
            .add_systems(OnExit(AppScene::Game), (restore_time, menu_cursor))
            .add_systems(
                OnEnter(GameState::Paused),
                (freeze_time, spawn_pause_overlay, menu_cursor, clear_actions),
            )
            .add_systems(
                OnExit(GameState::Paused),
                (restore_time, despawn_pause_overlay, gameplay_cursor),
            )
            .add_systems(
                Update,
                (pause_toggle_system, pause_menu_actions).run_if(in_state(AppScene::Game)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::{LoadScene, SceneNames};
    use bevy::state::app::StatesPlugin;

    #[test]
    fn cursor_is_locked_only_in_gameplay_when_enabled() {
        assert_eq!(cursor_mode(true, true), (CursorGrabMode::Locked, false));
        assert_eq!(cursor_mode(true, false), (CursorGrabMode::None, true));
        assert_eq!(cursor_mode(false, true), (CursorGrabMode::None, true));
    }

    fn paused_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_state(AppScene::Game)
            .add_sub_state::<GameState>()
            .init_resource::<PauseSettings>()
            .add_systems(OnEnter(GameState::Paused), freeze_time)
            .add_systems(OnExit(GameState::Paused), restore_time)
            .add_systems(Update, pause_toggle_system.run_if(in_state(AppScene::Game)));
        app
    }

    /// One frame with Escape just pressed, then a frame for the transition.
    fn tap_escape(app: &mut App) {
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Escape);
        app.update();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::Escape);
        keys.clear();
        app.update();
    }

    #[test]
    fn escape_toggles_pause_and_virtual_time() {
        let mut app = paused_app();
        app.update();
        assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Running);

        tap_escape(&mut app);
        assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Paused);
        assert!(app.world().resource::<Time<Virtual>>().is_paused());

        tap_escape(&mut app);
        assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Running);
        assert!(!app.world().resource::<Time<Virtual>>().is_paused());
    }

    fn menu_app(action: PauseMenuAction) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_state(AppScene::Game)
            .add_sub_state::<GameState>()
            .add_event::<LoadScene>()
            .init_resource::<SceneNames>()
            .add_systems(Update, pause_menu_actions);
        app.world_mut().spawn((Interaction::Pressed, action));
        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        app
    }

    fn sent_loads(app: &App) -> Vec<LoadScene> {
        let events = app.world().resource::<Events<LoadScene>>();
        events.get_cursor().read(events).cloned().collect()
    }

    #[test]
    fn restart_unpauses_before_reloading() {
        let mut app = menu_app(PauseMenuAction::RestartLevel);
        app.update();
        assert!(!app.world().resource::<Time<Virtual>>().is_paused());
        assert_eq!(sent_loads(&app), vec![LoadScene::ReloadActive]);
    }

    #[test]
    fn main_menu_unpauses_before_loading() {
        let mut app = menu_app(PauseMenuAction::MainMenu);
        app.update();
        assert!(!app.world().resource::<Time<Virtual>>().is_paused());
        assert_eq!(sent_loads(&app), vec![LoadScene::Named("MainMenu".into())]);
    }
}
