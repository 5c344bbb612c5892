// src/scenes/menu.rs
//! Main menu, settings and credits screens.

use bevy::prelude::*;

use super::loader::SceneLoader;
use crate::pause::PauseSettings;
use crate::state::AppScene;
use crate::ui::{fullscreen_column, spawn_button, spawn_title};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Settings,
    Credits,
    Back,
    ToggleCursorLock,
    Quit,
}

#[derive(Component)]
pub struct CursorLockLabel;

#[derive(Component)]
pub struct MenuCamera;

/// UI-only screens still need a camera to render.
pub fn spawn_menu_camera(mut commands: Commands, current: Res<State<AppScene>>) {
    commands.spawn((Camera2d, MenuCamera, StateScoped(*current.get())));
}

pub fn spawn_main_menu(mut commands: Commands) {
    commands
        .spawn((fullscreen_column(0.0), StateScoped(AppScene::MainMenu)))
        .with_children(|parent| {
            spawn_title(parent, "Diamond Run", 72.0);
            spawn_button(parent, "Play", MenuAction::Play);
            spawn_button(parent, "Settings", MenuAction::Settings);
            spawn_button(parent, "Credits", MenuAction::Credits);
            spawn_button(parent, "Quit", MenuAction::Quit);
        });
}

fn cursor_lock_label(lock: bool) -> String {
    format!("Lock cursor: {}", if lock { "on" } else { "off" })
}

pub fn spawn_settings(mut commands: Commands, settings: Res<PauseSettings>) {
    commands
        .spawn((fullscreen_column(0.0), StateScoped(AppScene::Settings)))
        .with_children(|parent| {
            spawn_title(parent, "Settings", 56.0);
            parent.spawn((
                Text::new(cursor_lock_label(settings.lock_cursor_in_gameplay)),
                TextFont { font_size: 24.0, ..default() },
                TextColor(Color::WHITE),
                CursorLockLabel,
            ));
            spawn_button(parent, "Toggle cursor lock", MenuAction::ToggleCursorLock);
            spawn_button(parent, "Back", MenuAction::Back);
        });
}

pub fn spawn_credits(mut commands: Commands) {
    commands
        .spawn((fullscreen_column(0.0), StateScoped(AppScene::Credits)))
        .with_children(|parent| {
            spawn_title(parent, "Credits", 56.0);
            spawn_title(parent, "Built with Bevy and Rapier", 24.0);
            spawn_button(parent, "Back", MenuAction::Back);
        });
}

pub fn menu_actions(
    interactions: Query<(&Interaction, &MenuAction), Changed<Interaction>>,
    mut scenes: SceneLoader,
    mut settings: ResMut<PauseSettings>,
    mut labels: Query<&mut Text, With<CursorLockLabel>>,
) {
    for (interaction, action) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            MenuAction::Play => scenes.load_game(),
            MenuAction::Settings => scenes.load_settings(),
            MenuAction::Credits => scenes.load_credits(),
            MenuAction::Back => scenes.load_main_menu(),
            MenuAction::ToggleCursorLock => {
                settings.lock_cursor_in_gameplay = !settings.lock_cursor_in_gameplay;
                for mut text in &mut labels {
                    text.0 = cursor_lock_label(settings.lock_cursor_in_gameplay);
                }
            }
            MenuAction::Quit => scenes.quit_game(),
        }
    }
}
