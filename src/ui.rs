use bevy::prelude::*;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::ui::BackgroundColor;

use crate::spawner::DiamondsCollected;
use crate::state::AppScene;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.18);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.55, 0.35);

#[derive(Component)]
pub struct PauseOverlay;

/// What a pause-menu button does when clicked.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseMenuAction {
    Resume,
    RestartLevel,
    MainMenu,
    Quit,
}

#[derive(Component)]
pub struct DiamondCounterText;

/// Fullscreen dimmed node with a centered column, used by every menu screen.
pub fn fullscreen_column(alpha: f32) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(12.0),
            ..default()
        },
        BackgroundColor(Color::linear_rgba(0.0, 0.0, 0.0, alpha)),
    )
}

pub fn spawn_title(parent: &mut ChildSpawnerCommands, text: &str, size: f32) {
    parent.spawn((
        Text::new(text),
        TextFont { font_size: size, ..default() },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
    ));
}

pub fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, action: impl Component) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(260.0),
                height: Val::Px(52.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            action,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont { font_size: 26.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn button_feedback_system(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut color) in &mut buttons {
        color.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

pub fn spawn_pause_overlay(mut commands: Commands) {
    commands
        .spawn((fullscreen_column(0.7), PauseOverlay))
        .with_children(|parent| {
            spawn_title(parent, "Paused", 64.0);
            spawn_button(parent, "Resume", PauseMenuAction::Resume);
            spawn_button(parent, "Restart Level", PauseMenuAction::RestartLevel);
            spawn_button(parent, "Main Menu", PauseMenuAction::MainMenu);
            spawn_button(parent, "Quit", PauseMenuAction::Quit);
        });
}

pub fn despawn_pause_overlay(
    mut commands: Commands,
    query: Query<Entity, With<PauseOverlay>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Diamonds: 0"),
        TextFont { font_size: 28.0, ..default() },
        TextColor(Color::srgb(1.0, 0.9, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            ..default()
        },
        DiamondCounterText,
        StateScoped(AppScene::Game),
    ));
}

pub fn update_hud(
    collected: Res<DiamondsCollected>,
    mut texts: Query<&mut Text, With<DiamondCounterText>>,
) {
    if !collected.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = format!("Diamonds: {} / {}", collected.collected, collected.spawned);
    }
}
