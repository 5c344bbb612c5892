use bevy::prelude::*;

use super::loader::{apply_scene_requests, finish_reload, LoadScene, PendingScene, SceneNames};
use super::menu::{menu_actions, spawn_credits, spawn_main_menu, spawn_menu_camera, spawn_settings};
use crate::state::{AppScene, GameState};

pub struct ScenesPlugin;

impl Plugin for ScenesPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppScene>()
            .add_sub_state::<GameState>()
            .enable_state_scoped_entities::<AppScene>()
            .init_resource::<SceneNames>()
            .init_resource::<PendingScene>()
            .add_event::<LoadScene>()
            .add_systems(OnEnter(AppScene::MainMenu), (spawn_menu_camera, spawn_main_menu))
            .add_systems(OnEnter(AppScene::Settings), (spawn_menu_camera, spawn_settings))
            .add_systems(OnEnter(AppScene::Credits), (spawn_menu_camera, spawn_credits))
            .add_systems(OnEnter(AppScene::Loading), finish_reload)
            .add_systems(Update, menu_actions.run_if(not(in_state(AppScene::Game))))
            .add_systems(PostUpdate, apply_scene_requests);
    }
}
