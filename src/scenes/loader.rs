// src/scenes/loader.rs
//! Name-based scene switching on top of `AppScene` states.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::state::AppScene;

/// Scene names as the menus refer to them.
#[derive(Resource, Clone, Debug)]
pub struct SceneNames {
    pub game: String,
    pub settings: String,
    pub credits: String,
    pub main_menu: String,
}

impl Default for SceneNames {
    fn default() -> Self {
        Self {
            game: "Game".to_string(),
            settings: "Settings".to_string(),
            credits: "Credits".to_string(),
            main_menu: "MainMenu".to_string(),
        }
    }
}

impl SceneNames {
    pub fn lookup(&self, name: &str) -> Option<AppScene> {
        if name == self.game {
            Some(AppScene::Game)
        } else if name == self.settings {
            Some(AppScene::Settings)
        } else if name == self.credits {
            Some(AppScene::Credits)
        } else if name == self.main_menu {
            Some(AppScene::MainMenu)
        } else {
            None
        }
    }

    /// Resolve a request against the currently active scene.
    pub fn resolve(&self, request: &LoadScene, active: AppScene) -> Result<AppScene, SceneError> {
        let target = match request {
            LoadScene::Named(name) => self
                .lookup(name)
                .ok_or_else(|| SceneError::UnknownScene(name.clone()))?,
            LoadScene::Scene(scene) => *scene,
            LoadScene::ReloadActive => active,
        };
        if target == AppScene::Loading {
            return Err(SceneError::NotLoadable(target));
        }
        Ok(target)
    }
}

/// Replace the active scene (single mode: the old one is torn down).
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub enum LoadScene {
    Named(String),
    Scene(AppScene),
    ReloadActive,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("no scene named '{0}'")]
    UnknownScene(String),
    #[error("{0:?} cannot be loaded directly")]
    NotLoadable(AppScene),
}

/// Facade the menus call into; each call queues a [`LoadScene`] or an exit.
#[derive(SystemParam)]
pub struct SceneLoader<'w> {
    names: Res<'w, SceneNames>,
    loads: EventWriter<'w, LoadScene>,
    exit: EventWriter<'w, AppExit>,
}

impl SceneLoader<'_> {
    pub fn load_game(&mut self) {
        let name = self.names.game.clone();
        self.loads.write(LoadScene::Named(name));
    }

    pub fn load_settings(&mut self) {
        let name = self.names.settings.clone();
        self.loads.write(LoadScene::Named(name));
    }

    pub fn load_credits(&mut self) {
        let name = self.names.credits.clone();
        self.loads.write(LoadScene::Named(name));
    }

    pub fn load_main_menu(&mut self) {
        let name = self.names.main_menu.clone();
        self.loads.write(LoadScene::Named(name));
    }

    pub fn reload_active(&mut self) {
        self.loads.write(LoadScene::ReloadActive);
    }

    pub fn quit_game(&mut self) {
        info!("Scenes: quit requested");
        self.exit.write(AppExit::Success);
    }
}

/// Where to go once the `Loading` hop has torn the old scene down.
#[derive(Resource, Default, Debug)]
pub struct PendingScene(pub Option<AppScene>);

pub fn apply_scene_requests(
    mut requests: EventReader<LoadScene>,
    names: Res<SceneNames>,
    current: Res<State<AppScene>>,
    mut next: ResMut<NextState<AppScene>>,
    mut pending: ResMut<PendingScene>,
) {
    // Last request in a frame wins.
    let Some(request) = requests.read().last() else { return; };
    let active = *current.get();

    let target = match names.resolve(request, active) {
        Ok(target) => target,
        Err(err) => {
            error!("Scenes: {err}");
            return;
        }
    };

    if target == active {
        pending.0 = Some(target);
        next.set(AppScene::Loading);
        info!("Scenes: reloading {:?}", target);
    } else {
        next.set(target);
        info!("Scenes: loading {:?}", target);
    }
}

/// OnEnter(Loading): continue to the scene that asked to be rebuilt.
pub fn finish_reload(mut pending: ResMut<PendingScene>, mut next: ResMut<NextState<AppScene>>) {
    let target = pending.0.take().unwrap_or_default();
    next.set(target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn resolves_names_and_reload() {
        let names = SceneNames::default();
        assert_eq!(names.resolve(&LoadScene::Named("Game".into()), AppScene::MainMenu), Ok(AppScene::Game));
        assert_eq!(names.resolve(&LoadScene::ReloadActive, AppScene::Credits), Ok(AppScene::Credits));
        assert_eq!(
            names.resolve(&LoadScene::Named("Boss".into()), AppScene::MainMenu),
            Err(SceneError::UnknownScene("Boss".into()))
        );
        assert_eq!(
            names.resolve(&LoadScene::Scene(AppScene::Loading), AppScene::Game),
            Err(SceneError::NotLoadable(AppScene::Loading))
        );
    }

    #[derive(Resource, Default)]
    struct GameEnters(u32);

    fn count_enter(mut enters: ResMut<GameEnters>) {
        enters.0 += 1;
    }

    fn scene_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppScene>()
            .add_event::<LoadScene>()
            .init_resource::<SceneNames>()
            .init_resource::<PendingScene>()
            .init_resource::<GameEnters>()
            .add_systems(Update, apply_scene_requests)
            .add_systems(OnEnter(AppScene::Loading), finish_reload)
            .add_systems(OnEnter(AppScene::Game), count_enter);
        app
    }

    fn active(app: &App) -> AppScene {
        *app.world().resource::<State<AppScene>>().get()
    }

    #[test]
    fn named_load_switches_scene() {
        let mut app = scene_app();
        app.update();
        assert_eq!(active(&app), AppScene::MainMenu);

        app.world_mut().send_event(LoadScene::Named("Game".into()));
        app.update();
        app.update();
        assert_eq!(active(&app), AppScene::Game);
        assert_eq!(app.world().resource::<GameEnters>().0, 1);
    }

    #[test]
    fn reloading_active_scene_rebuilds_it() {
        let mut app = scene_app();
        app.world_mut().send_event(LoadScene::Scene(AppScene::Game));
        app.update();
        app.update();
        assert_eq!(app.world().resource::<GameEnters>().0, 1);

        app.world_mut().send_event(LoadScene::ReloadActive);
        for _ in 0..4 {
            app.update();
        }
        assert_eq!(active(&app), AppScene::Game);
        assert_eq!(app.world().resource::<GameEnters>().0, 2);
    }

    #[test]
    fn unknown_name_keeps_current_scene() {
        let mut app = scene_app();
        app.world_mut().send_event(LoadScene::Named("Nowhere".into()));
        app.update();
        app.update();
        assert_eq!(active(&app), AppScene::MainMenu);
    }
}
