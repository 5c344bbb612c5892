// src/spawner/systems.rs
//! Spawner lifecycle: config intake, deferred first run, and the spawn itself.

use bevy::asset::AssetLoadFailedEvent;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::{Diamond, DiamondSpawner, SpawnArea, SpawnerConfigHandle};
use super::config::SpawnerConfig;
use super::nav::NavRegions;
use super::pickup::DiamondsCollected;
use super::plugin::SpawnDiamonds;
use crate::placement::{
    sample_placements, FloorHit, FloorProbe, NavProjector, ObstacleQuery, PlacementError,
    PlacementReport, SpawnVolume,
};

/// Frames to wait after a spawner appears so rapier has its colliders indexed.
pub const PHYSICS_SETTLE_FRAMES: u8 = 2;

/// Spawner waiting for physics to settle before its automatic run.
#[derive(Component, Clone, Copy, Debug)]
pub struct PendingSpawn(pub u8);

impl Default for PendingSpawn {
    fn default() -> Self {
        Self(PHYSICS_SETTLE_FRAMES)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SpawnerError {
    #[error("no diamond prefab assigned")]
    MissingPrefab,
    #[error("add at least one SpawnArea to the spawner")]
    NoSpawnAreas,
    #[error("no physics context to probe against")]
    NoPhysics,
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Resolve the spawner's area entities; missing or area-less entities are skipped.
pub fn collect_volumes(
    spawner: &DiamondSpawner,
    areas: &Query<(&SpawnArea, &GlobalTransform)>,
) -> Vec<SpawnVolume> {
    spawner
        .areas
        .iter()
        .filter_map(|&e| match areas.get(e) {
            Ok((area, global)) => Some(area.volume(global)),
            Err(_) => {
                warn!("Spawner: area entity {e} has no SpawnArea, skipping");
                None
            }
        })
        .collect()
}

/// Seeded rng for one run; the seed is returned so it can be logged.
pub fn spawner_rng(config: &SpawnerConfig) -> (ChaCha8Rng, u64) {
    let seed = config.seed.unwrap_or_else(rand::random);
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

/// World queries one spawner run places against.
#[derive(Clone, Copy)]
pub struct Probes<'a> {
    pub floor: &'a dyn FloorProbe,
    pub obstacles: &'a dyn ObstacleQuery,
    pub nav: Option<&'a dyn NavProjector>,
}

/// Validate and run placement for one spawner.
pub fn plan_spawn(
    spawner: &DiamondSpawner,
    volumes: &[SpawnVolume],
    probes: Probes,
    rng: &mut ChaCha8Rng,
) -> Result<PlacementReport, SpawnerError> {
    if spawner.prefab.is_none() {
        return Err(SpawnerError::MissingPrefab);
    }
    if volumes.is_empty() {
        return Err(SpawnerError::NoSpawnAreas);
    }
    let params = spawner.config.placement_params();
    Ok(sample_placements(&params, volumes, probes.floor, probes.obstacles, probes.nav, rng)?)
}

/// Orientation for a spawned instance.
pub fn instance_rotation(normal: Vec3, align_to_normal: bool) -> Quat {
    let n = normal.normalize_or_zero();
    if align_to_normal && n != Vec3::ZERO {
        Quat::from_rotation_arc(Vec3::Y, n)
    } else {
        Quat::IDENTITY
    }
}

fn group_filter(bits: u32) -> QueryFilter<'static> {
    QueryFilter::new().groups(CollisionGroups::new(Group::ALL, Group::from_bits_truncate(bits)))
}

/// Downward ray parameters for a sample: (origin, max distance).
pub fn floor_ray(sample: Vec3, raycast_height: f32) -> (Vec3, f32) {
    (sample + Vec3::Y * raycast_height, raycast_height * 2.0)
}

/// Spawners get their first run once physics has settled; spawners fed by a
/// config asset wait for it instead.
pub fn init_new_spawners(
    mut commands: Commands,
    configs: Res<Assets<SpawnerConfig>>,
    mut spawners: Query<(Entity, &mut DiamondSpawner, Option<&SpawnerConfigHandle>), Added<DiamondSpawner>>,
) {
    for (entity, mut spawner, handle) in &mut spawners {
        match handle {
            Some(handle) => {
                // Already cached from an earlier load: no asset event will come.
                if let Some(cfg) = configs.get(&handle.0) {
                    spawner.config = cfg.clone();
                    commands.entity(entity).insert(PendingSpawn::default());
                }
            }
            None => {
                commands.entity(entity).insert(PendingSpawn::default());
            }
        }
    }
}

pub fn apply_loaded_configs(
    mut commands: Commands,
    mut loaded: EventReader<AssetEvent<SpawnerConfig>>,
    mut failed: EventReader<AssetLoadFailedEvent<SpawnerConfig>>,
    configs: Res<Assets<SpawnerConfig>>,
    mut spawners: Query<(Entity, &mut DiamondSpawner, &SpawnerConfigHandle)>,
) {
    for ev in loaded.read() {
        let id = match ev {
            AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id } => *id,
            _ => continue,
        };
        let Some(cfg) = configs.get(id) else { continue; };
        for (entity, mut spawner, handle) in &mut spawners {
            if handle.0.id() == id {
                spawner.config = cfg.clone();
                commands.entity(entity).insert(PendingSpawn::default());
                info!("Spawner: config loaded (total={}, min_spacing={})", cfg.total, cfg.min_spacing);
            }
        }
    }

    for ev in failed.read() {
        warn!("Spawner: failed to load config '{}': {}; using defaults", ev.path, ev.error);
        for (entity, _, handle) in &spawners {
            if handle.0.id() == ev.id {
                commands.entity(entity).insert(PendingSpawn::default());
            }
        }
    }
}

pub fn tick_pending_spawns(
    mut commands: Commands,
    mut pending: Query<(Entity, &mut PendingSpawn)>,
    mut requests: EventWriter<SpawnDiamonds>,
) {
    for (entity, mut wait) in &mut pending {
        if wait.0 > 0 {
            wait.0 -= 1;
            continue;
        }
        commands.entity(entity).remove::<PendingSpawn>();
        requests.write(SpawnDiamonds(entity));
    }
}

pub fn respawn_hotkey(
    keys: Res<ButtonInput<KeyCode>>,
    spawners: Query<Entity, With<DiamondSpawner>>,
    mut requests: EventWriter<SpawnDiamonds>,
) {
    if keys.just_pressed(KeyCode::F5) {
        requests.write_batch(spawners.iter().map(SpawnDiamonds));
    }
}

/// Distinct spawner entities named by this frame's requests.
pub fn requested_spawners(requests: &mut EventReader<SpawnDiamonds>) -> Vec<Entity> {
    let mut targets: Vec<Entity> = requests.read().map(|r| r.0).collect();
    targets.sort();
    targets.dedup();
    targets
}

/// One spawn run: plan against `probes`, then swap the spawner's old diamonds
/// for the new set. On error nothing is despawned.
pub fn run_spawner(
    commands: &mut Commands,
    (spawner_entity, spawner, spawner_global): (Entity, &mut DiamondSpawner, &GlobalTransform),
    volumes: &[SpawnVolume],
    probes: Probes,
    existing: &Query<(Entity, &ChildOf), With<Diamond>>,
    score: &mut DiamondsCollected,
) -> Result<PlacementReport, SpawnerError> {
    let (mut rng, seed) = spawner_rng(&spawner.config);
    let report = plan_spawn(spawner, volumes, probes, &mut rng)?;
    let Some(prefab) = spawner.prefab.clone() else {
        return Err(SpawnerError::MissingPrefab);
    };

    for (diamond, child_of) in existing {
        if child_of.parent() == spawner_entity {
            commands.entity(diamond).despawn();
        }
    }
    score.replace_run(spawner.placed.len(), spawner.collected, report.placements.len());
    spawner.placed.clear();
    spawner.collected = 0;

    let align = spawner.config.align_to_ground_normal;
    for placement in &report.placements {
        let rotation = instance_rotation(placement.normal, align);
        let world = GlobalTransform::from(Transform::from_translation(placement.position).with_rotation(rotation));
        commands.spawn((
            Mesh3d(prefab.mesh.clone()),
            MeshMaterial3d(prefab.material.clone()),
            world.reparented_to(spawner_global),
            Diamond,
            ChildOf(spawner_entity),
        ));
        spawner.placed.push(placement.position);
    }

    let r = report.rejected;
    debug!(
        "Spawner: seed={seed} attempts={} rejected: no_floor={} obstructed={} too_close={} off_navmesh={}",
        report.attempts, r.no_floor, r.obstructed, r.too_close, r.off_navmesh
    );
    if report.is_complete() {
        info!("Spawner: spawned {} diamonds", report.placements.len());
    } else {
        warn!(
            "Spawner: only spawned {}/{}. Add areas, lower min_spacing, or raise max_attempts_per_diamond.",
            report.placements.len(),
            report.requested
        );
    }
    Ok(report)
}

/// Handle `SpawnDiamonds` against the rapier scene.
pub fn spawn_diamonds(
    mut commands: Commands,
    mut requests: EventReader<SpawnDiamonds>,
    rapier: ReadRapierContext,
    nav: Res<NavRegions>,
    mut score: ResMut<DiamondsCollected>,
    mut spawners: Query<(&mut DiamondSpawner, &GlobalTransform)>,
    areas: Query<(&SpawnArea, &GlobalTransform)>,
    existing: Query<(Entity, &ChildOf), With<Diamond>>,
) {
    let targets = requested_spawners(&mut requests);
    if targets.is_empty() {
        return;
    }

    let Ok(ctx) = rapier.single() else {
        error!("Spawner: {}", SpawnerError::NoPhysics);
        return;
    };

    for spawner_entity in targets {
        let Ok((mut spawner, spawner_global)) = spawners.get_mut(spawner_entity) else {
            warn!("Spawner: {spawner_entity} is not a DiamondSpawner");
            continue;
        };

        let volumes = collect_volumes(&spawner, &areas);
        let cfg = spawner.config.clone();

        let floor_filter = group_filter(cfg.ground_groups);
        let floor = |p: Vec3| -> Option<FloorHit> {
            let (origin, max_toi) = floor_ray(p, cfg.raycast_height);
            ctx.cast_ray_and_get_normal(origin, Vec3::NEG_Y, max_toi, true, floor_filter)
                .map(|(_, hit)| FloorHit { point: hit.point, normal: hit.normal })
        };

        let probe_ball = Collider::ball(cfg.obstacle_probe_radius);
        let obstacle_filter = group_filter(cfg.obstacle_groups);
        let obstacles = |p: Vec3| -> bool {
            ctx.query_pipeline.intersection_with_shape(ctx.colliders, ctx.rigidbody_set, p + Vec3::Y * cfg.obstacle_probe_lift, Quat::IDENTITY, &probe_ball, obstacle_filter)
                .is_some()
        };

        let projector = nav.projector(cfg.navmesh_max_distance);
        let probes = Probes {
            floor: &floor,
            obstacles: &obstacles,
            nav: cfg.use_navmesh_check.then_some(&projector as &dyn NavProjector),
        };

        if let Err(err) = run_spawner(
            &mut commands,
            (spawner_entity, &mut *spawner, spawner_global),
            &volumes,
            probes,
            &existing,
            &mut score,
        ) {
            error!("Spawner: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::DiamondPrefab;

    fn with_prefab(total: usize) -> DiamondSpawner {
        DiamondSpawner {
            config: SpawnerConfig { total, seed: Some(5), ..default() },
            prefab: Some(DiamondPrefab { mesh: Handle::default(), material: Handle::default() }),
            ..default()
        }
    }

    fn floor(p: Vec3) -> Option<FloorHit> {
        Some(FloorHit::flat(Vec3::new(p.x, 0.0, p.z)))
    }

    fn clear(_: Vec3) -> bool {
        false
    }

    fn room() -> Vec<SpawnVolume> {
        vec![SpawnVolume::axis_aligned(Vec3::new(0.0, 1.0, 0.0), Vec3::new(8.0, 1.0, 8.0))]
    }

    fn open_floor() -> Probes<'static> {
        Probes { floor: &floor, obstacles: &clear, nav: None }
    }

    #[test]
    fn missing_prefab_aborts() {
        let spawner = DiamondSpawner { prefab: None, ..with_prefab(3) };
        let (mut rng, _) = spawner_rng(&spawner.config);
        let err = plan_spawn(&spawner, &room(), open_floor(), &mut rng).unwrap_err();
        assert_eq!(err, SpawnerError::MissingPrefab);
    }

    #[test]
    fn no_areas_aborts() {
        let spawner = with_prefab(3);
        let (mut rng, _) = spawner_rng(&spawner.config);
        let err = plan_spawn(&spawner, &[], open_floor(), &mut rng).unwrap_err();
        assert_eq!(err, SpawnerError::NoSpawnAreas);
    }

    #[test]
    fn bad_spacing_surfaces_placement_error() {
        let mut spawner = with_prefab(3);
        spawner.config.min_spacing = f32::NAN;
        let (mut rng, _) = spawner_rng(&spawner.config);
        let err = plan_spawn(&spawner, &room(), open_floor(), &mut rng).unwrap_err();
        assert!(matches!(err, SpawnerError::Placement(PlacementError::InvalidSpacing(_))));
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let spawner = with_prefab(10);
        let run = || {
            let (mut rng, seed) = spawner_rng(&spawner.config);
            assert_eq!(seed, 5);
            plan_spawn(&spawner, &room(), open_floor(), &mut rng).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.placements, b.placements);
        assert!(a.is_complete());
    }

    #[test]
    fn rotation_follows_normal_only_when_enabled() {
        let tilted = Vec3::new(1.0, 1.0, 0.0);
        assert_eq!(instance_rotation(tilted, false), Quat::IDENTITY);
        let rot = instance_rotation(tilted, true);
        assert!((rot * Vec3::Y - tilted.normalize()).length() < 1e-5);
        assert_eq!(instance_rotation(Vec3::ZERO, true), Quat::IDENTITY);
    }

    #[test]
    fn floor_ray_spans_twice_the_height() {
        let (origin, max) = floor_ray(Vec3::new(1.0, 2.0, 3.0), 5.0);
        assert_eq!(origin, Vec3::new(1.0, 7.0, 3.0));
        assert_eq!(max, 10.0);
    }

    /// Same request handling as `spawn_diamonds`, with a flat floor instead of rapier.
    fn spawn_on_flat_floor(
        mut commands: Commands,
        mut requests: EventReader<SpawnDiamonds>,
        mut score: ResMut<DiamondsCollected>,
        mut spawners: Query<(&mut DiamondSpawner, &GlobalTransform)>,
        areas: Query<(&SpawnArea, &GlobalTransform)>,
        existing: Query<(Entity, &ChildOf), With<Diamond>>,
    ) {
        for entity in requested_spawners(&mut requests) {
            let Ok((mut spawner, global)) = spawners.get_mut(entity) else { continue; };
            let volumes = collect_volumes(&spawner, &areas);
            let _ = run_spawner(
                &mut commands,
                (entity, &mut *spawner, global),
                &volumes,
                open_floor(),
                &existing,
                &mut score,
            );
        }
    }

    fn spawner_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<SpawnDiamonds>()
            .init_resource::<DiamondsCollected>()
            .add_systems(Update, spawn_on_flat_floor);
        app
    }

    /// A spawner with one area parented to it.
    fn spawn_level(app: &mut App, total: usize) -> (Entity, Entity) {
        let spawner = app.world_mut().spawn((with_prefab(total), GlobalTransform::default())).id();
        let area = app
            .world_mut()
            .spawn((
                SpawnArea { center: Vec3::new(0.0, 1.0, 0.0), size: Vec3::new(16.0, 2.0, 16.0) },
                GlobalTransform::default(),
                ChildOf(spawner),
            ))
            .id();
        app.world_mut().get_mut::<DiamondSpawner>(spawner).unwrap().areas = vec![area];
        (spawner, area)
    }

    fn diamonds(app: &mut App) -> Vec<Entity> {
        let mut query = app.world_mut().query_filtered::<Entity, With<Diamond>>();
        let mut found: Vec<Entity> = query.iter(app.world()).collect();
        found.sort();
        found
    }

    fn respawn(app: &mut App, spawner: Entity) {
        app.world_mut().send_event(SpawnDiamonds(spawner));
        app.update();
    }

    #[test]
    fn respawn_replaces_diamonds_but_keeps_other_children() {
        let mut app = spawner_app();
        let (spawner, area) = spawn_level(&mut app, 4);

        respawn(&mut app, spawner);
        let first = diamonds(&mut app);
        assert_eq!(first.len(), 4);

        respawn(&mut app, spawner);
        let second = diamonds(&mut app);
        assert_eq!(second.len(), 4);
        assert!(first.iter().all(|&e| app.world().get_entity(e).is_err()));

        assert!(app.world().get::<SpawnArea>(area).is_some());
        assert_eq!(app.world().get::<ChildOf>(area).map(|c| c.parent()), Some(spawner));
        assert_eq!(app.world().resource::<DiamondsCollected>().spawned, 4);
        assert_eq!(app.world().get::<DiamondSpawner>(spawner).unwrap().placed.len(), 4);
    }

    #[test]
    fn no_resolvable_area_keeps_existing_diamonds() {
        let mut app = spawner_app();
        let (spawner, _) = spawn_level(&mut app, 3);
        respawn(&mut app, spawner);
        let before = diamonds(&mut app);
        assert_eq!(before.len(), 3);

        app.world_mut().get_mut::<DiamondSpawner>(spawner).unwrap().areas = vec![spawner];
        respawn(&mut app, spawner);

        assert_eq!(diamonds(&mut app), before);
        assert_eq!(app.world().resource::<DiamondsCollected>().spawned, 3);
    }

    #[test]
    fn respawn_forgets_diamonds_collected_from_the_old_set() {
        let mut app = spawner_app();
        let (spawner, _) = spawn_level(&mut app, 4);
        respawn(&mut app, spawner);

        // One diamond picked up.
        let taken = diamonds(&mut app)[0];
        app.world_mut().despawn(taken);
        app.world_mut().get_mut::<DiamondSpawner>(spawner).unwrap().collected = 1;
        app.world_mut().resource_mut::<DiamondsCollected>().collected = 1;

        respawn(&mut app, spawner);

        let score = *app.world().resource::<DiamondsCollected>();
        assert_eq!(score, DiamondsCollected { collected: 0, spawned: 4 });
        assert_eq!(app.world().get::<DiamondSpawner>(spawner).unwrap().collected, 0);
        assert_eq!(diamonds(&mut app).len(), 4);
    }

    #[derive(Resource, Default)]
    struct Requested(Vec<Entity>);

    fn record_requests(mut requests: EventReader<SpawnDiamonds>, mut seen: ResMut<Requested>) {
        seen.0.extend(requests.read().map(|r| r.0));
    }

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<SpawnerConfig>>()
            .add_event::<AssetEvent<SpawnerConfig>>()
            .add_event::<AssetLoadFailedEvent<SpawnerConfig>>()
            .add_event::<SpawnDiamonds>()
            .init_resource::<Requested>()
            .add_systems(
                Update,
                (init_new_spawners, apply_loaded_configs, tick_pending_spawns, record_requests).chain(),
            );
        app
    }

    fn requested(app: &App) -> &[Entity] {
        &app.world().resource::<Requested>().0
    }

    #[test]
    fn first_run_waits_for_physics_to_settle() {
        let mut app = lifecycle_app();
        let spawner = app.world_mut().spawn(DiamondSpawner::default()).id();

        for _ in 0..PHYSICS_SETTLE_FRAMES {
            app.update();
            assert!(requested(&app).is_empty());
        }
        app.update();
        app.update();
        assert_eq!(requested(&app), &[spawner]);

        for _ in 0..4 {
            app.update();
        }
        assert_eq!(requested(&app), &[spawner]);
        assert!(app.world().get::<PendingSpawn>(spawner).is_none());
    }

    #[test]
    fn config_handle_defers_first_run_until_loaded() {
        let mut app = lifecycle_app();
        let handle = app.world().resource::<Assets<SpawnerConfig>>().reserve_handle();
        let spawner = app
            .world_mut()
            .spawn((DiamondSpawner::default(), SpawnerConfigHandle(handle.clone())))
            .id();

        for _ in 0..6 {
            app.update();
        }
        assert!(requested(&app).is_empty());

        let cfg = SpawnerConfig { total: 7, ..default() };
        let _ = app.world_mut().resource_mut::<Assets<SpawnerConfig>>().insert(handle.id(), cfg);
        app.world_mut().send_event(AssetEvent::LoadedWithDependencies { id: handle.id() });
        for _ in 0..PHYSICS_SETTLE_FRAMES + 2 {
            app.update();
        }

        assert_eq!(requested(&app), &[spawner]);
        assert_eq!(app.world().get::<DiamondSpawner>(spawner).unwrap().config.total, 7);
    }
}
