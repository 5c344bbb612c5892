use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::grounding::DropToGround;
use crate::player::{CameraPitch, PlayerCamera, PlayerController};
use crate::spawner::config::layers;
use crate::spawner::{DiamondPrefab, DiamondSpawner, NavRegion, NavRegions, SpawnArea, SpawnerConfigHandle};
use crate::state::AppScene;

pub const SPAWNER_CONFIG_PATH: &str = "config/diamonds.spawner.ron";

/// Floor half-size (XZ) of each of the two rooms.
const ROOM_HALF: Vec2 = Vec2::new(10.0, 10.0);
const ROOM_OFFSET_X: f32 = 10.0;

fn in_game() -> StateScoped<AppScene> {
    StateScoped(AppScene::Game)
}

fn groups(membership: u32) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(membership), Group::ALL)
}

/// OnEnter(Game): two rooms joined by a doorway, a player, and a diamond spawner.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut nav: ResMut<NavRegions>,
    asset_server: Res<AssetServer>,
) {
    // 1) Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        in_game(),
    ));

    // 2) Floors (ground group) + walkable regions
    let floor_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.38, 0.4),
        perceptual_roughness: 0.9,
        ..default()
    });
    let floor_mesh = meshes.add(Cuboid::new(ROOM_HALF.x * 2.0, 0.2, ROOM_HALF.y * 2.0));
    nav.regions.clear();
    for side in [-1.0, 1.0] {
        let x = side * ROOM_OFFSET_X;
        commands.spawn((
            Mesh3d(floor_mesh.clone()),
            MeshMaterial3d(floor_mat.clone()),
            Transform::from_xyz(x, -0.1, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(ROOM_HALF.x, 0.1, ROOM_HALF.y),
            groups(layers::GROUND),
            in_game(),
        ));
        nav.regions.push(NavRegion {
            min_xz: Vec2::new(x - ROOM_HALF.x + 0.5, -ROOM_HALF.y + 0.5),
            max_xz: Vec2::new(x + ROOM_HALF.x - 0.5, ROOM_HALF.y - 0.5),
            y: 0.0,
        });
    }

    // 3) Obstacles: dividing wall with a doorway, plus pillars
    let wall_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.5, 0.45),
        ..default()
    });
    let wall_half = Vec3::new(0.25, 1.5, 4.0);
    for z in [-6.0, 6.0] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(wall_half * 2.0))),
            MeshMaterial3d(wall_mat.clone()),
            Transform::from_xyz(0.0, wall_half.y, z),
            RigidBody::Fixed,
            Collider::cuboid(wall_half.x, wall_half.y, wall_half.z),
            groups(layers::OBSTACLE),
            in_game(),
        ));
    }
    let pillar = meshes.add(Cylinder::new(0.6, 3.0));
    for pos in [Vec3::new(-16.0, 1.5, -4.0), Vec3::new(-8.0, 1.5, 5.0), Vec3::new(14.0, 1.5, -3.0)] {
        commands.spawn((
            Mesh3d(pillar.clone()),
            MeshMaterial3d(wall_mat.clone()),
            Transform::from_translation(pos),
            RigidBody::Fixed,
            Collider::cylinder(1.5, 0.6),
            groups(layers::OBSTACLE),
            in_game(),
        ));
    }

    // 4) A crate dropped onto the floor by its rendered bounds
    commands
        .spawn((
            Transform::from_xyz(6.0, 3.0, 6.0),
            Visibility::default(),
            DropToGround { target_y: 0.0 },
            RigidBody::Fixed,
            Collider::cuboid(0.75, 0.75, 0.75),
            groups(layers::OBSTACLE),
            in_game(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.5, 1.5, 1.5))),
                MeshMaterial3d(materials.add(Color::srgb(0.6, 0.4, 0.2))),
                Transform::default(),
            ));
        });

    // 5) Player with a child follow camera
    commands
        .spawn((
            Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(124, 144, 255),
                ..default()
            })),
            Transform::from_xyz(-ROOM_OFFSET_X, 1.0, 0.0),
            RigidBody::Dynamic,
            Collider::capsule_y(0.5, 0.4),
            LockedAxes::ROTATION_LOCKED_X | LockedAxes::ROTATION_LOCKED_Z,
            Velocity::zero(),
            groups(layers::PLAYER),
            PlayerController::default(),
            CameraPitch::default(),
            in_game(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Camera3d::default(),
                Transform::from_xyz(0.0, 1.4, 4.5).with_rotation(Quat::from_rotation_x(-15f32.to_radians())),
                PlayerCamera,
            ));
        });

    // 6) Spawn areas (one per room) + the spawner
    let areas: Vec<Entity> = [-1.0, 1.0]
        .into_iter()
        .map(|side| {
            commands
                .spawn((
                    Transform::from_xyz(side * ROOM_OFFSET_X, 1.0, 0.0),
                    SpawnArea {
                        center: Vec3::ZERO,
                        size: Vec3::new(ROOM_HALF.x * 1.8, 2.0, ROOM_HALF.y * 1.8),
                    },
                    in_game(),
                ))
                .id()
        })
        .collect();

    let prefab = DiamondPrefab {
        mesh: meshes.add(Sphere::new(0.25).mesh().uv(8, 6)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.4, 0.9, 1.0),
            emissive: LinearRgba::rgb(0.2, 1.2, 1.6),
            ..default()
        }),
    };

    commands.spawn((
        Name::new("Diamond spawner"),
        Transform::default(),
        Visibility::default(),
        DiamondSpawner {
            areas,
            prefab: Some(prefab),
            ..default()
        },
        SpawnerConfigHandle(asset_server.load(SPAWNER_CONFIG_PATH)),
        in_game(),
    ));
}
