// src/grounding/mod.rs
//! Drop an entity so the bottom of its rendered bounds rests on a target height.

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::render::view::VisibilitySystems;
use bevy::transform::TransformSystem;

/// Move this entity so the lowest point of its (and its descendants') mesh
/// bounds sits at `target_y`.
#[derive(Component, Clone, Copy, Debug)]
pub struct DropToGround {
    pub target_y: f32,
}

impl Default for DropToGround {
    fn default() -> Self {
        Self { target_y: 0.0 }
    }
}

/// Set after the first successful drop; later drops need a request.
#[derive(Component)]
pub struct Dropped;

/// Ask for `entity` to be dropped again (e.g. after it was moved).
#[derive(Event, Clone, Copy, Debug)]
pub struct DropToGroundRequest(pub Entity);

/// World-space bounds as (min, max).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBounds {
    pub fn encapsulate(self, other: WorldBounds) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
}

/// Transform a local mesh AABB by its global transform (all 8 corners).
pub fn world_bounds(aabb: &Aabb, global: &GlobalTransform) -> WorldBounds {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for i in 0..8 {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        let p = global.transform_point(center + half * sign);
        min = min.min(p);
        max = max.max(p);
    }
    WorldBounds { min, max }
}

pub fn union_bounds(bounds: impl IntoIterator<Item = WorldBounds>) -> Option<WorldBounds> {
    bounds.into_iter().reduce(WorldBounds::encapsulate)
}

/// Vertical shift that puts `bounds_min_y` on `target_y`; positive moves up.
pub fn drop_offset(bounds_min_y: f32, target_y: f32) -> f32 {
    target_y - bounds_min_y
}

/// Runs in `PostUpdate` once transforms and mesh bounds are current, so a
/// request sent the frame an entity moves sees its new bounds. The shifted
/// `Transform` propagates next frame.
pub fn drop_to_ground_system(
    mut commands: Commands,
    mut requests: EventReader<DropToGroundRequest>,
    mut roots: Query<(Entity, &DropToGround, &mut Transform, Has<Dropped>)>,
    children: Query<&Children>,
    meshes: Query<(&Aabb, &GlobalTransform)>,
) {
    let requested: Vec<Entity> = requests.read().map(|r| r.0).collect();

    for (entity, drop, mut transform, dropped) in &mut roots {
        if dropped && !requested.contains(&entity) {
            continue;
        }

        let bounds = union_bounds(
            std::iter::once(entity)
                .chain(children.iter_descendants(entity))
                .filter_map(|e| meshes.get(e).ok())
                .map(|(aabb, global)| world_bounds(aabb, global)),
        );
        // Mesh bounds appear a frame after spawning.
        let Some(bounds) = bounds else { continue; };

        let dy = drop_offset(bounds.min.y, drop.target_y);
        transform.translation.y += dy;
        commands.entity(entity).insert(Dropped);
        debug!("Grounding: moved {entity} by {dy:.3} to rest on y={}", drop.target_y);
    }
}

pub struct GroundingPlugin;

impl Plugin for GroundingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DropToGroundRequest>()
            .add_systems(
                PostUpdate,
                drop_to_ground_system
                    .after(TransformSystem::TransformPropagate)
                    .after(VisibilitySystems::CalculateBounds),
            );
    }
}
