// src/placement/sampler.rs
//! Rejection sampling of spaced, floor-supported, obstacle-free points.

use bevy::prelude::*;
use rand::Rng;

use super::probe::{FloorProbe, NavProjector, ObstacleQuery};
use super::volume::SpawnVolume;

#[derive(Clone, Copy, Debug)]
pub struct PlacementParams {
    /// How many points the caller wants.
    pub target_count: usize,
    /// Minimum straight-line distance between any two accepted points.
    pub min_spacing: f32,
    /// Total attempt budget is `target_count * max_attempts_per_item`.
    pub max_attempts_per_item: usize,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self { target_count: 20, min_spacing: 1.0, max_attempts_per_item: 100 }
    }
}

impl PlacementParams {
    pub fn attempt_budget(&self) -> usize {
        self.target_count.saturating_mul(self.max_attempts_per_item)
    }
}

/// One accepted point plus the floor normal it was found on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Why candidates were thrown away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RejectCounts {
    pub no_floor: usize,
    pub obstructed: usize,
    pub too_close: usize,
    pub off_navmesh: usize,
}

#[derive(Clone, Debug, Default)]
pub struct PlacementReport {
    /// Accepted points in acceptance order.
    pub placements: Vec<Placement>,
    pub requested: usize,
    pub attempts: usize,
    pub rejected: RejectCounts,
}

impl PlacementReport {
    pub fn deficit(&self) -> usize {
        self.requested.saturating_sub(self.placements.len())
    }

    pub fn is_complete(&self) -> bool {
        self.deficit() == 0
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.placements.iter().map(|p| p.position)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlacementError {
    #[error("no spawn volumes given")]
    NoVolumes,
    #[error("minimum spacing must be finite and >= 0 (got {0})")]
    InvalidSpacing(f32),
    #[error("spawn volume {index} has non-finite or negative extents, or a non-finite transform")]
    DegenerateVolume { index: usize },
}

/// O(n^2) overall; fine for tens of items.
fn crowds(accepted: &[Placement], candidate: Vec3, min_sq: f32) -> bool {
    accepted.iter().any(|p| p.position.distance_squared(candidate) < min_sq)
}

/// Sample up to `params.target_count` points.
///
/// Each attempt picks a volume uniformly, samples a point in it, then asks
/// `floor` for the surface below. The floor point is rejected if it overlaps an
/// obstacle or lies closer than `min_spacing` to any point accepted so far. With
/// a `nav` projector the point must also project onto walkable space; the
/// projected point is spacing-checked again and is what gets stored.
///
/// Running out of attempts is not an error: the report carries the deficit.
pub fn sample_placements<R, F, O>(
    params: &PlacementParams,
    volumes: &[SpawnVolume],
    floor: &F,
    obstacles: &O,
    nav: Option<&dyn NavProjector>,
    rng: &mut R,
) -> Result<PlacementReport, PlacementError>
where
    R: Rng,
    F: FloorProbe + ?Sized,
    O: ObstacleQuery + ?Sized,
{
    if volumes.is_empty() {
        return Err(PlacementError::NoVolumes);
    }
    if !params.min_spacing.is_finite() || params.min_spacing < 0.0 {
        return Err(PlacementError::InvalidSpacing(params.min_spacing));
    }
    if let Some(index) = volumes.iter().position(|v| !v.is_valid()) {
        return Err(PlacementError::DegenerateVolume { index });
    }

    let budget = params.attempt_budget();
    let min_sq = params.min_spacing * params.min_spacing;

    let mut report = PlacementReport {
        placements: Vec::with_capacity(params.target_count),
        requested: params.target_count,
        ..default()
    };

    while report.placements.len() < params.target_count && report.attempts < budget {
        report.attempts += 1;

        let volume = &volumes[rng.random_range(0..volumes.len())];
        let sample = volume.sample_point(rng);

        let Some(hit) = floor.probe(sample) else {
            report.rejected.no_floor += 1;
            continue;
        };
        let mut candidate = hit.point;

        if obstacles.overlaps(candidate) {
            report.rejected.obstructed += 1;
            continue;
        }

        if crowds(&report.placements, candidate, min_sq) {
            report.rejected.too_close += 1;
            continue;
        }

        if let Some(nav) = nav {
            let Some(projected) = nav.project(candidate) else {
                report.rejected.off_navmesh += 1;
                continue;
            };
            // Projection can pull the point toward an accepted one.
            if projected != candidate && crowds(&report.placements, projected, min_sq) {
                report.rejected.too_close += 1;
                continue;
            }
            candidate = projected;
        }

        report.placements.push(Placement { position: candidate, normal: hit.normal });
    }

    Ok(report)
}
