// src/placement/probe.rs
//! Queries the sampler delegates to the host (physics raycast, overlap, navmesh).

use bevy::prelude::*;

/// Surface point found below a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorHit {
    pub point: Vec3,
    /// Unit surface normal at `point`.
    pub normal: Vec3,
}

impl FloorHit {
    pub fn flat(point: Vec3) -> Self {
        Self { point, normal: Vec3::Y }
    }
}

/// Downward probe: returns the floor under `point`, if any.
pub trait FloorProbe {
    fn probe(&self, point: Vec3) -> Option<FloorHit>;
}

/// True when something blocks a candidate floor point.
pub trait ObstacleQuery {
    fn overlaps(&self, point: Vec3) -> bool;
}

/// Snaps a point onto walkable space, `None` when nothing is close enough.
pub trait NavProjector {
    fn project(&self, point: Vec3) -> Option<Vec3>;
}

impl<F> FloorProbe for F
where
    F: Fn(Vec3) -> Option<FloorHit>,
{
    fn probe(&self, point: Vec3) -> Option<FloorHit> {
        self(point)
    }
}

impl<F> ObstacleQuery for F
where
    F: Fn(Vec3) -> bool,
{
    fn overlaps(&self, point: Vec3) -> bool {
        self(point)
    }
}

impl<F> NavProjector for F
where
    F: Fn(Vec3) -> Option<Vec3>,
{
    fn project(&self, point: Vec3) -> Option<Vec3> {
        self(point)
    }
}
