// src/placement/volume.rs
use bevy::math::Affine3A;
use bevy::prelude::*;
use rand::Rng;

/// Oriented box region in which candidate points are sampled.
/// `center` and `half_extents` live in the box's local space; `to_world` maps them out.
#[derive(Clone, Copy, Debug)]
pub struct SpawnVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub to_world: Affine3A,
}

impl SpawnVolume {
    pub fn new(center: Vec3, half_extents: Vec3, to_world: Affine3A) -> Self {
        Self { center, half_extents, to_world }
    }

    /// Axis-aligned box in world space (identity transform).
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center, half_extents, Affine3A::IDENTITY)
    }

    /// Half-extents must be non-negative and the full width finite on every
    /// axis; the transform must be finite too.
    pub fn is_valid(&self) -> bool {
        (self.half_extents * 2.0).is_finite()
            && self.center.is_finite()
            && self.half_extents.cmpge(Vec3::ZERO).all()
            && self.to_world.is_finite()
    }

    /// Uniform random point inside the box, in world space.
    pub fn sample_point<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let h = self.half_extents;
        let local = Vec3::new(
            rng.random_range(-h.x..=h.x),
            rng.random_range(-h.y..=h.y),
            rng.random_range(-h.z..=h.z),
        ) + self.center;
        self.to_world.transform_point3(local)
    }
}
