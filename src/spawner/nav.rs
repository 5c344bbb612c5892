// src/spawner/nav.rs
//! Declared walkable regions standing in for a baked navmesh.

use bevy::prelude::*;

/// Horizontal walkable rectangle at floor height `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavRegion {
    pub min_xz: Vec2,
    pub max_xz: Vec2,
    pub y: f32,
}

impl NavRegion {
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_xz.x, self.max_xz.x),
            self.y,
            p.z.clamp(self.min_xz.y, self.max_xz.y),
        )
    }
}

#[derive(Resource, Default, Clone, Debug)]
pub struct NavRegions {
    pub regions: Vec<NavRegion>,
}

impl NavRegions {
    /// Nearest walkable point within `max_distance` of `p`.
    pub fn project(&self, p: Vec3, max_distance: f32) -> Option<Vec3> {
        let max_sq = max_distance * max_distance;
        self.regions
            .iter()
            .map(|r| r.closest_point(p))
            .map(|q| (q, q.distance_squared(p)))
            .filter(|(_, d)| *d <= max_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(q, _)| q)
    }

    /// Closure form for [`crate::placement::NavProjector`].
    pub fn projector(&self, max_distance: f32) -> impl Fn(Vec3) -> Option<Vec3> + '_ {
        move |p| self.project(p, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> NavRegions {
        NavRegions {
            regions: vec![
                NavRegion { min_xz: Vec2::new(-5.0, -5.0), max_xz: Vec2::new(5.0, 5.0), y: 0.0 },
                NavRegion { min_xz: Vec2::new(10.0, -1.0), max_xz: Vec2::new(12.0, 1.0), y: 1.0 },
            ],
        }
    }

    #[test]
    fn point_on_region_snaps_to_floor_height() {
        let p = regions().project(Vec3::new(1.0, 0.3, 2.0), 0.5).unwrap();
        assert_eq!(p, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn far_points_are_rejected() {
        assert!(regions().project(Vec3::new(7.5, 0.0, 0.0), 0.5).is_none());
        assert!(regions().project(Vec3::new(0.0, 3.0, 0.0), 0.5).is_none());
    }

    #[test]
    fn nearest_region_wins() {
        let p = regions().project(Vec3::new(9.8, 1.0, 0.0), 0.5).unwrap();
        assert_eq!(p, Vec3::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn empty_regions_project_nothing() {
        assert!(NavRegions::default().project(Vec3::ZERO, 10.0).is_none());
    }
}
