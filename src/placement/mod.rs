// src/placement/mod.rs
//! Bounded-attempt randomized placement inside oriented boxes.
//! Engine-free apart from Bevy's math types; physics/nav are injected as traits.

mod probe;
mod sampler;
mod volume;

pub use probe::{FloorHit, FloorProbe, NavProjector, ObstacleQuery};
pub use sampler::{
    sample_placements, Placement, PlacementError, PlacementParams, PlacementReport, RejectCounts,
};
pub use volume::SpawnVolume;
