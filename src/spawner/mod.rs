// src/spawner/mod.rs

mod components;
pub mod config;
mod gizmos;
pub mod nav;
mod pickup;
mod plugin;
mod systems;

pub use components::{Diamond, DiamondPrefab, DiamondSpawner, SpawnArea, SpawnerConfigHandle};
pub use config::SpawnerConfig;
pub use gizmos::SpawnerGizmos;
pub use nav::{NavRegion, NavRegions};
pub use pickup::{DiamondsCollected, PickupSettings};
pub use plugin::{SpawnDiamonds, SpawnerPlugin};
pub use systems::SpawnerError;
