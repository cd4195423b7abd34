//! endless 2‑D meadow: noise terrain, seeded trees & fruit, camera‑driven
//! streaming of new world strips
//!
//! The core (`terrain`, `flora`, `streaming`, `world`, …) is pure and
//! tick‑driven; `plugin` & `scene` wire it into Bevy + Rapier.

pub mod camera;
pub mod column_rng;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod flora;
pub mod fruit;
pub mod grid;
pub mod noise_field;
pub mod plugin;
pub mod scene;
pub mod streaming;
pub mod terrain;
pub mod tree;
pub mod world;

pub use config::WorldConfig;
pub use error::{WorldError, WorldResult};
pub use grid::{Layer, TileRole, WorldSeed};
pub use plugin::{WorldPlugin, WorldState};
pub use streaming::{Edges, StreamingWindow, Strip, ViewerEdges};
pub use terrain::{GroundHeightProvider, Terrain, Tile};
pub use world::{SceneSink, TickReport, World};
