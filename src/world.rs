//! world driver – terrain + flora + streaming window + fruit respawns
//!
//! One `tick` per frame. Strips are generated synchronously and pushed into a
//! [`SceneSink`]; fruit respawns are plain timer entries advanced by the same
//! tick, so nothing here spawns threads or tasks.
use bevy::log::{debug, info};

use crate::config::WorldConfig;
use crate::error::WorldResult;
use crate::flora::Flora;
use crate::fruit::RespawnSchedule;
use crate::grid::Layer;
use crate::streaming::{Extended, StreamingWindow, Strip, ViewerEdges};
use crate::terrain::{GroundHeightProvider, Terrain, Tile};
use crate::tree::{Placed, WorldObject};

/// Receives freshly generated objects. Implemented by the scene collaborator.
pub trait SceneSink {
    fn insert(&mut self, object: WorldObject, layer: Layer) -> WorldResult<()>;
}

/// Collecting sink, mostly for tests and tools.
impl SceneSink for Vec<Placed> {
    fn insert(&mut self, object: WorldObject, layer: Layer) -> WorldResult<()> {
        self.push(Placed { layer, object });
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickReport<K> {
    pub extended: Extended,
    /// fruit whose respawn came due this tick
    pub respawned: Vec<K>,
}

pub struct World<K> {
    terrain: Terrain,
    flora: Flora<Terrain>,
    window: StreamingWindow,
    respawns: RespawnSchedule<K>,
}

impl<K> World<K> {
    pub fn new(config: &WorldConfig) -> Self {
        let terrain = Terrain::new(config.viewport.y, config.seed, config.tile_size);
        let flora = Flora::new(terrain.clone(), config.seed, config.tile_size);
        let initial = Strip {
            min_x: 0,
            max_x: config.viewport.x.ceil() as i32,
        };
        Self {
            window: StreamingWindow::new(
                initial,
                config.tile_size,
                config.buffer(),
                config.chunk_width(),
            ),
            terrain,
            flora,
            respawns: RespawnSchedule::default(),
        }
    }

    #[inline]
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    #[inline]
    pub fn flora(&self) -> &Flora<Terrain> {
        &self.flora
    }

    #[inline]
    pub fn window(&self) -> &StreamingWindow {
        &self.window
    }

    pub fn generate_ground(&self, min_x: i32, max_x: i32) -> WorldResult<Vec<Tile>> {
        self.terrain.generate_ground(min_x, max_x)
    }

    pub fn generate_vegetation(&self, min_x: i32, max_x: i32) -> WorldResult<Vec<Placed>> {
        self.flora.generate(min_x, max_x)
    }

    /// Materialize the initial window. Call once, before the first tick.
    pub fn bootstrap(&self, sink: &mut impl SceneSink) -> WorldResult<Strip> {
        let strip = self.window.bounds();
        let count = materialize(&self.terrain, &self.flora, strip, sink)?;
        info!(
            "world: seed {:?}, initial window [{}, {}), {} objects",
            self.flora.column_rng().seed(),
            strip.min_x,
            strip.max_x,
            count
        );
        Ok(strip)
    }

    /// Stream strips for the current viewer edges, then advance fruit timers.
    /// On error the failing side keeps its bound and timers are not advanced.
    pub fn tick(
        &mut self,
        dt: f32,
        edges: &impl ViewerEdges,
        sink: &mut impl SceneSink,
    ) -> WorldResult<TickReport<K>> {
        let extended = self.stream(edges, sink)?;
        let respawned = self.advance_respawns(dt);
        Ok(TickReport {
            extended,
            respawned,
        })
    }

    /// The streaming half of [`World::tick`].
    pub fn stream(
        &mut self,
        edges: &impl ViewerEdges,
        sink: &mut impl SceneSink,
    ) -> WorldResult<Extended> {
        let (terrain, flora) = (&self.terrain, &self.flora);
        self.window.tick(edges, |side, strip| {
            let count = materialize(terrain, flora, strip, sink)?;
            debug!(
                "world: {:?} strip [{}, {}) → {} objects",
                side, strip.min_x, strip.max_x, count
            );
            Ok(())
        })
    }

    /// The timer half of [`World::tick`]: advance the clock by `dt` and hand
    /// back every fruit whose respawn is now due.
    pub fn advance_respawns(&mut self, dt: f32) -> Vec<K> {
        self.respawns.advance(dt as f64)
    }

    /// Register a picked fruit against the current clock; returns its due time.
    /// Call after the current frame's time has been advanced.
    pub fn schedule_respawn(&mut self, key: K) -> f64 {
        self.respawns.schedule(key)
    }

    #[inline]
    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }
}

impl<K> GroundHeightProvider for World<K> {
    fn ground_height_at(&self, x: f32) -> f32 {
        self.terrain.ground_height_at(x)
    }
}

/// Ground first, then vegetation, each object with its preferred layer.
fn materialize(
    terrain: &Terrain,
    flora: &Flora<Terrain>,
    strip: Strip,
    sink: &mut impl SceneSink,
) -> WorldResult<usize> {
    let mut count = 0;
    for tile in terrain.generate_ground(strip.min_x, strip.max_x)? {
        sink.insert(WorldObject::Block(tile), tile.role.layer())?;
        count += 1;
    }
    for placed in flora.generate(strip.min_x, strip.max_x)? {
        sink.insert(placed.object, placed.layer)?;
        count += 1;
    }
    Ok(count)
}
