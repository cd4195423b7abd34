use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::constants::*;
use crate::grid::WorldSeed;

/// Per‑world settings. The seed is the only value expected to change
/// between runs; the rest default to the tunables in `constants`.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub seed: WorldSeed,
    pub viewport: Vec2,
    pub tile_size: i32,
    pub chunk_tiles: i32,
    pub buffer_tiles: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default(),
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            tile_size: TILE_SIZE,
            chunk_tiles: CHUNK_TILES,
            buffer_tiles: BUFFER_TILES,
        }
    }
}

impl WorldConfig {
    pub fn with_seed(seed: i64) -> Self {
        Self {
            seed: WorldSeed(seed),
            ..Self::default()
        }
    }

    #[inline]
    pub fn chunk_width(&self) -> i32 {
        self.chunk_tiles * self.tile_size
    }

    #[inline]
    pub fn buffer(&self) -> i32 {
        self.buffer_tiles * self.tile_size
    }

    /// Seed from the first CLI argument, or a random one.
    pub fn seed_from_args(mut args: impl Iterator<Item = String>) -> i64 {
        args.next()
            .and_then(|a| a.trim().parse::<i64>().ok())
            .unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tunables() {
        let c = WorldConfig::with_seed(42);
        assert_eq!(c.seed, WorldSeed(42));
        assert_eq!(c.chunk_width(), 600);
        assert_eq!(c.buffer(), 60);
        assert_eq!(c.viewport, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn seed_parses_from_first_argument() {
        let args = vec!["-17".to_string(), "9".to_string()];
        assert_eq!(WorldConfig::seed_from_args(args.into_iter()), -17);
    }
}
