//! grid alignment, seeds & placement layers
//!
//! Every procedural decision is keyed by a *grid column*: an integer x that is
//! a multiple of the tile pitch. Coordinates here are screen‑space (row‑0 at
//! the top, y grows downward).

use std::ops::Range;

use crate::error::{check_range, WorldError, WorldResult};

/// Columns are generated only within `[-WORLD_EXTENT, WORLD_EXTENT)`, which
/// leaves headroom for trunk and canopy offsets on either side.
pub const WORLD_EXTENT: i32 = 1 << 30;

/// Sole source of procedural variation for one world. Any value is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldSeed(pub i64);

impl WorldSeed {
    /// Folds the seed into the 32 bits `noise::Perlin` accepts.
    #[inline]
    pub fn as_noise_seed(self) -> u32 {
        let v = self.0 as u64;
        (v ^ (v >> 32)) as u32
    }
}

/// `floor(v / pitch) * pitch`, correct for negative `v`.
#[inline]
pub fn align_down(v: i32, pitch: i32) -> i32 {
    v.div_euclid(pitch) * pitch
}

/// `ceil(v / pitch) * pitch`, correct for negative `v`.
#[inline]
pub fn align_up(v: i32, pitch: i32) -> i32 {
    -((-v).div_euclid(pitch) * pitch)
}

/// Snap a real coordinate down onto the grid.
#[inline]
pub fn snap(v: f32, pitch: i32) -> i32 {
    (v / pitch as f32).floor() as i32 * pitch
}

/// Outward‑aligned half‑open range `[align_down(min), align_up(max))`.
/// An empty input stays empty; inverted ranges and ranges reaching past
/// [`WORLD_EXTENT`] are rejected.
pub fn aligned_range(min_x: i32, max_x: i32, pitch: i32) -> WorldResult<Range<i32>> {
    check_range(min_x, max_x)?;
    if min_x == max_x {
        return Ok(0..0);
    }
    if min_x < -WORLD_EXTENT || max_x > WORLD_EXTENT {
        return Err(WorldError::InvalidRange { min_x, max_x });
    }
    Ok(align_down(min_x, pitch)..align_up(max_x, pitch))
}

/// Grid columns governing `[min_x, max_x)` after outward alignment.
pub fn columns(min_x: i32, max_x: i32, pitch: i32) -> WorldResult<impl Iterator<Item = i32>> {
    Ok(aligned_range(min_x, max_x, pitch)?.step_by(pitch as usize))
}

/* ===========================================================
   layers & roles
   =========================================================== */

/// Preferred compositing layer; the scene decides what that means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// drawn behind solid objects, no collision
    Background,
    /// ground, trunks & fruit
    Solid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileRole {
    Ground,
    Trunk,
    Leaf,
    Fruit,
}

impl TileRole {
    #[inline]
    pub fn layer(self) -> Layer {
        match self {
            TileRole::Leaf => Layer::Background,
            TileRole::Ground | TileRole::Trunk | TileRole::Fruit => Layer::Solid,
        }
    }

    /// blocks movement from every direction
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, TileRole::Ground | TileRole::Trunk)
    }
}
