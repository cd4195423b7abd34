//! surface height & ground‑block generation
//!
//! Pure functions of (seed, x). Nothing here touches the ECS; the scene sink
//! converts the screen‑space tiles into sprites.
use bevy::math::{IVec2, Vec2, Vec3};

use crate::constants::*;
use crate::error::WorldResult;
use crate::grid::{columns, snap, TileRole, WorldSeed};
use crate::noise_field::NoiseField;

/// salt mixed into the seed for the tint channel
const TINT_SALT: i64 = 0x7A11_C0DE;

/// helper conversions (screen row‑0 = top, bevy y‑up)
#[inline]
pub fn screen_to_world_y(screen_y: f32) -> f32 {
    -screen_y
}
#[inline]
pub fn world_to_screen_y(world_y: f32) -> f32 {
    -world_y
}

/// centre of a tile whose top‑left corner is `pos`, in bevy world space
#[inline]
pub fn tile_center_world(pos: IVec2, tile_size: i32) -> Vec2 {
    let half = tile_size as f32 * 0.5;
    Vec2::new(
        pos.x as f32 + half,
        screen_to_world_y(pos.y as f32 + half),
    )
}

/// "Where is the ground at this x?" Implementations must be pure.
pub trait GroundHeightProvider {
    fn ground_height_at(&self, x: f32) -> f32;
}

/// -------- tiles --------
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// top‑left corner, grid aligned
    pub pos: IVec2,
    pub role: TileRole,
    pub tint: Vec3,
}

/* ===========================================================
   Terrain
   =========================================================== */
#[derive(Clone)]
pub struct Terrain {
    noise: NoiseField,
    color_noise: NoiseField,
    baseline: f32,
    amplitude: f32,
    tile_size: i32,
    depth_tiles: i32,
}

impl Terrain {
    pub fn new(viewport_height: f32, seed: WorldSeed, tile_size: i32) -> Self {
        let depth = viewport_height + tile_size as f32;
        Self {
            noise: NoiseField::new(seed),
            color_noise: NoiseField::new(WorldSeed(seed.0 ^ TINT_SALT)),
            baseline: viewport_height * BASELINE_FRACTION,
            amplitude: AMPLITUDE_TILES * tile_size as f32,
            tile_size,
            depth_tiles: (depth / tile_size as f32).ceil() as i32,
        }
    }

    /// tiles stacked under every surface point
    #[inline]
    pub fn depth_tiles(&self) -> i32 {
        self.depth_tiles
    }

    /// surface height snapped onto the tile grid (top of the first ground tile)
    #[inline]
    pub fn surface_row_at(&self, column: i32) -> i32 {
        snap(self.ground_height_at(column as f32), self.tile_size)
    }

    /// Ground columns for `[min_x, max_x)`, aligned outward to the grid.
    pub fn generate_ground(&self, min_x: i32, max_x: i32) -> WorldResult<Vec<Tile>> {
        let p = self.tile_size;
        let mut tiles = Vec::new();
        for x in columns(min_x, max_x, p)? {
            let surface = self.surface_row_at(x);
            for i in 0..self.depth_tiles {
                let pos = IVec2::new(x, surface + i * p);
                tiles.push(Tile {
                    pos,
                    role: TileRole::Ground,
                    tint: self.ground_tint(pos),
                });
            }
        }
        Ok(tiles)
    }

    /// quantised colour banding (pixel‑arty look), keyed by tile position
    fn ground_tint(&self, pos: IVec2) -> Vec3 {
        let (tx, ty) = (pos.x / self.tile_size, pos.y / self.tile_size);
        let raw = self
            .color_noise
            .sample(tx as f64 * COLOR_NOISE_SCALE, ty as f64 * COLOR_NOISE_SCALE)
            as f32;

        let step = (((raw + 1.0) * 0.5) * COLOR_VARIATION_LEVELS as f32)
            .floor()
            .clamp(0.0, (COLOR_VARIATION_LEVELS - 1) as f32);

        let norm = step / (COLOR_VARIATION_LEVELS as f32 - 1.0) * 2.0 - 1.0;
        let factor = 1.0 + norm * COLOR_VARIATION_STRENGTH;

        (Vec3::from_array(GROUND_RGB) * factor).clamp(Vec3::ZERO, Vec3::ONE)
    }
}

impl GroundHeightProvider for Terrain {
    fn ground_height_at(&self, x: f32) -> f32 {
        let n = self.noise.sample_line(x as f64 * NOISE_FREQUENCY) as f32;
        self.baseline + n * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn terrain() -> Terrain {
        Terrain::new(600.0, WorldSeed(42), 30)
    }

    fn positions(tiles: &[Tile]) -> HashSet<(i32, i32)> {
        tiles.iter().map(|t| (t.pos.x, t.pos.y)).collect()
    }

    #[test]
    fn height_is_reproducible_across_instances() {
        let a = terrain();
        let b = terrain();
        for x in [-1234.5, 0.0, 17.0, 800.0, 99_999.0] {
            assert_eq!(a.ground_height_at(x).to_bits(), b.ground_height_at(x).to_bits());
            assert_eq!(a.ground_height_at(x).to_bits(), a.ground_height_at(x).to_bits());
        }
    }

    /// Pinned values: any change here means worlds from existing seeds
    /// would come out different after an upgrade.
    #[test]
    fn seed_42_surface_is_pinned() {
        let t = terrain();
        for (x, expected) in [
            (0.0, 463.639_62),
            (-987.0, 336.360_41),
            (1234.0, 310.0),
            (5000.0, 368.180_2),
        ] {
            let h = t.ground_height_at(x);
            assert!((h - expected).abs() < 1e-3, "x={x}: {h} != {expected}");
        }
    }

    #[test]
    fn height_stays_near_baseline() {
        let t = terrain();
        let amp = AMPLITUDE_TILES * 30.0 * 1.5;
        for x in (-3000..3000).step_by(7) {
            let h = t.ground_height_at(x as f32);
            assert!((h - 400.0).abs() <= amp, "x={x} h={h}");
        }
    }

    #[test]
    fn slope_is_traversable() {
        let t = terrain();
        for x in (-3000..3000).step_by(30) {
            let a = t.ground_height_at(x as f32);
            let b = t.ground_height_at(x as f32 + 30.0);
            assert!((a - b).abs() <= 60.0, "cliff between {x} and {}", x + 30);
        }
    }

    #[test]
    fn viewport_scenario_columns_and_depth() {
        let t = terrain();
        let tiles = t.generate_ground(0, 800).unwrap();
        let cols: HashSet<i32> = tiles.iter().map(|t| t.pos.x).collect();
        assert_eq!(cols.len(), 27);
        for c in cols {
            let n = tiles.iter().filter(|t| t.pos.x == c).count();
            assert!(n >= 21);
        }
        assert!(tiles.iter().all(|t| t.pos.x % 30 == 0 && t.pos.y.rem_euclid(30) == 0));
        assert!(tiles.iter().all(|t| t.role == TileRole::Ground));
    }

    #[test]
    fn ground_column_covers_a_viewport_below_the_surface() {
        let t = terrain();
        let tiles = t.generate_ground(90, 120).unwrap();
        let top = tiles.iter().map(|t| t.pos.y).min().unwrap();
        let bottom = tiles.iter().map(|t| t.pos.y + 30).max().unwrap();
        assert_eq!(top, t.surface_row_at(90));
        assert!(bottom - top >= 600 + 30);
    }

    #[test]
    fn widened_range_agrees_on_overlap() {
        let t = terrain();
        let (min_x, max_x) = (95, 700);
        let narrow = t.generate_ground(min_x, max_x).unwrap();
        let wide = t.generate_ground(min_x - 5, max_x + 7).unwrap();

        let keep = |tiles: &[Tile]| -> Vec<Tile> {
            tiles
                .iter()
                .copied()
                .filter(|t| (min_x..max_x).contains(&t.pos.x))
                .collect()
        };
        assert_eq!(keep(&narrow), keep(&wide));
    }

    #[test]
    fn split_generation_matches_single_call() {
        let t = terrain();
        let whole = t.generate_ground(0, 600).unwrap();
        let mut parts = t.generate_ground(0, 300).unwrap();
        parts.extend(t.generate_ground(300, 600).unwrap());
        assert_eq!(whole, parts);
        assert_eq!(positions(&whole).len(), whole.len());
    }

    #[test]
    fn negative_ranges_generate() {
        let t = terrain();
        let tiles = t.generate_ground(-600, 0).unwrap();
        assert_eq!(tiles.len() as i32, 20 * t.depth_tiles());
        assert!(tiles.iter().all(|t| (-600..0).contains(&t.pos.x)));
    }

    #[test]
    fn inverted_range_is_an_error() {
        assert!(terrain().generate_ground(10, 0).is_err());
        assert!(terrain().generate_ground(10, 10).unwrap().is_empty());
        assert!(terrain().generate_ground(i32::MIN, 0).is_err());
    }

    #[test]
    fn tile_center_flips_to_world_space() {
        let c = tile_center_world(IVec2::new(30, 390), 30);
        assert_eq!(c, Vec2::new(45.0, -405.0));
        assert_eq!(world_to_screen_y(screen_to_world_y(12.5)), 12.5);
    }
}
