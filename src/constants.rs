use std::ops::Range;

/// -------- grid & viewport --------
pub const TILE_SIZE: i32       = 30;
pub const VIEWPORT_WIDTH: f32  = 800.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;

/// -------- streaming --------
pub const CHUNK_TILES: i32  = 20; // tiles added per extension
pub const BUFFER_TILES: i32 =  2; // early‑warning margin

/// -------- terrain shape --------
pub const NOISE_FREQUENCY: f64 = 0.0035; // per world unit
pub const AMPLITUDE_TILES: f32 = 3.0;    // peak offset from baseline, in tiles
pub const BASELINE_FRACTION: f32 = 2.0 / 3.0;

/// -------- colour‑variation (ground) --------
pub const COLOR_NOISE_SCALE: f64        = 0.05;
pub const COLOR_VARIATION_LEVELS: i32   = 4;
pub const COLOR_VARIATION_STRENGTH: f32 = 0.2;

/// -------- flora --------
pub const TREE_PROBABILITY: f64 = 0.10;
pub const TRUNK_MIN_TILES: i32  = 4;
pub const TRUNK_EXTRA_TILES: i32 = 4; // trunk height ∈ [MIN, MIN + EXTRA)
pub const CANOPY_SIZE: i32      = 3;  // CANOPY_SIZE × CANOPY_SIZE footprint
pub const LEAF_MISSING_PROB: f64 = 0.15;
pub const FRUIT_PROB: f64       = 0.20;

/// leaf sway, drawn once per leaf
pub const SWAY_AMPLITUDE_DEG: Range<f32> = 4.0..12.0;
pub const SWAY_PERIOD_SECS: Range<f32>   = 1.5..4.0;

/// -------- fruit --------
pub const FRUIT_ENERGY: f32       = 10.0;
pub const FRUIT_RESPAWN_SECS: f64 = 30.0;
pub const FRUIT_DIAMETER_FRAC: f32 = 0.6;

/// -------- palettes (rgb 0..1) --------
pub const GROUND_RGB: [f32; 3] = [0.83, 0.48, 0.29];
pub const TRUNK_RGB: [f32; 3]  = [0.39, 0.20, 0.08];
pub const LEAF_RGB: [f32; 3]   = [0.20, 0.78, 0.12];
pub const FRUIT_PALETTE: [[f32; 3]; 3] = [
    [0.86, 0.16, 0.16], // red
    [0.94, 0.71, 0.12], // orange
    [0.63, 0.16, 0.63], // purple
];

/// -------- viewer --------
pub const PAN_SPEED: f32 = 300.0;
