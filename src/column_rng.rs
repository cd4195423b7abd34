//! per‑column deterministic random streams
//!
//! A stream is seeded from `hash(x, salt, world_seed)` alone, so a column
//! draws the same numbers no matter which strip discovered it or in what
//! order strips were generated.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::grid::WorldSeed;

/// purpose salts
pub mod salt {
    pub const PRESENCE: u64 = 0;
    pub const SHAPE: u64 = 1;
    /// fruit streams use `FRUIT_BASE + canopy cell index`
    pub const FRUIT_BASE: u64 = 16;
}

/// splitmix64 finaliser
#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnRng {
    seed: WorldSeed,
}

impl ColumnRng {
    pub fn new(seed: WorldSeed) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Stable per (x, salt, seed).
    #[inline]
    pub fn hash(&self, x: i32, salt: u64) -> u64 {
        let mut h = mix(self.seed.0 as u64 ^ 0xA5A5_5A5A_D3F0_1234);
        h = mix(h ^ (x as i64 as u64));
        mix(h ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    pub fn stream_for(&self, x: i32, salt: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.hash(x, salt))
    }
}
