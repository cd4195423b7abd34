//! seeded coherent noise – thin wrapper over `noise::Perlin`
use noise::{NoiseFn, Perlin};

use crate::grid::WorldSeed;

/// row sampled for 1‑D terrain; off‑lattice so integer x never lands on a zero
const TERRAIN_ROW: f64 = 0.5;

/// Smooth, deterministic 2‑D noise. Stateless after construction, so a shared
/// reference can be sampled from anywhere.
#[derive(Clone, Copy)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perlin: Perlin::new(seed.as_noise_seed()),
        }
    }

    /// roughly in [-1, 1]
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y])
    }

    /// 1‑D slice used for the surface line
    #[inline]
    pub fn sample_line(&self, x: f64) -> f64 {
        self.sample(x, TERRAIN_ROW)
    }
}
