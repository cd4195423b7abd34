//! collectable fruit: available ⇄ depleted, with a scheduled respawn
use bevy::math::Vec3;
use rand_chacha::ChaCha8Rng;

use crate::column_rng::ColumnRng;
use crate::constants::{FRUIT_ENERGY, FRUIT_RESPAWN_SECS};
use crate::tree::{fruit_tint, FruitSpawn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FruitState {
    Available,
    Depleted,
}

/// Runtime state of one fruit. Respawn colours continue the fruit's own
/// stream, so the sequence of looks is fixed by the world seed.
#[derive(Clone, Debug)]
pub struct Fruit {
    stream: ChaCha8Rng,
    tint: Vec3,
    state: FruitState,
}

impl Fruit {
    pub fn from_spawn(spawn: &FruitSpawn, column_rng: &ColumnRng) -> Self {
        let mut stream = FruitSpawn::stream(column_rng, spawn.column, spawn.cell);
        let tint = fruit_tint(&mut stream);
        Self {
            stream,
            tint,
            state: FruitState::Available,
        }
    }

    #[inline]
    pub fn state(&self) -> FruitState {
        self.state
    }

    #[inline]
    pub fn tint(&self) -> Vec3 {
        self.tint
    }

    /// Deplete the fruit; returns the energy it restores, or `None` when it
    /// was already depleted.
    pub fn pick_up(&mut self) -> Option<f32> {
        match self.state {
            FruitState::Available => {
                self.state = FruitState::Depleted;
                Some(FRUIT_ENERGY)
            }
            FruitState::Depleted => None,
        }
    }

    /// Back to available with a freshly drawn tint.
    pub fn respawn(&mut self) -> Vec3 {
        self.tint = fruit_tint(&mut self.stream);
        self.state = FruitState::Available;
        self.tint
    }
}

/* ===========================================================
   respawn timers – processed by the per‑tick driver
   =========================================================== */

/// One‑shot deferred respawns keyed by `K`, driven by accumulated tick time.
#[derive(Clone, Debug)]
pub struct RespawnSchedule<K> {
    now: f64,
    delay: f64,
    pending: Vec<(f64, K)>,
}

impl<K> Default for RespawnSchedule<K> {
    fn default() -> Self {
        Self::new(FRUIT_RESPAWN_SECS)
    }
}

impl<K> RespawnSchedule<K> {
    pub fn new(delay: f64) -> Self {
        Self {
            now: 0.0,
            delay,
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due `delay` seconds after the current time; returns the due time.
    pub fn schedule(&mut self, key: K) -> f64 {
        let at = self.now + self.delay;
        self.pending.push((at, key));
        at
    }

    /// Advance the clock and hand back every key whose time has come,
    /// earliest first.
    pub fn advance(&mut self, dt: f64) -> Vec<K> {
        self.now += dt.max(0.0);
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, k)| k).collect()
    }
}
