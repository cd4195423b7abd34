//! vegetation planner – which columns grow a tree, and what it looks like
use rand::Rng;

use crate::column_rng::{salt, ColumnRng};
use crate::constants::TREE_PROBABILITY;
use crate::error::WorldResult;
use crate::grid::{columns, snap, WorldSeed};
use crate::terrain::GroundHeightProvider;
use crate::tree::{grow_tree, Placed, Tree};

pub struct Flora<G> {
    ground: G,
    rng: ColumnRng,
    tile_size: i32,
}

impl<G: GroundHeightProvider> Flora<G> {
    pub fn new(ground: G, seed: WorldSeed, tile_size: i32) -> Self {
        Self {
            ground,
            rng: ColumnRng::new(seed),
            tile_size,
        }
    }

    #[inline]
    pub fn column_rng(&self) -> &ColumnRng {
        &self.rng
    }

    /// Presence is drawn from the column's PRESENCE stream only.
    pub fn has_tree(&self, column: i32) -> bool {
        self.rng.stream_for(column, salt::PRESENCE).gen::<f64>() < TREE_PROBABILITY
    }

    /// The tree rooted at `column`, if any. `column` must be grid aligned.
    pub fn tree_at(&self, column: i32) -> Option<Tree> {
        if !self.has_tree(column) {
            return None;
        }
        let surface = snap(self.ground.ground_height_at(column as f32), self.tile_size);
        let mut shape = self.rng.stream_for(column, salt::SHAPE);
        Some(grow_tree(column, surface, self.tile_size, &mut shape, &self.rng))
    }

    /// Every tree part whose trunk column lies in `[min_x, max_x)` after
    /// outward alignment, paired with its preferred layer.
    pub fn generate(&self, min_x: i32, max_x: i32) -> WorldResult<Vec<Placed>> {
        Ok(columns(min_x, max_x, self.tile_size)?
            .filter_map(|x| self.tree_at(x))
            .flat_map(|tree| tree.parts)
            .collect())
    }
}
