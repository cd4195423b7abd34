//! single‑tree synthesis: trunk, canopy leaves & fruit
use bevy::math::{IVec2, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::column_rng::{salt, ColumnRng};
use crate::constants::*;
use crate::grid::{Layer, TileRole};
use crate::terrain::Tile;

/// Sway parameters for a decorative leaf, rolled once at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafSway {
    pub amplitude_deg: f32,
    pub period_secs: f32,
    /// fraction of a period, in [0, 1)
    pub phase: f32,
}

/// Everything needed to (re)build a fruit's runtime state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FruitSpawn {
    pub pos: IVec2,
    pub column: i32,
    /// canopy cell, row‑major
    pub cell: u32,
    pub tint: Vec3,
}

impl FruitSpawn {
    /// The fruit's own appearance stream. The first draw is the spawn tint;
    /// every respawn continues from there.
    pub fn stream(column_rng: &ColumnRng, column: i32, cell: u32) -> ChaCha8Rng {
        column_rng.stream_for(column, salt::FRUIT_BASE + cell as u64)
    }
}

#[inline]
pub fn fruit_tint(stream: &mut ChaCha8Rng) -> Vec3 {
    Vec3::from_array(FRUIT_PALETTE[stream.gen_range(0..FRUIT_PALETTE.len())])
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorldObject {
    /// immovable, collides from every direction (ground & trunk)
    Block(Tile),
    /// cosmetic, no collision
    Leaf { tile: Tile, sway: LeafSway },
    /// pickup‑only collision
    Fruit(FruitSpawn),
}

impl WorldObject {
    pub fn role(&self) -> TileRole {
        match self {
            WorldObject::Block(t) | WorldObject::Leaf { tile: t, .. } => t.role,
            WorldObject::Fruit(_) => TileRole::Fruit,
        }
    }

    pub fn pos(&self) -> IVec2 {
        match self {
            WorldObject::Block(t) | WorldObject::Leaf { tile: t, .. } => t.pos,
            WorldObject::Fruit(f) => f.pos,
        }
    }

    #[inline]
    pub fn layer(&self) -> Layer {
        self.role().layer()
    }
}

/// An object paired with the layer it wants to be inserted into.
#[derive(Clone, Debug, PartialEq)]
pub struct Placed {
    pub layer: Layer,
    pub object: WorldObject,
}

impl From<WorldObject> for Placed {
    fn from(object: WorldObject) -> Self {
        Self { layer: object.layer(), object }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub column: i32,
    pub trunk_height: i32,
    pub parts: Vec<Placed>,
}

impl Tree {
}

/// Build the tree rooted on `surface_y` (top of the ground tile) at `column`.
/// `shape` is the column's SHAPE stream; canopy decisions continue it.
pub fn grow_tree(
    column: i32,
    surface_y: i32,
    tile_size: i32,
    shape: &mut ChaCha8Rng,
    column_rng: &ColumnRng,
) -> Tree {
    let p = tile_size;
    let trunk_height = TRUNK_MIN_TILES + shape.gen_range(0..TRUNK_EXTRA_TILES);
    let mut parts = Vec::with_capacity((trunk_height + CANOPY_SIZE * CANOPY_SIZE) as usize);

    /* trunk (stacks upward from the surface) ---------------------------- */
    for i in 0..trunk_height {
        parts.push(
            WorldObject::Block(Tile {
                pos: IVec2::new(column, surface_y - p * (i + 1)),
                role: TileRole::Trunk,
                tint: Vec3::from_array(TRUNK_RGB),
            })
            .into(),
        );
    }

    /* canopy ------------------------------------------------------------ */
    let trunk_top = surface_y - p * trunk_height;
    let half = CANOPY_SIZE / 2;
    let mut cell = 0u32;
    for row in 0..CANOPY_SIZE {
        for dx in -half..CANOPY_SIZE - half {
            let pos = IVec2::new(column + dx * p, trunk_top - p * (row + 1));
            let this_cell = cell;
            cell += 1;

            if shape.gen::<f64>() < LEAF_MISSING_PROB {
                continue;
            }
            let object = if shape.gen::<f64>() < FRUIT_PROB {
                let mut stream = FruitSpawn::stream(column_rng, column, this_cell);
                WorldObject::Fruit(FruitSpawn {
                    pos,
                    column,
                    cell: this_cell,
                    tint: fruit_tint(&mut stream),
                })
            } else {
                WorldObject::Leaf {
                    tile: Tile {
                        pos,
                        role: TileRole::Leaf,
                        tint: Vec3::from_array(LEAF_RGB),
                    },
                    sway: LeafSway {
                        amplitude_deg: shape.gen_range(SWAY_AMPLITUDE_DEG),
                        period_secs: shape.gen_range(SWAY_PERIOD_SECS),
                        phase: shape.gen(),
                    },
                }
            };
            parts.push(object.into());
        }
    }

    Tree {
        column,
        trunk_height,
        parts,
    }
}
