use bevy::prelude::*;

use crate::fruit::Fruit;
use crate::grid::TileRole;
use crate::tree::LeafSway;

/* ===========================================================
   viewer
   =========================================================== */
/// The camera whose visible edges drive streaming.
#[derive(Component)]
pub struct Viewer;

/// Anything carrying this can collect fruit (the avatar, usually).
#[derive(Component)]
pub struct Picker;

/* ===========================================================
   terrain helper components
   =========================================================== */
/// screen‑space grid position of a generated object
#[derive(Component, Clone, Copy, Debug)]
pub struct TileSprite {
    pub pos: IVec2,
    pub role: TileRole,
}

#[derive(Component, Deref, DerefMut)]
pub struct FruitTile(pub Fruit);

#[derive(Component, Deref)]
pub struct LeafSwayAnim(pub LeafSway);

/* ===========================================================
   events
   =========================================================== */
/// Fired when a picker collects a fruit.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct EnergyRestored {
    pub amount: f32,
    pub picker: Entity,
}
