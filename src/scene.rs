//! scene sink – turns generated objects into sprites & colliders
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::column_rng::ColumnRng;
use crate::components::{FruitTile, LeafSwayAnim, TileSprite};
use crate::constants::FRUIT_DIAMETER_FRAC;
use crate::error::WorldResult;
use crate::fruit::Fruit;
use crate::grid::Layer;
use crate::terrain::tile_center_world;
use crate::tree::WorldObject;
use crate::world::SceneSink;

#[inline]
pub fn layer_z(layer: Layer) -> f32 {
    match layer {
        Layer::Background => -1.0,
        Layer::Solid => 0.0,
    }
}

#[inline]
pub fn tint_color(rgb: Vec3) -> Color {
    Color::srgb(rgb.x, rgb.y, rgb.z)
}

/// Spawns everything it receives through `Commands`; insertion never fails.
pub struct CommandsSink<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    column_rng: ColumnRng,
    tile_size: i32,
}

impl<'a, 'w, 's> CommandsSink<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, column_rng: ColumnRng, tile_size: i32) -> Self {
        Self {
            commands,
            column_rng,
            tile_size,
        }
    }
}

impl SceneSink for CommandsSink<'_, '_, '_> {
    fn insert(&mut self, object: WorldObject, layer: Layer) -> WorldResult<()> {
        let size = self.tile_size as f32;
        let z = layer_z(layer);
        let tag = TileSprite {
            pos: object.pos(),
            role: object.role(),
        };
        let translation = tile_center_world(object.pos(), self.tile_size).extend(z);

        match object {
            /* ground & trunk: immovable, blocks from every side ----------- */
            WorldObject::Block(tile) => {
                let mut block = self.commands.spawn((
                    Sprite {
                        color: tint_color(tile.tint),
                        custom_size: Some(Vec2::splat(size)),
                        ..default()
                    },
                    Transform::from_translation(translation),
                    tag,
                ));
                if tile.role.is_solid() {
                    block.insert((RigidBody::Fixed, Collider::cuboid(size * 0.5, size * 0.5)));
                }
            }
            /* leaves: cosmetic only --------------------------------------- */
            WorldObject::Leaf { tile, sway } => {
                self.commands.spawn((
                    Sprite {
                        color: tint_color(tile.tint),
                        custom_size: Some(Vec2::splat(size)),
                        ..default()
                    },
                    Transform::from_translation(translation),
                    tag,
                    LeafSwayAnim(sway),
                ));
            }
            /* fruit: sensor, reports pickups ------------------------------ */
            WorldObject::Fruit(spawn) => {
                let diameter = size * FRUIT_DIAMETER_FRAC;
                let fruit = Fruit::from_spawn(&spawn, &self.column_rng);
                self.commands.spawn((
                    Sprite {
                        color: tint_color(fruit.tint()),
                        custom_size: Some(Vec2::splat(diameter)),
                        ..default()
                    },
                    Transform::from_translation(translation),
                    Visibility::Visible,
                    tag,
                    FruitTile(fruit),
                    Collider::ball(diameter * 0.5),
                    Sensor,
                    ActiveEvents::COLLISION_EVENTS,
                ));
            }
        }
        Ok(())
    }
}
