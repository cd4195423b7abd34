//! bevy wiring: bootstrap, per‑frame streaming, fruit pickup/respawn, leaf sway
use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::camera::viewer_edges;
use crate::components::*;
use crate::config::WorldConfig;
use crate::scene::{tint_color, CommandsSink};
use crate::world::World;

/// The world driver; fruit are keyed by their entity.
#[derive(Resource, Deref, DerefMut)]
pub struct WorldState(pub World<Entity>);

pub struct WorldPlugin {
    pub config: WorldConfig,
}

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(WorldState(World::new(&self.config)))
            .add_event::<EnergyRestored>()
            .add_systems(Startup, bootstrap_world_system)
            .add_systems(
                Update,
                (
                    fruit_respawn_system, // clock first, so pickups see this frame's time
                    fruit_pickup_system,
                    stream_world_system,
                    leaf_sway_system,
                )
                    .chain(),
            );
    }
}

/* ===========================================================
   startup
   =========================================================== */
pub fn bootstrap_world_system(mut commands: Commands, world: Res<WorldState>, config: Res<WorldConfig>) {
    let rng = *world.flora().column_rng();
    let mut sink = CommandsSink::new(&mut commands, rng, config.tile_size);
    if let Err(err) = world.bootstrap(&mut sink) {
        error!("world bootstrap failed: {err}");
    }
}

/* ===========================================================
   fruit_respawn_system – advances the world clock every frame
   =========================================================== */
pub fn fruit_respawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut world: ResMut<WorldState>,
    mut fruit_q: Query<(&mut FruitTile, &mut Sprite, &mut Visibility)>,
) {
    for entity in world.advance_respawns(time.delta_secs()) {
        let Ok((mut fruit, mut sprite, mut vis)) = fruit_q.get_mut(entity) else {
            continue;
        };
        sprite.color = tint_color(fruit.respawn());
        *vis = Visibility::Visible;
        commands.entity(entity).remove::<ColliderDisabled>();
        debug!("fruit {entity:?} respawned");
    }
}

/* ===========================================================
   stream_world_system – grows the window around the viewer
   =========================================================== */
pub fn stream_world_system(
    mut commands: Commands,
    config: Res<WorldConfig>,
    mut world: ResMut<WorldState>,
    viewer_q: Query<&Transform, With<Viewer>>,
) {
    let Ok(viewer_tf) = viewer_q.get_single() else { return };
    let edges = viewer_edges(viewer_tf, config.viewport.x);

    let rng = *world.flora().column_rng();
    let mut sink = CommandsSink::new(&mut commands, rng, config.tile_size);
    if let Err(err) = world.stream(&edges, &mut sink) {
        warn!("world streaming failed, retrying next frame: {err}");
    }
}

/* ===========================================================
   fruit_pickup_system
   =========================================================== */
pub fn fruit_pickup_system(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    pickers: Query<(), With<Picker>>,
    mut fruit_q: Query<(&mut FruitTile, &mut Visibility)>,
    mut world: ResMut<WorldState>,
    mut energy: EventWriter<EnergyRestored>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = ev else { continue };
        let (a, b) = (*a, *b);
        let (fruit_e, picker) = if pickers.contains(b) {
            (a, b)
        } else if pickers.contains(a) {
            (b, a)
        } else {
            continue;
        };

        let Ok((mut fruit, mut vis)) = fruit_q.get_mut(fruit_e) else { continue };
        let Some(amount) = fruit.pick_up() else { continue };

        *vis = Visibility::Hidden;
        commands.entity(fruit_e).insert(ColliderDisabled);
        let due = world.schedule_respawn(fruit_e);
        energy.send(EnergyRestored { amount, picker });
        debug!("fruit {fruit_e:?} picked by {picker:?} (+{amount}), back at {due:.1}s");
    }
}

/* ===========================================================
   leaf_sway_system – parameters fixed at creation
   =========================================================== */
pub fn leaf_sway_system(time: Res<Time>, mut q: Query<(&LeafSwayAnim, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (sway, mut tf) in &mut q {
        let angle = sway.amplitude_deg.to_radians()
            * (TAU * (t / sway.period_secs + sway.phase)).sin();
        tf.rotation = Quat::from_rotation_z(angle);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::constants::FRUIT_RESPAWN_SECS;
    use crate::fruit::FruitState;
    use crate::grid::TileRole;
    use bevy::time::TimeUpdateStrategy;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<CollisionEvent>()
            .add_plugins(WorldPlugin {
                config: WorldConfig::with_seed(42),
            });
        app
    }

    fn count_role(app: &mut App, role: TileRole) -> usize {
        let world = app.world_mut();
        let mut q = world.query::<&TileSprite>();
        q.iter(world).filter(|t| t.role == role).count()
    }

    fn move_viewer(app: &mut App, viewer: Entity, x: f32) {
        app.world_mut()
            .get_mut::<Transform>(viewer)
            .unwrap()
            .translation
            .x = x;
    }

    #[test]
    fn startup_materializes_the_viewport() {
        let mut app = app();
        app.update();
        let depth = app.world().resource::<WorldState>().terrain().depth_tiles() as usize;
        assert_eq!(count_role(&mut app, TileRole::Ground), 27 * depth);

        let world = app.world_mut();
        let mut q = world.query::<(&TileSprite, Option<&RigidBody>, Option<&Collider>)>();
        for (tile, body, collider) in q.iter(world) {
            match tile.role {
                TileRole::Ground | TileRole::Trunk => {
                    assert_eq!(body, Some(&RigidBody::Fixed));
                    assert!(collider.is_some());
                }
                TileRole::Leaf => assert!(body.is_none() && collider.is_none()),
                TileRole::Fruit => assert!(body.is_none() && collider.is_some()),
            }
        }
    }

    #[test]
    fn moving_viewer_streams_new_strips() {
        let mut app = app();
        let viewer = app
            .world_mut()
            .spawn((Viewer, Transform::from_xyz(400.0, -300.0, 0.0)))
            .id();
        app.update();
        let before = count_role(&mut app, TileRole::Ground);

        move_viewer(&mut app, viewer, 1200.0);
        app.update();
        app.update();

        let after = count_role(&mut app, TileRole::Ground);
        assert!(after > before);
        let bounds = app.world().resource::<WorldState>().window().bounds();
        assert!(bounds.max_x >= 1200 + 400 + 60);
    }

    /// walks the viewer right until some fruit has been spawned
    fn find_fruit(app: &mut App, viewer: Entity) -> Entity {
        let mut x = 400.0;
        loop {
            let world = app.world_mut();
            let mut q = world.query_filtered::<Entity, With<FruitTile>>();
            if let Some(e) = q.iter(world).next() {
                return e;
            }
            x += 600.0;
            assert!(x < 200_000.0, "no fruit grown");
            move_viewer(app, viewer, x);
            app.update();
        }
    }

    fn touch(app: &mut App, fruit: Entity, picker: Entity) {
        app.world_mut().send_event(CollisionEvent::Started(
            fruit,
            picker,
            CollisionEventFlags::empty(),
        ));
    }

    #[test]
    fn picker_collects_fruit_once() {
        let mut app = app();
        let viewer = app
            .world_mut()
            .spawn((Viewer, Transform::from_xyz(400.0, -300.0, 0.0)))
            .id();
        let picker = app.world_mut().spawn((Picker, Transform::default())).id();
        app.update();
        let fruit = find_fruit(&mut app, viewer);

        for _ in 0..2 {
            touch(&mut app, fruit, picker);
            app.update();
        }

        let state = app.world().get::<FruitTile>(fruit).unwrap().state();
        assert_eq!(state, FruitState::Depleted);
        assert_eq!(app.world().get::<Visibility>(fruit), Some(&Visibility::Hidden));
        assert!(app.world().get::<ColliderDisabled>(fruit).is_some());
        assert_eq!(app.world().resource::<WorldState>().pending_respawns(), 1);

        let sent: Vec<EnergyRestored> = {
            let events = app.world().resource::<Events<EnergyRestored>>();
            events.iter_current_update_events().copied().collect()
        };
        assert!(sent.iter().all(|e| e.picker == picker));
    }

    #[test]
    fn fruit_returns_no_sooner_than_the_respawn_time() {
        let mut app = app();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        let viewer = app
            .world_mut()
            .spawn((Viewer, Transform::from_xyz(400.0, -300.0, 0.0)))
            .id();
        let picker = app.world_mut().spawn((Picker, Transform::default())).id();
        app.update();
        let fruit = find_fruit(&mut app, viewer);

        touch(&mut app, fruit, picker);
        app.update();
        let state = |app: &App| app.world().get::<FruitTile>(fruit).map(|f| f.state());
        assert_eq!(state(&app), Some(FruitState::Depleted));
        let picked_at = app.world().resource::<Time>().elapsed_secs_f64();

        let mut frames = 0;
        while state(&app) == Some(FruitState::Depleted) {
            app.update();
            frames += 1;
            assert!(frames < 1000, "fruit never came back");
        }
        let waited = app.world().resource::<Time>().elapsed_secs_f64() - picked_at;
        assert!(waited >= FRUIT_RESPAWN_SECS - 1e-6, "back after {waited}s");
        assert!(waited < FRUIT_RESPAWN_SECS + 0.15, "back after {waited}s");
        assert_eq!(app.world().get::<Visibility>(fruit), Some(&Visibility::Visible));
        assert!(app.world().get::<ColliderDisabled>(fruit).is_none());
    }

    #[test]
    fn fruit_respawns_without_a_viewer() {
        let mut app = app();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));
        let picker = app.world_mut().spawn((Picker, Transform::default())).id();
        app.update();

        // no Viewer: only the bootstrap strip exists, so make a fruit by hand
        let fruit = app
            .world_mut()
            .spawn((FruitTile(test_fruit()), Sprite::default(), Visibility::Visible))
            .id();
        touch(&mut app, fruit, picker);
        app.update();
        assert_eq!(app.world().resource::<WorldState>().pending_respawns(), 1);

        for _ in 0..40 {
            app.update();
        }
        let f = app.world().get::<FruitTile>(fruit).map(|f| f.state());
        assert_eq!(f, Some(FruitState::Available));
        assert_eq!(app.world().resource::<WorldState>().pending_respawns(), 0);
    }

    fn test_fruit() -> crate::fruit::Fruit {
        use crate::column_rng::ColumnRng;
        use crate::grid::WorldSeed;
        use crate::tree::{fruit_tint, FruitSpawn};

        let rng = ColumnRng::new(WorldSeed(42));
        let mut stream = FruitSpawn::stream(&rng, 0, 4);
        let spawn = FruitSpawn {
            pos: IVec2::new(0, 0),
            column: 0,
            cell: 4,
            tint: fruit_tint(&mut stream),
        };
        crate::fruit::Fruit::from_spawn(&spawn, &rng)
    }

    #[test]
    fn strangers_cannot_pick_fruit() {
        let mut app = app();
        let a = app.world_mut().spawn(Transform::default()).id();
        let b = app.world_mut().spawn(Transform::default()).id();
        app.update();
        app.world_mut()
            .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
        app.update();
        assert_eq!(app.world().resource::<WorldState>().pending_respawns(), 0);
    }
}
