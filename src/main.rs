//! minimal bootstrap for the endless meadow
//!
//! `meadowrun [seed]` – pan with A/D or the arrow keys.
//! Works with **Bevy 0.15**.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
    LogDiagnosticsPlugin,
};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use bevy_rapier2d::prelude::*;

use meadowrun::camera::{camera_pan_system, viewer_spawn_point};
use meadowrun::components::Viewer;
use meadowrun::{WorldConfig, WorldPlugin, WorldState};

/* ------------------------------------------------------------------------ */
/* camera                                                                   */
/* ------------------------------------------------------------------------ */
fn setup_camera(mut commands: Commands, world: Res<WorldState>, config: Res<WorldConfig>) {
    let at = viewer_spawn_point(&**world, config.viewport.x * 0.5, config.viewport);
    commands.spawn((Camera2d, Viewer, Transform::from_translation(at.extend(0.0))));
}

/* ------------------------------------------------------------------------ */
/* F11 borderless‑fullscreen toggle                                         */
/* ------------------------------------------------------------------------ */
fn toggle_fullscreen(
    keys: Res<ButtonInput<KeyCode>>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::F11) {
        let Ok(mut window) = window_q.get_single_mut() else { return };
        window.mode = match window.mode {
            WindowMode::Windowed => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
            }
            _ => WindowMode::Windowed,
        };
    }
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    let seed = WorldConfig::seed_from_args(std::env::args().skip(1));
    let config = WorldConfig::with_seed(seed);
    let resolution = config.viewport;

    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::srgb(0.18, 0.65, 1.0)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: (resolution.x, resolution.y).into(),
                resizable: false,
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(30.0))

        /* world ----------------------------------------------------------- */
        .add_plugins(WorldPlugin { config })
        .add_systems(Startup, setup_camera)

        /* frame‑update systems ------------------------------------------- */
        .add_systems(Update, (camera_pan_system, toggle_fullscreen))
        .run();
}
