use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::components::Viewer;
use crate::constants::{BASELINE_FRACTION, PAN_SPEED};
use crate::streaming::Edges;
use crate::terrain::{screen_to_world_y, GroundHeightProvider};

/// Visible world‑x bounds for a camera centred at `tf`.
#[inline]
pub fn viewer_edges(tf: &Transform, viewport_width: f32) -> Edges {
    Edges::around(tf.translation.x, viewport_width)
}

/// World‑space camera centre that frames the ground at `x` the same way the
/// initial viewport does (surface two‑thirds of the way down).
pub fn viewer_spawn_point(ground: &impl GroundHeightProvider, x: f32, viewport: Vec2) -> Vec2 {
    let surface = ground.ground_height_at(x);
    let center_screen_y = surface - viewport.y * (BASELINE_FRACTION - 0.5);
    Vec2::new(x, screen_to_world_y(center_screen_y))
}

/// simple keyboard pan standing in for an avatar the camera would follow
pub fn camera_pan_system(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut cam_q: Query<&mut Transform, With<Viewer>>,
) {
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };

    let left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    let right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    let dir = match (left, right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => return,
    };

    cam_tf.translation.x += dir * PAN_SPEED * time.delta_secs();
}
