//! Balloon spawner and motion
//!
//! While the minigame runs, elapsed time accumulates and one balloon is
//! spawned per full interval. The accumulator can fire several times in a
//! single update, so the spawn rate holds under variable frame timing.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::palette;
use crate::wrap_phase;

use super::state::{Balloon, SceneState};

/// Advance balloons by `dt` seconds and retire what's done
///
/// Non-popped balloons rise by `rise_speed * dt`; the wobble phase advances
/// independently for render-time sway. Popped balloons and balloons fully
/// above the despawn line are removed. Returns the active balloon count,
/// which always equals `state.balloons.len()` after the update.
pub fn update(state: &mut SceneState, dt: f32) -> usize {
    if state.is_running() {
        state.spawn_accum += dt;
        while state.spawn_accum >= BALLOON_SPAWN_INTERVAL {
            state.spawn_accum -= BALLOON_SPAWN_INTERVAL;
            spawn_balloon(state);
        }
    }

    for balloon in &mut state.balloons {
        balloon.pos.y -= balloon.rise_speed * dt;
        balloon.wobble_phase = wrap_phase(balloon.wobble_phase + balloon.wobble_rate * dt);
    }

    state
        .balloons
        .retain(|b| !b.popped && b.pos.y + b.radius > -BALLOON_DESPAWN_MARGIN);

    state.balloons.len()
}

/// Spawn one balloon at the bottom of the visible area
///
/// Horizontal position is random within the spawn margin; radius, rise
/// speed, wobble and palette color are randomized per balloon.
pub(crate) fn spawn_balloon(state: &mut SceneState) {
    let id = state.next_balloon_id();
    let (x_min, x_max) = state.bounds.balloon_spawn_range();
    let radius = state.rng.random_range(BALLOON_MIN_RADIUS..=BALLOON_MAX_RADIUS);
    let balloon = Balloon {
        id,
        pos: Vec2::new(
            state.rng.random_range(x_min..=x_max),
            state.bounds.height + radius,
        ),
        rise_speed: state.rng.random_range(BALLOON_MIN_RISE..=BALLOON_MAX_RISE),
        radius,
        color: palette::pick(&mut state.rng),
        popped: false,
        wobble_phase: state.rng.random_range(0.0..std::f32::consts::TAU),
        wobble_rate: state
            .rng
            .random_range(BALLOON_MIN_WOBBLE_RATE..=BALLOON_MAX_WOBBLE_RATE),
    };
    state.balloons.push(balloon);
}
