//! Per-frame scene update
//!
//! The host frame scheduler calls [`frame_delta`] with the elapsed time
//! since the previous frame, then [`tick`] with the result. Update order is
//! actors, balloons, particles; the three operate on disjoint state, so the
//! order has no observable effect, but it is kept fixed.

use crate::consts::MAX_FRAME_DELTA;

use super::state::SceneState;
use super::{actor, balloon, particle};

/// Clamp an elapsed-time measurement to a usable frame delta
///
/// `min(MAX_FRAME_DELTA, elapsed)`: a large gap (app backgrounded, debugger
/// pause) becomes one small step instead of a catastrophic jump.
#[inline]
pub fn frame_delta(elapsed: f32) -> f32 {
    elapsed.clamp(0.0, MAX_FRAME_DELTA)
}

/// Advance the whole scene by `dt` seconds
pub fn tick(state: &mut SceneState, dt: f32) {
    state.elapsed += dt;

    for actor in &mut state.actors {
        actor::advance(actor, dt);
    }
    balloon::update(state, dt);
    particle::update(&mut state.particles, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SceneBounds;
    use glam::Vec2;

    #[test]
    fn test_frame_delta_passes_small_values() {
        assert_eq!(frame_delta(0.016), 0.016);
        assert_eq!(frame_delta(0.033), 0.033);
    }

    #[test]
    fn test_frame_delta_clamps_gaps() {
        assert_eq!(frame_delta(0.5), MAX_FRAME_DELTA);
        assert_eq!(frame_delta(f32::INFINITY), MAX_FRAME_DELTA);
        assert_eq!(frame_delta(-0.1), 0.0);
    }

    #[test]
    fn test_tick_advances_whole_scene() {
        let mut state = SceneState::new(5, SceneBounds::new(480.0, 800.0));
        state.start();

        let start_xs: Vec<f32> = state.actors.iter().map(|a| a.pos.x).collect();
        for _ in 0..120 {
            tick(&mut state, 0.016);
        }

        assert!((state.elapsed - 1.92).abs() < 1e-3);
        assert!(!state.balloons.is_empty(), "spawner ran while Running");
        let moved = state
            .actors
            .iter()
            .zip(&start_xs)
            .any(|(a, &x0)| (a.pos.x - x0).abs() > 1.0);
        assert!(moved, "actors patrol over time");
    }

    #[test]
    fn test_stopped_scene_still_animates_existing_entities() {
        let mut state = SceneState::new(6, SceneBounds::new(480.0, 800.0));
        state.start();
        for _ in 0..200 {
            tick(&mut state, 0.016);
        }
        state.stop();

        let balloons_before = state.balloons.len();
        assert!(balloons_before > 0);
        let y_before: Vec<f32> = state.balloons.iter().map(|b| b.pos.y).collect();

        tick(&mut state, 0.016);

        assert!(state.balloons.len() <= balloons_before, "no new spawns");
        for (b, y0) in state.balloons.iter().zip(&y_before) {
            assert!(b.pos.y < *y0, "existing balloons keep rising");
        }
    }

    #[test]
    fn test_no_retired_entries_survive_a_frame() {
        let mut state = SceneState::new(7, SceneBounds::new(480.0, 800.0));
        state.start();
        // Run long enough for spawns, pops and retirements to interleave
        for i in 0..3000 {
            tick(&mut state, 0.016);
            if i % 50 == 0 {
                if let Some(b) = state.balloons.first() {
                    let target = b.pos;
                    crate::sim::pop_at(&mut state, target);
                }
            }
            for b in &state.balloons {
                assert!(!b.popped);
                assert!(b.pos.y + b.radius > -crate::consts::BALLOON_DESPAWN_MARGIN);
            }
            for p in &state.particles {
                assert!(p.age < p.lifetime);
            }
        }
        assert!(state.score > 0);
    }

    #[test]
    fn test_taps_between_ticks_compose() {
        let mut state = SceneState::new(8, SceneBounds::new(480.0, 800.0));
        state.start();
        for _ in 0..100 {
            tick(&mut state, frame_delta(0.02));
        }
        let count = state.balloon_count();
        let target = state.balloons.last().map(|b| b.pos).unwrap();
        assert!(crate::sim::pop_at(&mut state, target).is_some());
        assert_eq!(state.balloon_count(), count - 1);
        // Miss in a far corner: nothing changes
        let score = state.score;
        assert!(crate::sim::pop_at(&mut state, Vec2::new(1.0, 1.0)).is_none());
        assert_eq!(state.score, score);
    }
}
