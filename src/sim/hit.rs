//! Touch hit testing
//!
//! Maps a tap to the topmost balloon whose hit circle contains the point.
//! Runs between frame ticks, on the same thread, driven by host touch
//! events.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::palette::Color;

use super::particle;
use super::state::SceneState;

/// Outcome of a successful pop, consumed by the driver for sound/haptics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopHit {
    pub balloon_id: u32,
    pub pos: Vec2,
    pub color: Color,
}

/// Pop the topmost balloon under `point`, if any
///
/// Balloons are scanned in reverse creation order, so where balloons
/// overlap, the most recently spawned (drawn topmost) wins. The accepted
/// squared distance is `HIT_MARGIN * radius²`, slightly more forgiving
/// than the drawn circle. At most one balloon pops per touch.
///
/// On a hit the balloon is marked popped and removed, a confetti burst
/// spawns at its center, and the score increments by one. A miss changes
/// nothing and returns `None`.
pub fn pop_at(state: &mut SceneState, point: Vec2) -> Option<PopHit> {
    let idx = state.balloons.iter().rposition(|b| {
        !b.popped && point.distance_squared(b.pos) <= HIT_MARGIN * b.radius * b.radius
    })?;

    let mut balloon = state.balloons.remove(idx);
    balloon.popped = true;

    let count = state.rng.random_range(BURST_COUNT_MIN..=BURST_COUNT_MAX);
    particle::spawn_burst(
        &mut state.particles,
        &mut state.rng,
        balloon.pos,
        balloon.color,
        count,
        state.max_particles,
    );
    state.score += 1;
    log::debug!("balloon {} popped, score {}", balloon.id, state.score);

    Some(PopHit {
        balloon_id: balloon.id,
        pos: balloon.pos,
        color: balloon.color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BALLOON_PALETTE;
    use crate::sim::state::{Balloon, SceneBounds};

    fn state_with_balloons(balloons: Vec<Balloon>) -> SceneState {
        let mut state = SceneState::new(21, SceneBounds::new(480.0, 800.0));
        state.balloons = balloons;
        state
    }

    fn balloon(id: u32, x: f32, y: f32, radius: f32) -> Balloon {
        Balloon {
            id,
            pos: Vec2::new(x, y),
            rise_speed: 80.0,
            radius,
            color: BALLOON_PALETTE[(id as usize) % BALLOON_PALETTE.len()],
            popped: false,
            wobble_phase: 0.0,
            wobble_rate: 3.0,
        }
    }

    #[test]
    fn test_pop_within_hit_margin() {
        // Squared distance 64 against 20² * 1.2 = 480: a hit
        let mut state = state_with_balloons(vec![balloon(1, 100.0, 100.0, 20.0)]);
        let hit = pop_at(&mut state, Vec2::new(108.0, 100.0)).expect("should hit");

        assert_eq!(hit.balloon_id, 1);
        assert_eq!(state.score, 1);
        assert!(state.balloons.is_empty());
        assert!(state.particles.len() >= BURST_COUNT_MIN);
        assert!(state.particles.len() <= BURST_COUNT_MAX);
    }

    #[test]
    fn test_margin_is_wider_than_visual_radius() {
        // Touch just outside the drawn circle but inside the 1.2x margin:
        // radius 20, distance 21 -> 441 <= 480
        let mut state = state_with_balloons(vec![balloon(1, 100.0, 100.0, 20.0)]);
        assert!(pop_at(&mut state, Vec2::new(121.0, 100.0)).is_some());
    }

    #[test]
    fn test_miss_just_past_margin() {
        // radius 20, distance 22 -> 484 > 480
        let mut state = state_with_balloons(vec![balloon(1, 100.0, 100.0, 20.0)]);
        assert!(pop_at(&mut state, Vec2::new(122.0, 100.0)).is_none());
        assert_eq!(state.balloons.len(), 1);
    }

    #[test]
    fn test_miss_is_a_no_op() {
        let mut state = state_with_balloons(vec![balloon(1, 100.0, 100.0, 20.0)]);
        let result = pop_at(&mut state, Vec2::new(400.0, 700.0));
        assert!(result.is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.balloons.len(), 1);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_overlapping_balloons_pop_newest_first() {
        let mut state = state_with_balloons(vec![
            balloon(1, 100.0, 100.0, 20.0),
            balloon(2, 105.0, 100.0, 20.0),
        ]);
        let hit = pop_at(&mut state, Vec2::new(102.0, 100.0)).expect("should hit");
        assert_eq!(hit.balloon_id, 2, "topmost (newest) balloon wins the tie");
        assert_eq!(state.balloons.len(), 1);
        assert_eq!(state.balloons[0].id, 1);
    }

    #[test]
    fn test_at_most_one_pop_per_touch() {
        let mut state = state_with_balloons(vec![
            balloon(1, 100.0, 100.0, 25.0),
            balloon(2, 100.0, 100.0, 25.0),
            balloon(3, 100.0, 100.0, 25.0),
        ]);
        pop_at(&mut state, Vec2::new(100.0, 100.0));
        assert_eq!(state.score, 1);
        assert_eq!(state.balloons.len(), 2);
    }

    #[test]
    fn test_popped_balloons_are_not_hit() {
        let mut state = state_with_balloons(vec![
            balloon(1, 100.0, 100.0, 20.0),
            balloon(2, 300.0, 100.0, 20.0),
        ]);
        state.balloons[1].popped = true;
        assert!(pop_at(&mut state, Vec2::new(300.0, 100.0)).is_none());
    }

    #[test]
    fn test_pop_uses_balloon_color_for_event() {
        let mut state = state_with_balloons(vec![balloon(4, 50.0, 50.0, 18.0)]);
        let color = state.balloons[0].color;
        let hit = pop_at(&mut state, Vec2::new(50.0, 50.0)).unwrap();
        assert_eq!(hit.color, color);
        assert_eq!(hit.pos, Vec2::new(50.0, 50.0));
    }
}
