//! Scene state and core simulation types
//!
//! One `SceneState` owns every mutable collection in the scene; nothing
//! else holds references into them between frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::palette::Color;

/// Minigame state machine. The decorative scene animates in both states;
/// only balloon spawning is gated on `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MinigamePhase {
    #[default]
    Stopped,
    Running,
}

/// Which patrol roster an actor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Guard,
    Horse,
}

impl ActorKind {
    /// Limb animation phase advance (radians/s), cosmetic only
    pub fn phase_rate(&self) -> f32 {
        match self {
            ActorKind::Guard => GUARD_PHASE_RATE,
            ActorKind::Horse => HORSE_PHASE_RATE,
        }
    }

    /// Patrol speed range (pixels/s)
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            ActorKind::Guard => (GUARD_MIN_SPEED, GUARD_MAX_SPEED),
            ActorKind::Horse => (HORSE_MIN_SPEED, HORSE_MAX_SPEED),
        }
    }
}

/// A patrolling actor (guard on the rampart, horse in the courtyard)
///
/// Walks back and forth along `[min_x, max_x]`, reversing at the bounds.
/// Fixed roster for the scene lifetime; never individually destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub pos: Vec2,
    /// Facing direction, +1 (right) or -1 (left)
    pub dir: f32,
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// Leg/tail animation phase, no feedback into motion
    pub phase: f32,
}

/// A balloon drifting up from the bottom of the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub pos: Vec2,
    /// Upward drift speed (pixels/s; y decreases while rising)
    pub rise_speed: f32,
    pub radius: f32,
    pub color: Color,
    pub popped: bool,
    /// Sideways sway phase, consumed only by rendering
    pub wobble_phase: f32,
    pub wobble_rate: f32,
}

/// A short-lived confetti particle from a balloon pop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Total lifetime (seconds); the particle is retired at `age >= lifetime`
    pub lifetime: f32,
    pub age: f32,
    pub color: Color,
}

impl Particle {
    /// Render opacity, `1 - age/lifetime` clamped to zero at expiry.
    /// Strictly decreasing in age; fade timing depends on this exactly.
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }
}

/// Viewport-derived scene geometry
///
/// All layout is proportional to the viewport so the scene composes the
/// same on any phone aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub width: f32,
    pub height: f32,
}

impl SceneBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Walkway the guards patrol, along the castle wall top
    pub fn rampart_y(&self) -> f32 {
        self.height * 0.42
    }

    /// Ground line the horses trot along
    pub fn courtyard_y(&self) -> f32 {
        self.height * 0.82
    }

    /// Horizontal extent of the castle wall
    pub fn wall_span(&self) -> (f32, f32) {
        (self.width * 0.08, self.width * 0.92)
    }

    /// Horizontal extent of the courtyard
    pub fn courtyard_span(&self) -> (f32, f32) {
        (self.width * 0.12, self.width * 0.88)
    }

    /// Range of valid balloon spawn x positions
    pub fn balloon_spawn_range(&self) -> (f32, f32) {
        (BALLOON_SPAWN_MARGIN, self.width - BALLOON_SPAWN_MARGIN)
    }
}

/// Complete scene session state
///
/// Owned by the top-level driver; `reset` returns it to the initial
/// Stopped configuration without reseeding.
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Session seed, logged for reproducibility
    pub seed: u64,
    pub bounds: SceneBounds,
    pub phase: MinigamePhase,
    /// Balloons popped since the last reset
    pub score: u32,
    /// Seconds since session start, drives render-only animation
    pub elapsed: f32,
    /// Spawn accumulator; one balloon per full interval while Running
    pub spawn_accum: f32,
    pub actors: Vec<Actor>,
    pub balloons: Vec<Balloon>,
    pub particles: Vec<Particle>,
    /// Particle cap from the active quality preset
    pub max_particles: usize,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SceneState {
    /// Create a session with a fresh roster for the given viewport
    pub fn new(seed: u64, bounds: SceneBounds) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let actors = generate_roster(bounds, &mut rng);
        log::info!("scene initialized (seed {seed}, {}x{})", bounds.width, bounds.height);
        Self {
            seed,
            bounds,
            phase: MinigamePhase::Stopped,
            score: 0,
            elapsed: 0.0,
            spawn_accum: 0.0,
            actors,
            balloons: Vec::new(),
            particles: Vec::new(),
            max_particles: super::particle::DEFAULT_MAX_PARTICLES,
            rng,
            next_id: 1,
        }
    }

    /// Start balloon spawning
    pub fn start(&mut self) {
        if self.phase != MinigamePhase::Running {
            self.phase = MinigamePhase::Running;
            log::info!("minigame running");
        }
    }

    /// Stop spawning; balloons and confetti already in flight animate out
    pub fn stop(&mut self) {
        if self.phase != MinigamePhase::Stopped {
            self.phase = MinigamePhase::Stopped;
            self.spawn_accum = 0.0;
            log::info!("minigame stopped (score {})", self.score);
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == MinigamePhase::Running
    }

    /// Return to Stopped with an empty sky, zero score, and a fresh roster
    pub fn reset(&mut self) {
        self.phase = MinigamePhase::Stopped;
        self.score = 0;
        self.spawn_accum = 0.0;
        self.balloons.clear();
        self.particles.clear();
        self.actors = generate_roster(self.bounds, &mut self.rng);
        log::info!("scene reset");
    }

    /// Adopt a new viewport; the roster is regenerated within the new bounds
    pub fn resize(&mut self, bounds: SceneBounds) {
        self.bounds = bounds;
        self.actors = generate_roster(bounds, &mut self.rng);
    }

    /// Active balloon count after the most recent update
    pub fn balloon_count(&self) -> usize {
        self.balloons.len()
    }

    /// Allocate a balloon ID
    pub fn next_balloon_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Generate the fixed guard/horse roster for a viewport
///
/// Each actor patrols its own slice of the wall or courtyard so the
/// formation reads clearly, with randomized speed, start and facing.
fn generate_roster(bounds: SceneBounds, rng: &mut Pcg32) -> Vec<Actor> {
    let mut actors = Vec::with_capacity(GUARD_COUNT + HORSE_COUNT);

    let wall = bounds.wall_span();
    actors.extend(kind_roster(
        ActorKind::Guard,
        GUARD_COUNT,
        wall,
        bounds.rampart_y(),
        rng,
    ));

    let yard = bounds.courtyard_span();
    actors.extend(kind_roster(
        ActorKind::Horse,
        HORSE_COUNT,
        yard,
        bounds.courtyard_y(),
        rng,
    ));

    actors
}

fn kind_roster(
    kind: ActorKind,
    count: usize,
    (span_start, span_end): (f32, f32),
    y: f32,
    rng: &mut Pcg32,
) -> Vec<Actor> {
    let slice = (span_end - span_start) / count as f32;
    // Inset each slice slightly so neighbors never meet at the seam
    let inset = slice * 0.06;
    let (min_speed, max_speed) = kind.speed_range();

    (0..count)
        .map(|i| {
            let min_x = span_start + slice * i as f32 + inset;
            let max_x = span_start + slice * (i + 1) as f32 - inset;
            Actor {
                kind,
                pos: Vec2::new(rng.random_range(min_x..=max_x), y),
                dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                speed: rng.random_range(min_speed..=max_speed),
                min_x,
                max_x,
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bounds() -> SceneBounds {
        SceneBounds::new(480.0, 800.0)
    }

    #[test]
    fn test_new_roster_within_bounds() {
        let state = SceneState::new(42, test_bounds());
        assert_eq!(state.actors.len(), GUARD_COUNT + HORSE_COUNT);
        for actor in &state.actors {
            assert!(actor.min_x < actor.max_x);
            assert!(actor.pos.x >= actor.min_x && actor.pos.x <= actor.max_x);
            assert!(actor.dir == 1.0 || actor.dir == -1.0);
            let (lo, hi) = actor.kind.speed_range();
            assert!(actor.speed >= lo && actor.speed <= hi);
        }
    }

    #[test]
    fn test_roster_slices_do_not_overlap() {
        let state = SceneState::new(3, test_bounds());
        let guards: Vec<_> = state
            .actors
            .iter()
            .filter(|a| a.kind == ActorKind::Guard)
            .collect();
        for pair in guards.windows(2) {
            assert!(pair[0].max_x < pair[1].min_x);
        }
    }

    #[test]
    fn test_start_stop_transitions() {
        let mut state = SceneState::new(1, test_bounds());
        assert_eq!(state.phase, MinigamePhase::Stopped);
        state.start();
        assert!(state.is_running());
        state.stop();
        assert_eq!(state.phase, MinigamePhase::Stopped);
        assert_eq!(state.spawn_accum, 0.0);
    }

    #[test]
    fn test_reset_while_running_clears_everything() {
        let mut state = SceneState::new(9, test_bounds());
        state.start();
        // Fabricate a mid-game situation: 5 balloons, 30 particles, score 4
        for _ in 0..5 {
            super::super::balloon::spawn_balloon(&mut state);
        }
        for _ in 0..2 {
            super::super::particle::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                Vec2::new(100.0, 100.0),
                crate::palette::BALLOON_PALETTE[0],
                15,
                usize::MAX,
            );
        }
        state.score = 4;
        assert_eq!(state.balloons.len(), 5);
        assert_eq!(state.particles.len(), 30);

        let old_actor_positions: Vec<f32> = state.actors.iter().map(|a| a.pos.x).collect();
        state.reset();

        assert_eq!(state.phase, MinigamePhase::Stopped);
        assert_eq!(state.score, 0);
        assert!(state.balloons.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.actors.len(), GUARD_COUNT + HORSE_COUNT);
        for actor in &state.actors {
            assert!(actor.pos.x >= actor.min_x && actor.pos.x <= actor.max_x);
        }
        // Freshly generated roster, not the old one carried over
        let new_positions: Vec<f32> = state.actors.iter().map(|a| a.pos.x).collect();
        assert_ne!(old_actor_positions, new_positions);
    }

    #[test]
    fn test_same_seed_same_roster() {
        let a = SceneState::new(1234, test_bounds());
        let b = SceneState::new(1234, test_bounds());
        for (x, y) in a.actors.iter().zip(b.actors.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.speed, y.speed);
            assert_eq!(x.dir, y.dir);
        }
    }

    #[test]
    fn test_particle_opacity_clamps_at_expiry() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            lifetime: 1.0,
            age: 1.0,
            color: crate::palette::BALLOON_PALETTE[0],
        };
        assert_eq!(p.opacity(), 0.0);
    }
}
