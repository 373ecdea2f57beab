//! Confetti particle system
//!
//! Short-lived particles burst from popped balloons, fall under gravity and
//! fade out over a per-particle lifetime. The pool is capped; when full, the
//! oldest particles make room.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::palette::{self, Color};

use super::state::Particle;

/// Pool cap when no quality preset has been applied
pub const DEFAULT_MAX_PARTICLES: usize = 256;

/// Burst `count` particles at `origin`
///
/// Each particle gets a random direction and speed with a slight upward
/// bias and a randomized lifetime. Color is the popped balloon's with
/// probability `BURST_COLOR_REUSE`, otherwise a fresh palette pick.
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    base_color: Color,
    count: usize,
    cap: usize,
) {
    if cap == 0 {
        return;
    }
    for _ in 0..count {
        if particles.len() >= cap {
            particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(PARTICLE_MIN_SPEED..=PARTICLE_MAX_SPEED);
        let color = if rng.random_bool(BURST_COLOR_REUSE as f64) {
            base_color
        } else {
            palette::pick(rng)
        };
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(
                angle.cos() * speed,
                angle.sin() * speed - PARTICLE_UPWARD_BIAS,
            ),
            lifetime: rng.random_range(PARTICLE_MIN_LIFETIME..=PARTICLE_MAX_LIFETIME),
            age: 0.0,
            color,
        });
    }
}

/// Advance particles by `dt` seconds and retire the expired
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.pos += p.vel * dt;
        p.age += dt;
    }
    particles.retain(|p| p.age < p.lifetime);
}
