//! Actor motion model
//!
//! Guards and horses patrol a bounded horizontal path, reversing direction
//! at the bounds. Pure function of actor state and the elapsed delta.

use crate::wrap_phase;

use super::state::Actor;

/// Advance one actor by `dt` seconds
///
/// Position integrates `dir * speed * dt`; the animation phase advances at
/// the per-kind rate. On crossing a patrol bound the position is clamped to
/// that bound and the direction negated in the same update, so no overshoot
/// survives the frame and even a huge delta flips direction exactly once.
pub fn advance(actor: &mut Actor, dt: f32) {
    actor.pos.x += actor.dir * actor.speed * dt;
    actor.phase = wrap_phase(actor.phase + actor.kind.phase_rate() * dt);

    if actor.pos.x > actor.max_x {
        actor.pos.x = actor.max_x;
        actor.dir = -actor.dir;
    } else if actor.pos.x < actor.min_x {
        actor.pos.x = actor.min_x;
        actor.dir = -actor.dir;
    }
}
