//! Deterministic scene simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as an elapsed-seconds delta, never read from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Touch-driven hit testing (`hit`) mutates the same collections as the
//! frame tick but runs between ticks; the host event loop serializes them.

pub mod actor;
pub mod balloon;
pub mod hit;
pub mod particle;
pub mod state;
pub mod tick;

pub use hit::{PopHit, pop_at};
pub use state::{Actor, ActorKind, Balloon, MinigamePhase, Particle, SceneBounds, SceneState};
pub use tick::{frame_delta, tick};
