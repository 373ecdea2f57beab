//! Immediate-mode rendering
//!
//! Each frame the scene is flattened into a list of draw primitives
//! ([`DrawCmd`]) from a read-only snapshot of the simulation state. The
//! list builder is pure and testable; submission to the host canvas is
//! wasm-only.

pub mod draw;
pub mod scene;

pub use draw::DrawCmd;
pub use scene::build_scene;
