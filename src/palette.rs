//! Fixed color palette for balloons and confetti
//!
//! Balloons draw from a small festival palette; confetti either inherits
//! the popped balloon's color or re-rolls from the same palette.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An opaque RGB color (alpha is a render-time concern)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Balloon colors, in no particular order
pub const BALLOON_PALETTE: [Color; 6] = [
    Color::rgb(0xe5, 0x3e, 0x4e), // red
    Color::rgb(0xf2, 0x9e, 0x2e), // orange
    Color::rgb(0xf7, 0xd4, 0x4c), // yellow
    Color::rgb(0x4c, 0xaf, 0x6e), // green
    Color::rgb(0x3e, 0x7c, 0xc9), // blue
    Color::rgb(0x9b, 0x59, 0xb6), // purple
];

/// Pick a random palette color
pub fn pick<R: Rng>(rng: &mut R) -> Color {
    BALLOON_PALETTE[rng.random_range(0..BALLOON_PALETTE.len())]
}
