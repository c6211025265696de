//! Level descriptors and the next-level generator

use serde::{Deserialize, Serialize};

/// The platform the slime jumps to next
///
/// `length` and `distance` are measured in slime widths, `speed` in slime
/// widths per second (0 = stationary).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub length: f32,
    pub speed: f32,
    pub distance: f32,
}

impl Level {
    /// Long, still platform two widths away
    pub const EASY: Level = Level {
        length: 5.0,
        speed: 0.0,
        distance: 2.0,
    };

    /// Short platform moving at half a width per second
    pub const HARD: Level = Level {
        length: 1.5,
        speed: 0.5,
        distance: 3.0,
    };
}

impl Default for Level {
    fn default() -> Self {
        Level::EASY
    }
}

/// Generate the level that follows a landing
///
/// Difficulty does not shape the platform yet: every level is [`Level::EASY`].
pub fn next_level(_difficulty: u32) -> Level {
    Level::EASY
}
