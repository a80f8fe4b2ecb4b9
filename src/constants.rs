//! This module contains all the constants used in the game.
//!
//! Gameplay values that successive versions of the game disagreed on live in
//! [`crate::config::Tuning`]; the values here are its defaults.

use glam::UVec2;

/// Frames simulated per second by the headless runner.
pub const FRAMERATE: u32 = 50;

/// The screen size used to derive a level's cell side when none is configured.
pub const DEFAULT_SCREEN_SIZE: UVec2 = UVec2::new(800, 600);

/// Distance, in grid units, that collision boxes are shrunk by on every side.
///
/// Two entities in neighbouring cells never overlap, while anything sharing a cell does.
pub const BOX_INSET: f32 = 1.0 / 32.0;

/// The most players a level file can declare (one per start digit).
pub const MAX_PLAYERS: usize = 9;

pub mod player {
    /// Cells travelled per logical step.
    pub const STEP_LENGTH: f32 = 1.0;
    /// Cells per second.
    pub const SPEED: f32 = 4.0;
    pub const SPEED_STEP: f32 = 1.0;
    pub const MAX_SPEED: f32 = 9.0;
    pub const BOMBS: u32 = 1;
    pub const RADIUS: u32 = 1;
}

pub mod bomb {
    /// Seconds between placement and detonation.
    pub const FUSE: f32 = 3.0;
    /// Below this many seconds the bomb is drawn as about to explode.
    pub const LOW_FUSE: f32 = 1.0;
    /// Cells per second for a pushed bomb.
    pub const SLIDE_SPEED: f32 = 6.0;
}

pub mod fire {
    pub const LIFETIME: f32 = 1.0;
}

pub mod bonus {
    /// Chance that a destroyed box leaves a bonus behind.
    pub const SPAWN_CHANCE: f64 = 0.3;
    /// How long a bad bonus lasts, in seconds.
    pub const DEBUFF_DURATION: f32 = 8.0;
    pub const SLOW_SPEED: f32 = 2.0;
    pub const REDUCED_RADIUS: u32 = 1;
    pub const ANIMATION_FRAMES: u8 = 4;
    /// Seconds each animation frame is shown.
    pub const FRAME_TIME: f32 = 0.125;
}
