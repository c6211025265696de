//! Slime Jump - hold to charge, release to jump
//!
//! Core modules:
//! - `sim`: Phase machine, jump curves and sweat droplets
//! - `renderer`: Game state to 2D draw commands, canvas backend
//! - `driver`: Frame clock and update-then-render loop
//! - `settings`: Player preferences (LocalStorage on web)
//! - `error`: Setup and asset failures

pub mod driver;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameClock, Game};
pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Jump animation length (snappy on purpose)
    pub const JUMP_DURATION_MS: f32 = 500.0;
    /// Apex height of the jump parabola
    pub const JUMP_HEIGHT_PX: f32 = 128.0;
    /// Landing + slide-back animation length
    pub const TRANSITION_DURATION_MS: f32 = 500.0;
    /// Time spent resting on the landing spot before sliding back
    pub const TRANSITION_REST_MS: f32 = TRANSITION_DURATION_MS * 0.3;
    /// Length of a single blink
    pub const BLINK_DURATION_MS: f32 = 100.0;

    /// Sweat droplet lifetime
    pub const SWEAT_LIFE_MS: f32 = 500.0;
    /// Maximum droplets alive at once
    pub const MAX_SWEAT_DROPS: usize = 20;
    /// One new droplet per interval while charging
    pub const SWEAT_SPAWN_INTERVAL_MS: f32 = 300.0;
    /// Droplets are hidden right after spawning so they don't all start on one pixel
    pub const SWEAT_DRAW_IMMUNITY_MS: f32 = 50.0;
    /// Droplet radius
    pub const SWEAT_RADIUS_PX: f32 = 2.0;
    /// Downward acceleration on droplets (canvas fractions / s²)
    pub const SWEAT_GRAVITY: f32 = 0.5;

    /// Charge rate while the pointer is held
    pub const POWER_PER_SECOND: f32 = 2.0;
    /// Charge cap, also the jump distance in slime widths at full charge
    pub const MAX_POWER: f32 = 4.0;

    /// Slime rest anchor (canvas fractions, bottom-left of sprite)
    pub const SLIME_IDLE_X: f32 = 0.2;
    pub const SLIME_IDLE_Y: f32 = 0.5;
    /// Sprite frame size on the sheet
    pub const SLIME_WIDTH_PX: f32 = 80.0;
    pub const SLIME_HEIGHT_PX: f32 = 64.0;

    /// Largest elapsed time a single frame may feed into the simulation
    pub const MAX_FRAME_MS: f32 = 100.0;
}

/// Clamp a frame delta to `[0, max_ms]`, mapping NaN/negative to zero
#[inline]
pub fn sanitize_dt(dt_ms: f32, max_ms: f32) -> f32 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms.min(max_ms)
    } else {
        0.0
    }
}
