//! Jump curves
//!
//! All jumps take the same time; distance comes from the charged power and
//! the animation speeds up or slows down to cover it.

use std::f32::consts::PI;

use crate::consts::{JUMP_DURATION_MS, JUMP_HEIGHT_PX, MAX_POWER, SLIME_WIDTH_PX};

/// Horizontal distance in pixels a jump at `power` covers
///
/// Half-cosine ease: 0 at zero power, `SLIME_WIDTH_PX * MAX_POWER` at full
/// charge. Power is clamped to `[0, MAX_POWER]` first so the curve never
/// turns back down.
#[inline]
pub fn jump_distance(power: f32) -> f32 {
    let power = if power.is_nan() { 0.0 } else { power.clamp(0.0, MAX_POWER) };
    ((1.0 - (power * PI / MAX_POWER).cos()) / 2.0) * SLIME_WIDTH_PX * MAX_POWER
}

/// Fraction of the jump completed after `elapsed_ms`, in `[0, 1]`
#[inline]
pub fn jump_progress(elapsed_ms: f32) -> f32 {
    let t = elapsed_ms / JUMP_DURATION_MS;
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Horizontal offset from the take-off point (linear in time)
#[inline]
pub fn jump_offset_x(power: f32, elapsed_ms: f32) -> f32 {
    jump_distance(power) * jump_progress(elapsed_ms)
}

/// Height above the take-off point (parabola, peak at half time)
#[inline]
pub fn jump_offset_y(elapsed_ms: f32) -> f32 {
    let t = jump_progress(elapsed_ms);
    (-4.0 * t * t + 4.0 * t) * JUMP_HEIGHT_PX
}
