//! Per-frame simulation step
//!
//! Advances the phase machine by one frame of elapsed time.

use super::level::next_level;
use super::state::{GameState, SlimePhase};
use crate::consts::*;
use crate::sanitize_dt;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Pointer (mouse/touch) currently held down
    pub pointer_held: bool,
}

impl TickInput {
    pub fn held() -> Self {
        Self { pointer_held: true }
    }

    pub fn released() -> Self {
        Self { pointer_held: false }
    }
}

/// Advance the game state by `dt_ms` milliseconds
///
/// Negative or non-finite deltas are treated as zero. Callers are expected to
/// cap large deltas (see [`crate::FrameClock`]).
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt = sanitize_dt(dt_ms, f32::MAX);

    state.slime.animation_time_ms += dt;

    match state.phase {
        SlimePhase::Idle => {
            if input.pointer_held {
                start_charging(state);
            }
        }
        SlimePhase::TryingJump => {
            state.slime.maybe_spawn_sweat(&mut state.rng);
            state.slime.age_sweat(dt);

            if input.pointer_held {
                state.slime.charge(dt);
            } else {
                take_off(state);
            }
        }
        SlimePhase::Jumping => {
            state.animation_time_ms += dt;
            if state.animation_time_ms >= JUMP_DURATION_MS {
                land(state);
            }
        }
        SlimePhase::Transition => {
            state.animation_time_ms += dt;
            if state.animation_time_ms >= TRANSITION_DURATION_MS {
                settle(state);
            }
        }
    }
}

/// Idle -> TryingJump
fn start_charging(state: &mut GameState) {
    state.enter(SlimePhase::TryingJump);
    state.slime.animation_time_ms = 0.0;
    state.slime.power = 0.0;
    state.slime.sweat.clear();
}

/// TryingJump -> Jumping
fn take_off(state: &mut GameState) {
    state.enter(SlimePhase::Jumping);
    state.slime.animation_time_ms = 0.0;
    state.slime.sweat.clear();
    log::debug!("Jump with power {:.2}", state.slime.power);
}

/// Jumping -> Transition
fn land(state: &mut GameState) {
    state.enter(SlimePhase::Transition);
    state.slime.animation_time_ms = 0.0;
}

/// Transition -> Idle, with the next platform in place
fn settle(state: &mut GameState) {
    state.enter(SlimePhase::Idle);
    state.slime.animation_time_ms = 0.0;
    state.slime.power = 0.0;
    state.current_level = next_level(state.difficulty);
}
