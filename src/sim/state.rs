//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::consts::*;

/// Top-level phase of the jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlimePhase {
    /// Resting on the platform, waiting for the pointer
    #[default]
    #[serde(rename = "slime_idle")]
    Idle,
    /// Pointer held, charging power
    #[serde(rename = "slime_trying_jump")]
    TryingJump,
    /// Airborne, ignores input
    #[serde(rename = "slime_jumping")]
    Jumping,
    /// Landed, sliding the next platform into place, ignores input
    #[serde(rename = "slime_transition")]
    Transition,
}

impl SlimePhase {
    /// Tag shown in the debug overlay
    pub fn as_str(&self) -> &'static str {
        match self {
            SlimePhase::Idle => "slime_idle",
            SlimePhase::TryingJump => "slime_trying_jump",
            SlimePhase::Jumping => "slime_jumping",
            SlimePhase::Transition => "slime_transition",
        }
    }
}

/// A cosmetic sweat droplet flung off while charging
///
/// Position and velocity are canvas fractions relative to the slime origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweatDrop {
    pub pos: Vec2,
    /// Canvas fractions per second, +y is down
    pub vel: Vec2,
    /// Removed once this reaches zero or below
    pub life_ms: f32,
}

impl SweatDrop {
    /// New droplet at the slime origin flying up and sideways
    pub fn spawn(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(
                rng.random_range(-0.25..0.25),
                -rng.random_range(0.3..0.4),
            ),
            life_ms: SWEAT_LIFE_MS,
        }
    }

    /// Integrate position, apply gravity and burn lifetime
    pub fn age(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;
        self.pos += self.vel * dt;
        self.vel.y += SWEAT_GRAVITY * dt;
        self.life_ms -= dt_ms;
    }

    pub fn is_alive(&self) -> bool {
        self.life_ms > 0.0
    }
}

/// Actor sub-state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlimeState {
    /// Charge in `[0, MAX_POWER]`
    pub power: f32,
    /// Time since the slime's current animation started
    pub animation_time_ms: f32,
    pub sweat: Vec<SweatDrop>,
}

impl SlimeState {
    /// Add charge for `dt_ms` of holding, capped at [`MAX_POWER`]
    pub fn charge(&mut self, dt_ms: f32) {
        self.power = (self.power + POWER_PER_SECOND * dt_ms / 1000.0).clamp(0.0, MAX_POWER);
    }

    /// Spawn a droplet if the spawn schedule allows one more
    pub fn maybe_spawn_sweat(&mut self, rng: &mut Pcg32) -> bool {
        let due = self.animation_time_ms / SWEAT_SPAWN_INTERVAL_MS >= self.sweat.len() as f32;
        if due && self.sweat.len() < MAX_SWEAT_DROPS {
            self.sweat.push(SweatDrop::spawn(rng));
            true
        } else {
            false
        }
    }

    /// Age every droplet and drop the dead ones
    pub fn age_sweat(&mut self, dt_ms: f32) {
        for drop in &mut self.sweat {
            drop.age(dt_ms);
        }
        self.sweat.retain(SweatDrop::is_alive);
    }
}

/// Complete game state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the droplet RNG was created from
    pub seed: u64,
    pub score: u32,
    /// Starts at 1
    pub difficulty: u32,
    pub current_level: Level,
    pub phase: SlimePhase,
    /// Time spent in the current phase (reset on every transition)
    pub animation_time_ms: f32,
    pub slime: SlimeState,
    /// Droplet spray RNG
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh game: idle on the easy level
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            difficulty: 1,
            current_level: Level::EASY,
            phase: SlimePhase::Idle,
            animation_time_ms: 0.0,
            slime: SlimeState::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Switch phase and reset the phase timer
    pub(crate) fn enter(&mut self, phase: SlimePhase) {
        log::debug!("{} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
        self.animation_time_ms = 0.0;
    }
}
