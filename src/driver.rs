//! Frame driver
//!
//! Turns host frame timestamps into clamped deltas and runs
//! update-then-render once per frame while the game is running.

use crate::error::GameError;
use crate::renderer::{DrawCommand, SceneOptions, Viewport, build_scene};
use crate::sanitize_dt;
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Converts absolute frame timestamps (ms) into per-frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: f64,
    max_frame_ms: f32,
}

impl FrameClock {
    /// The first delta is measured from 0, like the browser's first frame
    pub fn new(max_frame_ms: f32) -> Self {
        Self {
            last_ms: 0.0,
            max_frame_ms,
        }
    }

    /// Delta since the previous timestamp, in `[0, max_frame_ms]`
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = (timestamp_ms - self.last_ms) as f32;
        self.last_ms = timestamp_ms;
        sanitize_dt(dt, self.max_frame_ms)
    }
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub input: TickInput,
    pub settings: Settings,
    clock: FrameClock,
    running: bool,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            clock: FrameClock::new(settings.max_frame_ms),
            settings,
            running: false,
        }
    }

    /// Start the loop once assets are in; a failed load keeps it stopped
    pub fn start<T>(&mut self, assets: Result<T, GameError>) -> Result<T, GameError> {
        match assets {
            Ok(assets) => {
                self.running = true;
                log::info!("Game loop started (seed {})", self.state.seed);
                Ok(assets)
            }
            Err(e) => {
                self.running = false;
                log::error!("{}; game loop will not start", e);
                Err(e)
            }
        }
    }

    /// No further frames are produced after this
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record the pointer state; read at the next frame
    pub fn set_pointer_held(&mut self, held: bool) {
        self.input.pointer_held = held;
    }

    pub fn toggle_debug_overlay(&mut self) -> bool {
        self.settings.debug_overlay = !self.settings.debug_overlay;
        self.settings.debug_overlay
    }

    /// Run one frame: update with the elapsed time, then build the scene
    ///
    /// Returns `None` when stopped; the host should not schedule another frame.
    pub fn frame(&mut self, timestamp_ms: f64, viewport: Viewport) -> Option<Vec<DrawCommand>> {
        if !self.running {
            return None;
        }

        let dt = self.clock.advance(timestamp_ms);
        let input = self.input;
        tick(&mut self.state, &input, dt);

        let options = SceneOptions {
            debug_overlay: self.settings.debug_overlay,
        };
        Some(build_scene(&self.state, viewport, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_MS;
    use crate::sim::SlimePhase;

    const VIEW: Viewport = Viewport::new(640.0, 480.0);

    fn started() -> Game {
        let mut game = Game::new(1, Settings::default());
        game.start(Ok(())).unwrap();
        game
    }

    #[test]
    fn test_first_frame_is_clamped() {
        let mut clock = FrameClock::new(MAX_FRAME_MS);
        // Page has been open for a while before the first frame
        assert_eq!(clock.advance(12_345.0), MAX_FRAME_MS);
        assert!((clock.advance(12_361.0) - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut clock = FrameClock::new(MAX_FRAME_MS);
        clock.advance(50.0);
        assert_eq!(clock.advance(40.0), 0.0);
        assert!((clock.advance(56.0) - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_not_running_until_started() {
        let mut game = Game::new(1, Settings::default());
        assert!(!game.is_running());
        assert!(game.frame(16.0, VIEW).is_none());
    }

    #[test]
    fn test_failed_asset_load_never_starts() {
        let mut game = Game::new(1, Settings::default());
        let err = GameError::SpriteSheet {
            url: "missing.png".into(),
        };
        let result: Result<(), GameError> = game.start(Err(err.clone()));
        assert_eq!(result, Err(err));
        assert!(!game.is_running());
        game.set_pointer_held(true);
        assert!(game.frame(16.0, VIEW).is_none());
        assert_eq!(game.state.phase, SlimePhase::Idle);
    }

    #[test]
    fn test_frame_updates_then_renders() {
        let mut game = started();
        game.set_pointer_held(true);
        let scene = game.frame(16.0, VIEW).unwrap();
        assert_eq!(game.state.phase, SlimePhase::TryingJump);
        assert!(
            scene
                .iter()
                .any(|c| matches!(c, DrawCommand::StrokeBezier { .. }))
        );
    }

    #[test]
    fn test_stop_ends_frames() {
        let mut game = started();
        assert!(game.frame(16.0, VIEW).is_some());
        game.stop();
        assert!(game.frame(32.0, VIEW).is_none());
    }

    #[test]
    fn test_long_stall_does_not_skip_jump() {
        let mut game = started();
        game.set_pointer_held(true);
        game.frame(16.0, VIEW);
        game.frame(32.0, VIEW);
        game.set_pointer_held(false);
        game.frame(48.0, VIEW);
        assert_eq!(game.state.phase, SlimePhase::Jumping);

        // Tab was hidden for ten seconds; one frame only feeds MAX_FRAME_MS
        game.frame(10_048.0, VIEW);
        assert_eq!(game.state.phase, SlimePhase::Jumping);
        assert_eq!(game.state.animation_time_ms, MAX_FRAME_MS);
    }

    #[test]
    fn test_debug_toggle_changes_scene() {
        let mut game = started();
        let with_debug = game.frame(16.0, VIEW).unwrap().len();
        assert!(!game.toggle_debug_overlay());
        let without = game.frame(32.0, VIEW).unwrap().len();
        assert_eq!(with_debug, without + 4);
    }
}
