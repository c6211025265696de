//! Game state to draw command list
//!
//! `build_scene` only reads the state, so calling it twice on the same state
//! yields the same commands.

use glam::Vec2;

use super::commands::{Color, DrawCommand, Rect, SpriteFrame};
use crate::consts::*;
use crate::sim::{GameState, SlimePhase, SweatDrop, jump_distance, jump_offset_x, jump_offset_y};

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Bottom-left of the slime sprite when at rest
    pub fn rest_anchor(&self) -> Vec2 {
        Vec2::new(SLIME_IDLE_X * self.width, SLIME_IDLE_Y * self.height)
    }
}

/// Render toggles that don't live in the game state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneOptions {
    pub debug_overlay: bool,
}

const SWEAT_COLOR: (u8, u8, u8) = (87, 19, 19);
const ARC_COLOR: Color = Color::rgba(0, 0, 0, 0.7);
const HUD_FONT_PX: f32 = 15.0;

/// Build the full frame for `state`
pub fn build_scene(state: &GameState, viewport: Viewport, options: &SceneOptions) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(8 + state.slime.sweat.len());
    out.push(DrawCommand::Clear(Rect::new(0.0, 0.0, viewport.width, viewport.height)));

    match state.phase {
        SlimePhase::Idle => {
            idle_slime(&mut out, state.slime.animation_time_ms, viewport.rest_anchor());
        }
        SlimePhase::TryingJump => {
            jump_preview(&mut out, state.slime.power, viewport);
            out.push(slime_sprite(SpriteFrame::Strained, viewport.rest_anchor(), SLIME_WIDTH_PX, SLIME_HEIGHT_PX));
            sweat(&mut out, &state.slime.sweat, viewport);
        }
        SlimePhase::Jumping => {
            let t = state.slime.animation_time_ms;
            let anchor = viewport.rest_anchor();
            let pos = Vec2::new(
                anchor.x + jump_offset_x(state.slime.power, t),
                anchor.y - jump_offset_y(t),
            );
            // Stretched mid-air
            out.push(slime_sprite(SpriteFrame::Blink, pos, SLIME_WIDTH_PX * 0.9, SLIME_HEIGHT_PX * 1.1));
        }
        SlimePhase::Transition => {
            let t = state.slime.animation_time_ms;
            let anchor = viewport.rest_anchor();
            let x = anchor.x + jump_distance(state.slime.power) * (1.0 - slide_back_progress(t));
            idle_slime(&mut out, t, Vec2::new(x, anchor.y));
        }
    }

    hud(&mut out, state, viewport, options);
    out
}

/// Sprite with its bottom-left corner at `pos`, so stretching grows upward
fn slime_sprite(frame: SpriteFrame, pos: Vec2, w: f32, h: f32) -> DrawCommand {
    DrawCommand::Sprite {
        frame,
        dest: Rect::new(pos.x, pos.y - h, w, h),
    }
}

/// Breathing height of the idle slime
pub fn breathing_height(slime_time_ms: f32) -> f32 {
    let t = slime_time_ms / 1000.0;
    SLIME_HEIGHT_PX + 2.0 * (t * 4.0).sin() + 2.0
}

/// Blink schedule
///
/// Blinking only happens in every other 5 s cycle. Inside such a cycle the
/// slime blinks at the start and again half a second later.
pub fn is_blinking(slime_time_ms: f32) -> bool {
    let t = slime_time_ms / 1000.0;
    let cycle = (t / 5.0).floor();
    let allowed = t > 5.0 && (cycle as i64) % 2 == 1;
    let into_cycle = t - cycle * 5.0;
    let blink = BLINK_DURATION_MS / 1000.0;

    allowed && (into_cycle <= blink || (0.5..=0.5 + blink).contains(&into_cycle))
}

/// Progress of the slide back to the rest anchor after landing, in `[0, 1]`
pub fn slide_back_progress(slime_time_ms: f32) -> f32 {
    if slime_time_ms <= TRANSITION_REST_MS {
        0.0
    } else {
        ((slime_time_ms - TRANSITION_REST_MS) / (TRANSITION_DURATION_MS - TRANSITION_REST_MS)).clamp(0.0, 1.0)
    }
}

fn idle_slime(out: &mut Vec<DrawCommand>, slime_time_ms: f32, pos: Vec2) {
    let frame = if is_blinking(slime_time_ms) {
        SpriteFrame::Blink
    } else {
        SpriteFrame::Idle
    };
    out.push(slime_sprite(frame, pos, SLIME_WIDTH_PX, breathing_height(slime_time_ms)));
}

/// Arc from the slime center to where the current charge would land
fn jump_preview(out: &mut Vec<DrawCommand>, power: f32, viewport: Viewport) {
    let anchor = viewport.rest_anchor();
    let from = Vec2::new(anchor.x + SLIME_WIDTH_PX / 2.0, anchor.y - SLIME_HEIGHT_PX / 2.0);
    let to = from + Vec2::new(jump_distance(power), 0.0);
    out.push(DrawCommand::StrokeBezier {
        from,
        ctrl1: from - Vec2::new(0.0, JUMP_HEIGHT_PX),
        ctrl2: to - Vec2::new(0.0, JUMP_HEIGHT_PX),
        to,
        color: ARC_COLOR,
    });
}

fn sweat(out: &mut Vec<DrawCommand>, drops: &[SweatDrop], viewport: Viewport) {
    for drop in drops {
        if drop.life_ms <= 0.0 || drop.life_ms >= SWEAT_LIFE_MS - SWEAT_DRAW_IMMUNITY_MS {
            continue;
        }

        // Fades slowly at first, then quickly
        let alpha = (drop.life_ms / SWEAT_LIFE_MS).sqrt();
        let center = Vec2::new(
            (SLIME_IDLE_X + drop.pos.x) * viewport.width + SLIME_WIDTH_PX / 2.0,
            (SLIME_IDLE_Y + drop.pos.y) * viewport.height - SLIME_HEIGHT_PX / 2.0,
        );
        let (r, g, b) = SWEAT_COLOR;
        out.push(DrawCommand::FillCircle {
            center,
            radius: SWEAT_RADIUS_PX,
            color: Color::rgba(r, g, b, alpha),
        });
    }
}

fn hud(out: &mut Vec<DrawCommand>, state: &GameState, viewport: Viewport, options: &SceneOptions) {
    if options.debug_overlay {
        let lines = [
            "debug on".to_string(),
            format!("animation time (ms): {:.2}", state.animation_time_ms),
            format!("power: {:.2}", state.slime.power),
            format!("state: {}", state.phase.as_str()),
        ];
        // Last line sits on the bottom edge, earlier lines stack upward
        let bottom = viewport.height - HUD_FONT_PX;
        let n = lines.len();
        for (i, line) in lines.into_iter().enumerate().rev() {
            out.push(DrawCommand::Text {
                text: line,
                pos: Vec2::new(0.0, bottom - HUD_FONT_PX * (n - 1 - i) as f32),
                font_px: HUD_FONT_PX,
                color: Color::RED,
            });
        }
    }

    out.push(DrawCommand::Text {
        text: format!("score: {}", state.score),
        pos: Vec2::new(0.0, 10.0),
        font_px: HUD_FONT_PX,
        color: Color::GREEN,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn sprites(commands: &[DrawCommand]) -> Vec<(SpriteFrame, Rect)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { frame, dest } => Some((*frame, *dest)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scene_starts_with_clear() {
        let state = GameState::new(1);
        let scene = build_scene(&state, VIEW, &SceneOptions::default());
        assert_eq!(scene[0], DrawCommand::Clear(Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert!(matches!(scene.last(), Some(DrawCommand::Text { text, .. }) if text == "score: 0"));
    }

    #[test]
    fn test_idle_slime_at_rest_anchor() {
        let state = GameState::new(1);
        let scene = build_scene(&state, VIEW, &SceneOptions::default());
        let sprites = sprites(&scene);
        assert_eq!(sprites.len(), 1);
        let (frame, dest) = sprites[0];
        assert_eq!(frame, SpriteFrame::Idle);
        assert_eq!(dest.x, 160.0);
        // Breathing starts at +2 px
        assert_eq!(dest.h, SLIME_HEIGHT_PX + 2.0);
        assert_eq!(dest.y + dest.h, 300.0);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut state = GameState::new(5);
        for _ in 0..40 {
            tick(&mut state, &TickInput::held(), 16.0);
        }
        let before = state.clone();
        let options = SceneOptions { debug_overlay: true };
        let a = build_scene(&state, VIEW, &options);
        let b = build_scene(&state, VIEW, &options);
        assert_eq!(a, b);
        assert_eq!(state.slime, before.slime);
        assert_eq!(state.animation_time_ms, before.animation_time_ms);
    }

    #[test]
    fn test_charging_draws_arc_strained_and_sweat() {
        let mut state = GameState::new(3);
        for _ in 0..40 {
            tick(&mut state, &TickInput::held(), 16.0);
        }
        let scene = build_scene(&state, VIEW, &SceneOptions::default());
        assert!(matches!(scene[1], DrawCommand::StrokeBezier { .. }));
        assert_eq!(sprites(&scene)[0].0, SpriteFrame::Strained);

        let visible = state
            .slime
            .sweat
            .iter()
            .filter(|d| d.life_ms < SWEAT_LIFE_MS - SWEAT_DRAW_IMMUNITY_MS)
            .count();
        let circles = scene
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, visible);
    }

    #[test]
    fn test_preview_arc_reaches_jump_distance() {
        let mut state = GameState::new(3);
        state.phase = SlimePhase::TryingJump;
        state.slime.power = MAX_POWER;
        let scene = build_scene(&state, VIEW, &SceneOptions::default());
        let DrawCommand::StrokeBezier { from, to, ctrl1, .. } = &scene[1] else {
            panic!("expected arc, got {:?}", scene[1]);
        };
        assert!((to.x - from.x - SLIME_WIDTH_PX * MAX_POWER).abs() < 1e-3);
        assert_eq!(from.y, to.y);
        assert_eq!(ctrl1.y, from.y - JUMP_HEIGHT_PX);
    }

    #[test]
    fn test_fresh_sweat_is_hidden() {
        let mut state = GameState::new(3);
        state.phase = SlimePhase::TryingJump;
        state.slime.sweat.push(SweatDrop {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life_ms: SWEAT_LIFE_MS - 10.0,
        });
        state.slime.sweat.push(SweatDrop {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life_ms: SWEAT_LIFE_MS / 4.0,
        });
        let scene = build_scene(&state, VIEW, &SceneOptions::default());
        let circles: Vec<_> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { color, .. } => Some(color.a),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 1);
        assert!((circles[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_jump_apex() {
        let mut state = GameState::new(3);
        state.phase = SlimePhase::Jumping;
        state.slime.power = MAX_POWER;
        state.slime.animation_time_ms = JUMP_DURATION_MS / 2.0;
        let scene = build_scene(&state, VIEW, &SceneOptions::default());
        let (frame, dest) = sprites(&scene)[0];
        assert_eq!(frame, SpriteFrame::Blink);
        let anchor = VIEW.rest_anchor();
        assert!((dest.x - (anchor.x + SLIME_WIDTH_PX * MAX_POWER / 2.0)).abs() < 1e-3);
        assert!((dest.y + dest.h - (anchor.y - JUMP_HEIGHT_PX)).abs() < 1e-3);
        assert!((dest.w - SLIME_WIDTH_PX * 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_transition_rests_then_slides_back() {
        let mut state = GameState::new(3);
        state.phase = SlimePhase::Transition;
        state.slime.power = MAX_POWER;
        let anchor = VIEW.rest_anchor();
        let landing = anchor.x + jump_distance(MAX_POWER);

        state.slime.animation_time_ms = TRANSITION_REST_MS / 2.0;
        let x = sprites(&build_scene(&state, VIEW, &SceneOptions::default()))[0].1.x;
        assert!((x - landing).abs() < 1e-3);

        state.slime.animation_time_ms = TRANSITION_DURATION_MS;
        let x = sprites(&build_scene(&state, VIEW, &SceneOptions::default()))[0].1.x;
        assert!((x - anchor.x).abs() < 1e-3);
    }

    #[test]
    fn test_slide_back_progress() {
        assert_eq!(slide_back_progress(0.0), 0.0);
        assert_eq!(slide_back_progress(TRANSITION_REST_MS), 0.0);
        let mid = TRANSITION_REST_MS + (TRANSITION_DURATION_MS - TRANSITION_REST_MS) / 2.0;
        assert!((slide_back_progress(mid) - 0.5).abs() < 1e-5);
        assert_eq!(slide_back_progress(TRANSITION_DURATION_MS * 3.0), 1.0);
    }

    #[test]
    fn test_blink_schedule() {
        // First cycle never blinks
        assert!(!is_blinking(50.0));
        assert!(!is_blinking(550.0));
        // Odd cycle: blink at start and half a second later
        assert!(is_blinking(5_050.0));
        assert!(!is_blinking(5_300.0));
        assert!(is_blinking(5_550.0));
        assert!(!is_blinking(5_700.0));
        // Even cycle is quiet, next odd one blinks again
        assert!(!is_blinking(10_050.0));
        assert!(is_blinking(15_050.0));
    }

    #[test]
    fn test_debug_overlay_lines() {
        let mut state = GameState::new(1);
        state.score = 3;
        let scene = build_scene(&state, VIEW, &SceneOptions { debug_overlay: true });
        let texts: Vec<_> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, pos, .. } => Some((text.as_str(), pos.y)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                ("state: slime_idle", 585.0),
                ("power: 0.00", 570.0),
                ("animation time (ms): 0.00", 555.0),
                ("debug on", 540.0),
                ("score: 3", 10.0),
            ]
        );

        let plain = build_scene(&state, VIEW, &SceneOptions::default());
        assert_eq!(
            plain
                .iter()
                .filter(|c| matches!(c, DrawCommand::Text { .. }))
                .count(),
            1
        );
    }
}
