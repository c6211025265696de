//! Draw primitives and the surface they are replayed on

use glam::Vec2;

use crate::consts::{SLIME_HEIGHT_PX, SLIME_WIDTH_PX};

/// Straight (non-premultiplied) RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const RED: Color = Color::rgba(255, 0, 0, 1.0);
    pub const GREEN: Color = Color::rgba(0, 128, 0, 1.0);

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

/// Axis-aligned rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Frames on the slime sprite sheet (one row, left to right)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteFrame {
    Idle,
    Blink,
    Strained,
}

impl SpriteFrame {
    /// Column on the sheet
    pub fn index(&self) -> u32 {
        match self {
            SpriteFrame::Idle => 0,
            SpriteFrame::Blink => 1,
            SpriteFrame::Strained => 2,
        }
    }

    /// Source rectangle on the sheet
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            self.index() as f32 * SLIME_WIDTH_PX,
            0.0,
            SLIME_WIDTH_PX,
            SLIME_HEIGHT_PX,
        )
    }
}

/// One draw call, in the order it must be issued
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeBezier {
        from: Vec2,
        ctrl1: Vec2,
        ctrl2: Vec2,
        to: Vec2,
        color: Color,
    },
    Sprite {
        frame: SpriteFrame,
        dest: Rect,
    },
    Text {
        text: String,
        pos: Vec2,
        font_px: f32,
        color: Color,
    },
}

/// Something that can execute draw commands (a 2D canvas in the browser)
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear_rect(&mut self, rect: Rect);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_bezier(&mut self, from: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2, color: Color);
    /// Blit `source` from the sprite sheet into `dest`
    fn draw_sprite(&mut self, source: Rect, dest: Rect);
    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color);
}

impl DrawCommand {
    pub fn apply<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::Clear(rect) => surface.clear_rect(*rect),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => surface.fill_circle(*center, *radius, *color),
            DrawCommand::StrokeBezier {
                from,
                ctrl1,
                ctrl2,
                to,
                color,
            } => surface.stroke_bezier(*from, *ctrl1, *ctrl2, *to, *color),
            DrawCommand::Sprite { frame, dest } => surface.draw_sprite(frame.source_rect(), *dest),
            DrawCommand::Text {
                text,
                pos,
                font_px,
                color,
            } => surface.fill_text(text, *pos, *font_px, *color),
        }
    }
}

/// Issue every command in order
pub fn replay<S: DrawSurface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for command in commands {
        command.apply(surface);
    }
}
