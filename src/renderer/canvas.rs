//! Browser 2D canvas backend and sprite sheet loading

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::commands::{Color, DrawSurface, Rect};
use crate::error::GameError;

/// `DrawSurface` over a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprite_sheet: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, sprite_sheet: HtmlImageElement) -> Result<Self, GameError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GameError::Context("getContext('2d') threw".into()))?
            .ok_or_else(|| GameError::Context("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::Context("not a CanvasRenderingContext2d".into()))?;

        Ok(Self {
            canvas,
            ctx,
            sprite_sheet,
        })
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn stroke_bezier(&mut self, from: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.bezier_curve_to(
            ctrl1.x as f64,
            ctrl1.y as f64,
            ctrl2.x as f64,
            ctrl2.y as f64,
            to.x as f64,
            to.y as f64,
        );
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn draw_sprite(&mut self, source: Rect, dest: Rect) {
        let result = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &self.sprite_sheet,
                source.x as f64,
                source.y as f64,
                source.w as f64,
                source.h as f64,
                dest.x as f64,
                dest.y as f64,
                dest.w as f64,
                dest.h as f64,
            );
        if let Err(e) = result {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{}px sans", font_px));
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}

/// Load the sprite sheet; resolves once the image has decoded
pub async fn load_sprite_sheet(url: &str) -> Result<HtmlImageElement, GameError> {
    let failed = || GameError::SpriteSheet {
        url: url.to_string(),
    };

    let image = HtmlImageElement::new().map_err(|_| failed())?;
    let loaded = js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    // Source goes last so onload/onerror are already attached
    image.set_src(url);

    JsFuture::from(loaded).await.map_err(|_| failed())?;
    image.set_onload(None);
    image.set_onerror(None);

    log::info!("Sprite sheet loaded: {}", url);
    Ok(image)
}
