//! WASM renderer using web-sys 2D Canvas.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{BACKGROUND, fill_style};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::Sprite;

/// Draws sprites onto a canvas whose backing store matches the arena size
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size `canvas` to the arena and grab its context; returns `None` if it has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Clear the frame and draw every sprite in order
    pub fn render(&self, sprites: &[Sprite]) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);

        for sprite in sprites {
            let r = sprite.rect;
            ctx.set_fill_style_str(fill_style(sprite.kind));
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
        }
    }

    /// Dim the frame with a centred label (pause overlay)
    pub fn overlay(&self, text: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.45)");
        ctx.fill_rect(0.0, 0.0, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);
        ctx.set_fill_style_str("#FFF");
        ctx.set_font("32px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(text, ARENA_WIDTH as f64 / 2.0, ARENA_HEIGHT as f64 / 2.0);
    }
}
