//! 2D canvas backend

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::RenderSurface;

/// Draws onto an HTML canvas through its `2d` context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    /// Play-field size, taken from the canvas attributes
    pub size: (u32, u32),
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()
            .map_err(JsValue::from)?;
        Ok(Self {
            ctx,
            size: (canvas.width(), canvas.height()),
        })
    }

    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.size.0 as f32, self.size.1 as f32)
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }
}
