//! 2D canvas surface for the full-viewport confetti layer

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::Surface;
use crate::Viewport;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    /// Look up the canvas by id and grab its 2D context
    pub fn from_document(document: &Document, id: &str, viewport: Viewport) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("canvas #{id} not found")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut surface = Self {
            canvas,
            ctx,
            viewport,
        };
        surface.resize(viewport);
        Ok(surface)
    }

    /// Match the backing store to the viewport and device pixel ratio.
    /// Only dimensions and transform change; safe mid-animation.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (w, h) = viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));

        // Draw in CSS pixels
        let dpr = viewport.dpr;
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        log::info!("confetti canvas {}x{} (dpr {:.2})", w, h, dpr);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
    }

    fn fill_rect(&mut self, center: Vec2, rotation: f32, size: Vec2, color: &str, alpha: f32) {
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(rotation as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.fill_rect(
            -(size.x as f64) / 2.0,
            -(size.y as f64) / 2.0,
            size.x as f64,
            size.y as f64,
        );
        self.ctx.restore();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32) {
        self.ctx.save();
        self.ctx.set_fill_style_str(color);
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
        self.ctx.restore();
    }
}
