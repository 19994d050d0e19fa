use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::{SiteError, SiteResult};
use crate::scene::painter::Painter;

/// [`Painter`] over a 2D canvas context.
pub struct Canvas2d(pub CanvasRenderingContext2d);

impl Canvas2d {
    pub fn of(canvas: &HtmlCanvasElement) -> SiteResult<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SiteError::Unsupported("Canvas 2D"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SiteError::Unsupported("Canvas 2D"))?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Ok(Self(ctx))
    }

    /// Detached canvas of the given size.
    pub fn offscreen(doc: &Document, width: u32, height: u32) -> SiteResult<(HtmlCanvasElement, Self)> {
        let canvas = doc
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SiteError::Unsupported("canvas element"))?;
        canvas.set_width(width);
        canvas.set_height(height);
        let painter = Self::of(&canvas)?;
        Ok((canvas, painter))
    }
}

impl Painter for Canvas2d {
    fn set_fill(&mut self, css: &str) {
        self.0.set_fill_style_str(css);
    }

    fn set_stroke(&mut self, css: &str) {
        self.0.set_stroke_style_str(css);
    }

    fn set_line_width(&mut self, width: f64) {
        self.0.set_line_width(width);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.0.set_global_alpha(alpha);
    }

    fn set_font(&mut self, css: &str) {
        self.0.set_font(css);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.0.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.0.stroke_rect(x, y, w, h);
    }

    fn polyline(&mut self, points: &[(f64, f64)]) {
        let Some(((x0, y0), rest)) = points.split_first() else { return };
        self.0.begin_path();
        self.0.move_to(*x0, *y0);
        for (x, y) in rest {
            self.0.line_to(*x, *y);
        }
        self.0.stroke();
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64) {
        self.0.begin_path();
        if self.0.arc(x, y, r, 0.0, TAU).is_ok() {
            self.0.fill();
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(e) = self.0.fill_text(text, x, y) {
            log::warn!("fill_text failed: {e:?}");
        }
    }
}
