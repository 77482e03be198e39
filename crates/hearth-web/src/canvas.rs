use hearth_core::color::Rgb;
use hearth_core::error::HearthError;
use hearth_core::types::GradientCheckpoint;
use hearth_render::pixel_canvas::PixelCanvas;
use hearth_render::surface::{DrawSurface, Rect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

pub const SKY_CANVAS_ID: &str = "bg";
pub const EMBER_CANVAS_ID: &str = "ember-canvas";

pub(crate) fn js_error(context: &str, err: JsValue) -> HearthError {
    HearthError::CanvasOperation(format!("{context}: {err:?}"))
}

fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, HearthError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| HearthError::ElementNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HearthError::NotACanvas(id.to_string()))
}

fn context_2d(canvas: &HtmlCanvasElement, id: &str) -> Result<CanvasRenderingContext2d, HearthError> {
    canvas
        .get_context("2d")
        .map_err(|e| js_error("getContext", e))?
        .ok_or_else(|| HearthError::ContextUnavailable(id.to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| HearthError::ContextUnavailable(id.to_string()))
}

/// The sky background: a small backing store stretched to the window by CSS.
pub struct SkyCanvas {
    ctx: CanvasRenderingContext2d,
    pixels: PixelCanvas,
}

impl SkyCanvas {
    pub fn new(document: &Document, id: &str, buffer_size: u32) -> Result<Self, HearthError> {
        let canvas = canvas_by_id(document, id)?;
        canvas.set_width(buffer_size);
        canvas.set_height(buffer_size);
        canvas
            .style()
            .set_property("image-rendering", "pixelated")
            .map_err(|e| js_error("image-rendering", e))?;
        let ctx = context_2d(&canvas, id)?;

        log::info!("Sky canvas '{id}': {buffer_size}x{buffer_size} backing store");
        Ok(Self {
            ctx,
            pixels: PixelCanvas::square(buffer_size),
        })
    }

    /// Render the gradient into the pixel buffer and blit it in one call.
    pub fn paint(&mut self, colors: GradientCheckpoint) -> Result<(), HearthError> {
        self.pixels.render_checkpoint(colors);
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.pixels.as_rgba()),
            self.pixels.width(),
            self.pixels.height(),
        )
        .map_err(|e| js_error("ImageData", e))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| js_error("putImageData", e))
    }
}

/// Full-resolution transparent overlay the embers are drawn on.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(document: &Document, id: &str) -> Result<Self, HearthError> {
        let canvas = canvas_by_id(document, id)?;
        let ctx = context_2d(&canvas, id)?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
        self.ctx.set_global_alpha(1.0);
    }
}
