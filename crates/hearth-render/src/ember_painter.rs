use hearth_core::types::ViewportMetrics;
use hearth_sim::embers::Ember;

use crate::surface::{DrawSurface, Rect};

/// Draws embers as solid squares, stretched vertically by the page height scale.
#[derive(Debug, Clone, Copy)]
pub struct EmberPainter {
    pixel_scale: f64,
}

impl EmberPainter {
    pub fn new(pixel_scale: f64) -> Self {
        Self { pixel_scale }
    }

    pub fn pixel_scale(&self) -> f64 {
        self.pixel_scale
    }

    /// On-screen footprint: `size * scale` wide, `size * scale * height_scale` tall.
    pub fn ember_rect(&self, ember: &Ember, viewport: &ViewportMetrics) -> Rect {
        let side = ember.size as f64 * self.pixel_scale;
        Rect::new(ember.pos.x, ember.pos.y, side, side * viewport.height_scale)
    }

    /// Clear the overlay and draw every ember in field order, so newer embers
    /// land on top. Returns the number of rectangles issued.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        embers: &[Ember],
        viewport: &ViewportMetrics,
    ) -> usize {
        surface.clear();
        for ember in embers {
            surface.fill_rect(self.ember_rect(ember, viewport), ember.color, ember.alpha());
        }
        embers.len()
    }
}
