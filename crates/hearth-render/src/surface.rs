use glam::DVec2;
use hearth_core::color::Rgb;

/// Axis-aligned rectangle in surface pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }
}

/// A 2D target the ember painter can draw onto.
///
/// The browser implements this over a `CanvasRenderingContext2d`; native code
/// and tests use [`RgbaSurface`].
pub trait DrawSurface {
    fn size(&self) -> (u32, u32);

    /// Change the backing size. Contents are cleared.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Source-over fill of `rect` with `color` at opacity `alpha` in [0, 1].
    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f64);
}

/// Software RGBA surface with straight (non-premultiplied) alpha.
#[derive(Debug, Clone)]
pub struct RgbaSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// Pixel span `[start, end)` covered along one axis, clipped to `limit`.
    fn span(start: f64, extent: f64, limit: u32) -> (u32, u32) {
        let lo = start.round().clamp(0.0, limit as f64);
        let hi = (start + extent).round().clamp(0.0, limit as f64);
        // NaN survives clamp; the casts below turn it into 0.
        (lo as u32, hi as u32)
    }
}

impl DrawSurface for RgbaSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f64) {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        if alpha == 0.0 {
            return;
        }
        let (x0, x1) = Self::span(rect.origin.x, rect.size.x, self.width);
        let (y0, y1) = Self::span(rect.origin.y, rect.size.y, self.height);
        let src = color.channels().map(|c| c as f64 / 255.0);

        for y in y0..y1 {
            for x in x0..x1 {
                let i = (y as usize * self.width as usize + x as usize) * 4;
                let px = &mut self.pixels[i..i + 4];
                let dst_a = px[3] as f64 / 255.0;
                let out_a = alpha + dst_a * (1.0 - alpha);
                for c in 0..3 {
                    let dst = px[c] as f64 / 255.0;
                    let out = (src[c] * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
                    px[c] = (out * 255.0).round() as u8;
                }
                px[3] = (out_a * 255.0).round() as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_fill() {
        let mut surface = RgbaSurface::new(10, 10);
        surface.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0), Rgb::new(255, 100, 0), 1.0);
        assert_eq!(surface.covered_pixels(), 8);
        assert_eq!(surface.pixel(2, 3), Some([255, 100, 0, 255]));
        assert_eq!(surface.pixel(5, 4), Some([255, 100, 0, 255]));
        assert_eq!(surface.pixel(6, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_translucent_over_transparent_keeps_color() {
        let mut surface = RgbaSurface::new(1, 1);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgb::new(200, 100, 50), 0.5);
        assert_eq!(surface.pixel(0, 0), Some([200, 100, 50, 128]));
    }

    #[test]
    fn test_source_over_accumulates_alpha() {
        let mut surface = RgbaSurface::new(1, 1);
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        surface.fill_rect(rect, Rgb::new(255, 0, 0), 0.5);
        surface.fill_rect(rect, Rgb::new(255, 0, 0), 0.5);
        let [r, g, b, a] = surface.pixel(0, 0).unwrap();
        assert_eq!([r, g, b], [255, 0, 0]);
        // About 0.5 + 0.5 * 0.5 of full coverage.
        assert!((191..=192).contains(&a), "alpha {a}");
    }

    #[test]
    fn test_clipping_and_degenerate_rects() {
        let mut surface = RgbaSurface::new(4, 4);
        surface.fill_rect(Rect::new(-10.0, -10.0, 12.0, 12.0), Rgb::new(1, 2, 3), 1.0);
        assert_eq!(surface.covered_pixels(), 4);
        surface.fill_rect(Rect::new(100.0, 100.0, 5.0, 5.0), Rgb::new(1, 2, 3), 1.0);
        surface.fill_rect(Rect::new(f64::NAN, 0.0, 5.0, 5.0), Rgb::new(1, 2, 3), 1.0);
        surface.fill_rect(Rect::new(3.0, 3.0, 1.0, 1.0), Rgb::new(1, 2, 3), 0.0);
        assert_eq!(surface.covered_pixels(), 4);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut surface = RgbaSurface::new(3, 3);
        surface.fill_rect(Rect::new(0.0, 0.0, 3.0, 3.0), Rgb::new(9, 9, 9), 1.0);
        surface.clear();
        assert_eq!(surface.covered_pixels(), 0);
        surface.resize(5, 2);
        assert_eq!(surface.size(), (5, 2));
        assert_eq!(surface.as_rgba().len(), 40);
    }
}
