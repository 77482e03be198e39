//! Low-resolution RGBA buffer for the sky background.
//!
//! The buffer is a fixed 50x50 independent of the window; the host stretches
//! it to the display with nearest-neighbor scaling so the sky reads as chunky
//! pixels.

use hearth_core::color::Rgb;
use hearth_core::types::GradientCheckpoint;

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// A transparent-black buffer of `width * height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Square buffer, the shape the sky uses.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill every row with `blend(top, bottom, y / height)` at full opacity.
    pub fn render_vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        if self.height == 0 {
            return;
        }
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        for (y, row) in self.pixels.chunks_exact_mut(row_bytes.max(1)).enumerate() {
            let p = y as f64 / self.height as f64;
            let [r, g, b] = top.blend(bottom, p).channels();
            for px in row.chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&[r, g, b, 255]);
            }
        }
    }

    /// Convenience for painting a sampled checkpoint.
    pub fn render_checkpoint(&mut self, colors: GradientCheckpoint) {
        self.render_vertical_gradient(colors.top, colors.bottom);
    }

    /// Row-major RGBA bytes, suitable for `ImageData`.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + BYTES_PER_PIXEL]);
        Some(out)
    }

    /// Nearest-neighbor scale to `width * height`, matching how a pixelated
    /// canvas is stretched by the browser.
    pub fn upscale_nearest(&self, width: u32, height: u32) -> Vec<u8> {
        let mut out = vec![0; width as usize * height as usize * BYTES_PER_PIXEL];
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                let src = (sy as usize * self.width as usize + sx as usize) * BYTES_PER_PIXEL;
                let dst = (y as usize * width as usize + x as usize) * BYTES_PER_PIXEL;
                out[dst..dst + BYTES_PER_PIXEL]
                    .copy_from_slice(&self.pixels[src..src + BYTES_PER_PIXEL]);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_rows() {
        let mut canvas = PixelCanvas::square(50);
        canvas.render_vertical_gradient(Rgb::new(0, 0, 0), Rgb::new(100, 200, 50));

        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
        // Row 25 sits at p = 0.5.
        assert_eq!(canvas.pixel(10, 25), Some([50, 100, 25, 255]));
        // The last row stops one step short of the bottom color.
        assert_eq!(canvas.pixel(49, 49), Some([98, 196, 49, 255]));
    }

    #[test]
    fn test_rows_are_uniform() {
        let mut canvas = PixelCanvas::new(7, 5);
        canvas.render_vertical_gradient(Rgb::new(10, 20, 30), Rgb::new(250, 240, 230));
        for y in 0..5 {
            let first = canvas.pixel(0, y);
            for x in 1..7 {
                assert_eq!(canvas.pixel(x, y), first, "row {y} not uniform at x={x}");
            }
        }
    }

    #[test]
    fn test_identical_endpoints_fill_solid() {
        let mut canvas = PixelCanvas::square(50);
        let c = Rgb::new(13, 27, 42);
        canvas.render_vertical_gradient(c, c);
        assert!(canvas.as_rgba().chunks_exact(4).all(|px| px == [13, 27, 42, 255]));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let canvas = PixelCanvas::new(2, 2);
        assert_eq!(canvas.pixel(2, 0), None);
        assert_eq!(canvas.pixel(0, 2), None);
    }

    #[test]
    fn test_zero_size_canvas() {
        let mut canvas = PixelCanvas::new(0, 0);
        canvas.render_vertical_gradient(Rgb::BLACK, Rgb::new(255, 255, 255));
        assert!(canvas.as_rgba().is_empty());
        assert_eq!(canvas.upscale_nearest(4, 4), vec![0; 64]);
    }

    #[test]
    fn test_upscale_nearest_blocks() {
        let mut canvas = PixelCanvas::new(1, 2);
        canvas.render_vertical_gradient(Rgb::new(0, 0, 0), Rgb::new(200, 200, 200));
        let scaled = canvas.upscale_nearest(3, 4);
        assert_eq!(scaled.len(), 3 * 4 * 4);
        // Top two output rows come from source row 0, bottom two from row 1.
        for y in 0..4 {
            let expected = if y < 2 { [0, 0, 0, 255] } else { [100, 100, 100, 255] };
            for x in 0..3 {
                let i = (y * 3 + x) * 4;
                assert_eq!(scaled[i..i + 4], expected, "pixel ({x},{y})");
            }
        }
    }
}
