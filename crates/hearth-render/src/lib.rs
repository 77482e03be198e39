pub mod ember_painter;
pub mod pixel_canvas;
pub mod surface;

pub use ember_painter::EmberPainter;
pub use pixel_canvas::PixelCanvas;
pub use surface::{DrawSurface, Rect, RgbaSurface};
