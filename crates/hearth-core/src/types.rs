use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::{DEFAULT_HEIGHT_SCALE, HEIGHT_SCALE_BASELINE_PX};

/// Sky colors at one phase boundary: top edge and bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GradientCheckpoint {
    pub top: Rgb,
    pub bottom: Rgb,
}

impl GradientCheckpoint {
    pub const fn new(top: Rgb, bottom: Rgb) -> Self {
        Self { top, bottom }
    }

    /// Blend both edges independently toward `other`.
    pub fn blend(self, other: GradientCheckpoint, t: f64) -> GradientCheckpoint {
        GradientCheckpoint::new(self.top.blend(other.top, t), self.bottom.blend(other.bottom, t))
    }
}

/// Display size plus the page-length scale applied to ember motion.
///
/// `height_scale = 1000 / document_height`, so a 1000 px page scales by 1,
/// a 4000 px page by 0.25. Replaced wholesale on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportMetrics {
    pub width: f64,
    pub height: f64,
    pub height_scale: f64,
}

impl ViewportMetrics {
    /// Build metrics from raw host dimensions.
    ///
    /// Negative or non-finite sizes (hidden tabs, detached documents) collapse
    /// to zero. A document height that is not positive yields the default scale.
    pub fn new(width: f64, height: f64, document_height: f64) -> Self {
        let height_scale = if document_height.is_finite() && document_height > 0.0 {
            HEIGHT_SCALE_BASELINE_PX / document_height
        } else {
            DEFAULT_HEIGHT_SCALE
        };
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            height_scale,
        }
    }

    /// Bottom-center of the viewport, where embers are born.
    pub fn spawn_origin(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height)
    }

    /// Whole-pixel surface size for canvas backing stores.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
