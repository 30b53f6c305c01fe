//! Surface Adapter sizing: how big the backing buffer is for a given layout
//! size and device pixel ratio, and how canvas pixels map back to the CSS
//! units shapes are drawn in.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::geometry::{PixelSize, Point};
use crate::render::Extent;

/// Measured drawing surface.
///
/// `css_width` / `css_height` are the canvas box in CSS pixels; `dpr` is the
/// display's device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

impl SurfaceMetrics {
    /// Validate a measurement.
    ///
    /// Returns `None` when the box has no usable area (not attached yet,
    /// collapsed, or garbage values), so the caller skips resizing and
    /// rendering instead of producing an empty buffer. A missing or bogus
    /// `dpr` counts as 1.
    #[must_use]
    pub fn measure(css_width: f64, css_height: f64, dpr: f64) -> Option<Self> {
        if !is_positive(css_width) || !is_positive(css_height) {
            return None;
        }
        let dpr = if is_positive(dpr) { dpr } else { 1.0 };
        Some(Self { css_width, css_height, dpr })
    }

    /// Backing buffer size: `css * dpr`, rounded, never below one pixel.
    #[must_use]
    pub fn backing_size(&self) -> PixelSize {
        PixelSize::new(to_pixels(self.css_width * self.dpr), to_pixels(self.css_height * self.dpr))
    }

    /// Area to paint, in drawing units.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent { width: self.css_width, height: self.css_height }
    }

    /// Map a canvas-space point (backing pixels) into drawing units by undoing
    /// the context's `dpr` scale.
    #[must_use]
    pub fn canvas_to_drawing(&self, canvas: Point) -> Point {
        Point::new(canvas.x / self.dpr, canvas.y / self.dpr)
    }
}

fn is_positive(v: f64) -> bool {
    v > 0.0 && v.is_finite()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(v: f64) -> u32 {
    v.round().clamp(1.0, f64::from(u32::MAX)) as u32
}
