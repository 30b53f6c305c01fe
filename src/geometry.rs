//! Points, on-screen rectangles and the viewport-to-canvas transform.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in viewport, canvas or drawing space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The canvas element's on-screen box in CSS pixels, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Size of the canvas backing buffer in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Convert a pointer's viewport coordinates to canvas-internal pixel coordinates.
///
/// The on-screen offset of the canvas is subtracted first, then each axis is
/// scaled by `backing / on-screen` size. That ratio is the device pixel ratio
/// applied to the backing buffer; without it hit-testing drifts away from the
/// painted geometry on high-density displays. An axis whose on-screen size is
/// not positive is left unscaled.
#[must_use]
pub fn to_canvas_space(client: Point, bounds: ClientRect, buffer: PixelSize) -> Point {
    Point {
        x: (client.x - bounds.left) * axis_scale(f64::from(buffer.width), bounds.width),
        y: (client.y - bounds.top) * axis_scale(f64::from(buffer.height), bounds.height),
    }
}

fn axis_scale(backing: f64, on_screen: f64) -> f64 {
    if on_screen > 0.0 && on_screen.is_finite() {
        backing / on_screen
    } else {
        1.0
    }
}
