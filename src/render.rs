//! Render Pipeline: clears the surface, draws the grid, then every shape in
//! list order.
//!
//! The pipeline only reads shapes and grid settings; it never mutates engine
//! state. Drawing goes through [`DrawContext`] so the same code paints into a
//! browser [`CanvasRenderingContext2d`] and into test recorders.
//!
//! Coordinates are drawing units (CSS pixels). The Surface Adapter installs
//! the device-pixel-ratio transform before any of this runs.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::GRID_LINE_WIDTH;
use crate::doc::{CircleShape, GridConfig, RectShape, Shape, Style};

/// Size of the area to paint, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// The subset of the Canvas 2D API the pipeline needs.
pub trait DrawContext {
    /// Error produced by fallible drawing calls.
    type Error;

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_style(&self, color: &str);
    fn set_stroke_style(&self, color: &str);
    fn set_line_width(&self, width: f64);
    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn stroke(&self);
    fn fill(&self);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64);

    /// Add a full or partial circle to the current path.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the backend rejects the arc (e.g. a negative radius).
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
}

impl DrawContext for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, w, h);
    }

    fn set_fill_style(&self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_stroke_style(&self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn stroke(&self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }
}

/// Draw the full scene: clear, grid, shapes.
///
/// # Errors
///
/// Returns `Err` if any fallible drawing call fails.
pub fn draw<C: DrawContext>(ctx: &C, shapes: &[Shape], grid: &GridConfig, extent: Extent) -> Result<(), C::Error> {
    // Layer 1: clear.
    ctx.clear_rect(0.0, 0.0, extent.width, extent.height);

    // Layer 2: grid.
    if grid.show {
        draw_grid(ctx, grid, extent);
    }

    // Layer 3: shapes, painter's algorithm.
    for shape in shapes {
        draw_shape(ctx, shape)?;
    }
    Ok(())
}

fn draw_grid<C: DrawContext>(ctx: &C, grid: &GridConfig, extent: Extent) {
    let gap = grid.spacing();
    ctx.set_stroke_style(grid.line_color());
    ctx.set_line_width(GRID_LINE_WIDTH);

    let mut x = 0.0;
    while x < extent.width {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, extent.height);
        ctx.stroke();
        x += gap;
    }

    let mut y = 0.0;
    while y < extent.height {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(extent.width, y);
        ctx.stroke();
        y += gap;
    }
}

fn draw_shape<C: DrawContext>(ctx: &C, shape: &Shape) -> Result<(), C::Error> {
    let Some(style) = shape.style() else {
        return Ok(());
    };
    match shape {
        Shape::Rect(rect) => {
            draw_rect(ctx, rect, &style);
            Ok(())
        }
        Shape::Circle(circle) => draw_circle(ctx, circle, &style),
        Shape::Unsupported(_) => Ok(()),
    }
}

fn draw_rect<C: DrawContext>(ctx: &C, rect: &RectShape, style: &Style<'_>) {
    if !is_positive(rect.width) || !is_positive(rect.height) {
        return;
    }
    apply_style(ctx, style);
    ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    if style.stroked {
        ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }
}

fn draw_circle<C: DrawContext>(ctx: &C, circle: &CircleShape, style: &Style<'_>) -> Result<(), C::Error> {
    if !is_positive(circle.radius) {
        return Ok(());
    }
    apply_style(ctx, style);
    ctx.begin_path();
    ctx.arc(circle.x, circle.y, circle.radius, 0.0, 2.0 * PI)?;
    ctx.fill();
    if style.stroked {
        ctx.stroke();
    }
    Ok(())
}

fn apply_style<C: DrawContext>(ctx: &C, style: &Style<'_>) {
    ctx.set_fill_style(style.fill);
    ctx.set_stroke_style(style.stroke);
    ctx.set_line_width(style.line_width);
}

fn is_positive(v: f64) -> bool {
    v > 0.0 && v.is_finite()
}
