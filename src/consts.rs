//! Shared defaults for the canvas crate.

#[cfg(test)]
#[path = "consts_test.rs"]
mod consts_test;

// ── Grid ────────────────────────────────────────────────────────

/// Grid spacing in CSS pixels when the document does not specify one.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Grid line color when the document does not specify one.
pub const DEFAULT_GRID_COLOR: &str = "#eee";

/// Grid lines are always one pixel wide.
pub const GRID_LINE_WIDTH: f64 = 1.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Fill color for shapes without `fillColor`.
pub const DEFAULT_FILL: &str = "#000";

/// Stroke color for shapes without `strokeColor`.
pub const DEFAULT_STROKE: &str = "#000";

/// Line width used when a shape has no `strokeWidth`.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

// ── Layout ──────────────────────────────────────────────────────

/// Inline style set on the canvas at mount. The element fills its container
/// so its on-screen size never follows the backing buffer size.
pub const CANVAS_LAYOUT_STYLE: &[(&str, &str)] = &[("display", "block"), ("width", "100%"), ("height", "100%")];

// ── Cursors ─────────────────────────────────────────────────────

/// CSS cursor while no drag is in progress.
pub const CURSOR_IDLE: &str = "crosshair";

/// CSS cursor while a shape is being dragged.
pub const CURSOR_DRAGGING: &str = "grabbing";
