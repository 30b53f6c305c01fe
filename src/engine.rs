//! Engine core: every piece of canvas behavior that does not need a browser.
//!
//! [`EngineCore`] owns the Shape Store, grid settings, Drag Controller, frame
//! scheduler and surface metrics. Each input method returns the [`Action`]s
//! the host must carry out (paint, schedule a frame, resize the buffer,
//! acquire or release drag listeners, commit). Nothing here touches the DOM,
//! so the whole gesture flow runs in native tests.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::rc::Rc;

use crate::consts::{CURSOR_DRAGGING, CURSOR_IDLE};
use crate::doc::{Document, GridConfig, Shape, ShapeId, ShapeList};
use crate::drag::{DragController, DragSession};
use crate::geometry::Point;
use crate::render::{self, DrawContext};
use crate::schedule::FrameScheduler;
use crate::store::ShapeStore;
use crate::surface::SurfaceMetrics;

/// Work the host must perform after an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Paint now, outside the frame loop.
    RenderNow,
    /// Request one frame-aligned callback that calls [`EngineCore::take_frame`].
    ScheduleFrame,
    /// Resize the backing buffer and reset the context scale.
    ResizeSurface(SurfaceMetrics),
    /// A drag started: subscribe to pointer move/up on the whole input surface.
    BeginCapture,
    /// The drag ended: drop those subscriptions.
    EndCapture,
    /// Change the canvas cursor.
    SetCursor(&'static str),
    /// Hand the final shape list to the caller's change callback.
    Commit(ShapeList),
}

/// Core engine state.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub store: ShapeStore,
    pub grid: GridConfig,
    pub drag: DragController,
    pub frames: FrameScheduler,
    pub surface: Option<SurfaceMetrics>,
    /// The caller's list the store was last synchronized from.
    source: Option<ShapeList>,
    /// Pointer that started the open drag, when the host reports one.
    pointer: Option<i32>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Take in the caller's document.
    ///
    /// A shape list with a new identity replaces the working copy wholesale,
    /// discarding local edits. The same list pushed again leaves the working
    /// copy alone.
    pub fn set_document(&mut self, doc: &Document) -> Vec<Action> {
        let mut changed = false;

        let is_new_list = self.source.as_ref().map_or(true, |prev| !Rc::ptr_eq(prev, &doc.shapes));
        if is_new_list {
            log::debug!("document sync: {} shapes", doc.shapes.len());
            self.store.replace_all(Rc::clone(&doc.shapes));
            self.source = Some(Rc::clone(&doc.shapes));
            changed = true;
        }

        if self.grid != doc.grid {
            self.grid = doc.grid.clone();
            changed = true;
        }

        if changed { vec![Action::RenderNow] } else { Vec::new() }
    }

    /// The canvas box was measured (on mount or after a resize).
    ///
    /// An unusable measurement is skipped: the previous buffer stays and
    /// nothing is painted.
    pub fn on_resize(&mut self, css_width: f64, css_height: f64, dpr: f64) -> Vec<Action> {
        let Some(metrics) = SurfaceMetrics::measure(css_width, css_height, dpr) else {
            log::debug!("surface resize skipped: {css_width}x{css_height} @ {dpr}");
            return Vec::new();
        };
        log::debug!("surface resized: {css_width}x{css_height} @ {}", metrics.dpr);
        self.surface = Some(metrics);
        vec![Action::ResizeSurface(metrics), Action::RenderNow]
    }

    // --- Pointer inputs (canvas-space coordinates) ---

    /// Pointer pressed on the canvas. Starts a drag if it lands on a shape.
    pub fn on_pointer_down(&mut self, canvas_pt: Point) -> Vec<Action> {
        let pt = self.to_drawing(canvas_pt);
        let Some(session) = self.drag.pointer_down(self.store.shapes(), pt) else {
            return Vec::new();
        };
        log::debug!("drag start: shape {}", session.target);
        vec![Action::BeginCapture, Action::SetCursor(CURSOR_DRAGGING)]
    }

    /// Pointer-down from an identified pointer. A drag it starts follows
    /// only that pointer (see [`EngineCore::is_captured_pointer`]).
    pub fn on_pointer_down_from(&mut self, pointer_id: i32, canvas_pt: Point) -> Vec<Action> {
        let actions = self.on_pointer_down(canvas_pt);
        if !actions.is_empty() {
            self.pointer = Some(pointer_id);
        }
        actions
    }

    /// Whether an event from `pointer_id` belongs to the open drag. Always
    /// `true` when no pointer was recorded.
    #[must_use]
    pub fn is_captured_pointer(&self, pointer_id: i32) -> bool {
        self.pointer.is_none_or(|p| p == pointer_id)
    }

    /// Pointer moved while captured. Moves the dragged shape and asks for a
    /// frame unless one is already pending.
    pub fn on_pointer_move(&mut self, canvas_pt: Point) -> Vec<Action> {
        let pt = self.to_drawing(canvas_pt);
        let Some((id, patch)) = self.drag.pointer_move(pt) else {
            return Vec::new();
        };
        // The target may be gone after a newer document; keep the session and
        // wait for pointer-up.
        if !self.store.update_one(id, &patch) {
            return Vec::new();
        }
        if self.frames.request() { vec![Action::ScheduleFrame] } else { Vec::new() }
    }

    /// Pointer released. Ends the drag and commits once; a no-op when idle.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let Some(session) = self.drag.pointer_up() else {
            return Vec::new();
        };
        log::debug!("drag end: shape {}", session.target);
        self.finish_drag()
    }

    /// The gesture was interrupted (pointer cancelled, window lost focus).
    /// Ends an open drag the same way a pointer-up does, keeping the shape
    /// where the user left it.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let Some(session) = self.drag.pointer_up() else {
            return Vec::new();
        };
        log::debug!("drag interrupted: shape {}", session.target);
        self.finish_drag()
    }

    fn finish_drag(&mut self) -> Vec<Action> {
        self.pointer = None;
        vec![
            Action::EndCapture,
            Action::SetCursor(CURSOR_IDLE),
            Action::Commit(Rc::clone(self.store.shapes())),
        ]
    }

    // --- Frames ---

    /// Called from the frame callback. Returns `true` if a paint is due.
    pub fn take_frame(&mut self) -> bool {
        self.frames.take_frame()
    }

    /// Draw the current store contents. Does nothing until the surface has
    /// been measured.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a drawing call fails.
    pub fn render<C: DrawContext>(&self, ctx: &C) -> Result<(), C::Error> {
        let Some(metrics) = self.surface else {
            return Ok(());
        };
        render::draw(ctx, self.store.shapes(), &self.grid, metrics.extent())
    }

    /// Drop any open session and pending frame without committing.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.drag.pointer_up() {
            log::debug!("drag abandoned on teardown: shape {}", session.target);
        }
        self.pointer = None;
        self.frames.cancel();
    }

    // --- Queries ---

    /// The working shape list.
    #[must_use]
    pub fn shapes(&self) -> &ShapeList {
        self.store.shapes()
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.store.get(id)
    }

    #[must_use]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// CSS cursor matching the current gesture.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        if self.is_dragging() { CURSOR_DRAGGING } else { CURSOR_IDLE }
    }

    fn to_drawing(&self, canvas_pt: Point) -> Point {
        self.surface.map_or(canvas_pt, |m| m.canvas_to_drawing(canvas_pt))
    }
}
