//! Drag Controller: the pointer gesture state machine.
//!
//! `Idle` becomes `Dragging` on a pointer-down that lands on a shape. The
//! session remembers which shape was grabbed and where inside it, so moves
//! translate the shape without snapping its anchor to the pointer. A
//! pointer-up (or an interruption the host treats as one) ends the session.
//!
//! The controller never touches the shape list itself; it hands back the
//! patch to apply and the owning engine routes it to the store.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::doc::{Shape, ShapeId, ShapePatch};
use crate::geometry::Point;
use crate::hit::hit_test;

/// Pointer position relative to the grabbed shape's anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// The transient state of one drag, from pointer-down to pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Id of the shape being dragged.
    pub target: ShapeId,
    /// Pointer position minus shape anchor at pointer-down.
    pub offset: Offset,
}

impl DragSession {
    /// The anchor that keeps the grabbed point under `pointer`.
    #[must_use]
    pub fn anchor_for(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.offset.dx, pointer.y - self.offset.dy)
    }
}

/// Gesture state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A shape is following the pointer.
    Dragging(DragSession),
}

/// Owns the drag state for one canvas.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session if `pointer` is over a shape.
    ///
    /// Returns the new session, or `None` when nothing was hit or a session is
    /// already open.
    pub fn pointer_down(&mut self, shapes: &[Shape], pointer: Point) -> Option<&DragSession> {
        if self.is_dragging() {
            return None;
        }
        let shape = hit_test(shapes, pointer)?;
        let (Some(id), Some(anchor)) = (shape.id(), shape.anchor()) else {
            return None;
        };
        self.state = DragState::Dragging(DragSession {
            target: id.clone(),
            offset: Offset { dx: pointer.x - anchor.x, dy: pointer.y - anchor.y },
        });
        self.session()
    }

    /// The update a pointer move implies, if a session is open.
    #[must_use]
    pub fn pointer_move(&self, pointer: Point) -> Option<(&ShapeId, ShapePatch)> {
        let session = self.session()?;
        Some((&session.target, ShapePatch::anchor(session.anchor_for(pointer))))
    }

    /// End the session. Returns the finished session, or `None` if there was
    /// nothing to end.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }
}
