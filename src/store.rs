//! Shape Store: the engine's working copy of the caller's shape list.
//!
//! The list is shared with the caller through [`ShapeList`] and copied on the
//! first write, so the caller's own document is never modified and a changed
//! list always has a new identity.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::rc::Rc;

use crate::doc::{Shape, ShapeId, ShapeList, ShapePatch};

/// In-memory list of shapes for the current document.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: ShapeList,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new list wholesale. Any local edits are discarded.
    pub fn replace_all(&mut self, shapes: ShapeList) {
        self.shapes = shapes;
    }

    /// Shallow-merge `patch` into the shape with `id`.
    ///
    /// Returns `false` and leaves the list untouched (same identity, same
    /// contents) when no shape has that id; the shape may have been removed by
    /// a newer document.
    pub fn update_one(&mut self, id: &ShapeId, patch: &ShapePatch) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let shapes = Rc::make_mut(&mut self.shapes);
        shapes[index].apply(patch);
        true
    }

    /// The current list, cheaply cloneable.
    #[must_use]
    pub fn shapes(&self) -> &ShapeList {
        &self.shapes
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == Some(id))
    }

    /// Number of shapes, supported or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == Some(id))
    }
}
