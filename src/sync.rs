//! Identity tracking for shape lists that arrive from outside the engine.
//!
//! A caller hands over its shape list as some foreign handle `K` (a JS array
//! at the binding layer). Two handles are remembered: the one the caller last
//! pushed and the one last handed back on commit. A push of either is the
//! same version and maps to the list it already decoded to, so a caller that
//! has not yet adopted the committed list does not reset a finished drag.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::rc::Rc;

use crate::doc::ShapeList;

#[derive(Debug, Clone)]
pub struct ListSync<K> {
    pushed: Option<(K, ShapeList)>,
    committed: Option<(K, ShapeList)>,
}

impl<K> Default for ListSync<K> {
    fn default() -> Self {
        Self { pushed: None, committed: None }
    }
}

impl<K: Clone> ListSync<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The list `key` already stands for, if it is the last pushed or last
    /// committed handle. A match on the committed handle makes it the pushed
    /// one.
    pub fn resolve(&mut self, key: &K, same: impl Fn(&K, &K) -> bool) -> Option<ShapeList> {
        if let Some((pushed, list)) = &self.pushed {
            if same(pushed, key) {
                return Some(Rc::clone(list));
            }
        }
        let (committed, list) = self.committed.as_ref()?;
        if !same(committed, key) {
            return None;
        }
        let list = Rc::clone(list);
        self.pushed = Some((committed.clone(), Rc::clone(&list)));
        Some(list)
    }

    /// Record a freshly decoded push.
    pub fn pushed(&mut self, key: K, list: ShapeList) {
        self.pushed = Some((key, list));
    }

    /// Record the handle given to the caller for a commit.
    pub fn committed(&mut self, key: K, list: ShapeList) {
        self.committed = Some((key, list));
    }

    /// Forget both handles.
    pub fn clear(&mut self) {
        self.pushed = None;
        self.committed = None;
    }
}
