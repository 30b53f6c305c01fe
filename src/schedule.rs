//! Frame coalescing for pointer-driven repaints.
//!
//! Pointer moves can arrive far faster than the display refreshes. Only the
//! first request in a frame interval asks the host for a frame-aligned
//! callback; later requests ride along on the one already pending. When the
//! callback fires it paints whatever the store holds at that moment.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

/// Pending-render flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that a repaint is wanted.
    ///
    /// Returns `true` when the caller must schedule a frame callback, `false`
    /// when one is already pending.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending frame. Returns `false` if nothing was pending, in
    /// which case the callback should not paint.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Forget any pending frame, e.g. after an immediate repaint made it moot
    /// or on teardown.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
