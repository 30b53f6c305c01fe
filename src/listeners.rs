//! Scoped DOM subscriptions.
//!
//! Each guard owns its closure and deregisters it when dropped, so holding a
//! guard is the same as being subscribed. Teardown is just dropping guards.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, ResizeObserver, Window};

use crate::error::EngineError;

/// One `addEventListener` registration.
pub struct EventListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListenerGuard {
    /// Register `handler` for `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the DOM rejects the registration.
    pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, EngineError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {e:?}", self.event);
        }
    }
}

/// A `ResizeObserver` watching one element. Disconnects on drop.
pub struct ResizeObserverGuard {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl ResizeObserverGuard {
    /// Observe `element`, calling `handler` whenever its box changes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ResizeObserver` is unavailable.
    pub fn observe<F>(element: &web_sys::Element, handler: F) -> Result<Self, EngineError>
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::<dyn FnMut()>::new(handler);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(element);
        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for ResizeObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Window-wide subscriptions held only while a drag is in progress.
pub struct DragListeners {
    _move: EventListenerGuard,
    _up: EventListenerGuard,
    _cancel: EventListenerGuard,
    _blur: EventListenerGuard,
}

impl DragListeners {
    /// Subscribe the four drag handlers on `window`. If any registration
    /// fails, the ones already made are dropped again.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the DOM rejects a registration.
    pub fn attach<M, U, C>(window: &Window, on_move: M, on_up: U, on_cancel: C) -> Result<Self, EngineError>
    where
        M: FnMut(Event) + 'static,
        U: FnMut(Event) + 'static,
        C: FnMut(Event) + Clone + 'static,
    {
        let target: &EventTarget = window.as_ref();
        Ok(Self {
            _move: EventListenerGuard::listen(target, "pointermove", on_move)?,
            _up: EventListenerGuard::listen(target, "pointerup", on_up)?,
            _cancel: EventListenerGuard::listen(target, "pointercancel", on_cancel.clone())?,
            _blur: EventListenerGuard::listen(target, "blur", on_cancel)?,
        })
    }
}
