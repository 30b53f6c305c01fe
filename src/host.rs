//! Browser host: binds an [`EngineCore`] to a real `<canvas>`.
//!
//! The host owns the DOM side of the component. It turns DOM events into
//! core inputs and carries out the [`Action`]s the core returns. All shared
//! state lives behind one `Rc`; every DOM closure holds only a `Weak` to it,
//! so dropping the [`Engine`] frees everything.
//!
//! Actions are always dispatched after the core borrow is released. The
//! commit callback may therefore call back into [`Engine::set_document`]
//! (or tear the engine down) without tripping the `RefCell`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, PointerEvent, Window};

use crate::consts::{CANVAS_LAYOUT_STYLE, CURSOR_IDLE};
use crate::doc::{Document, ShapeList};
use crate::engine::{Action, EngineCore};
use crate::error::EngineError;
use crate::geometry::{ClientRect, PixelSize, Point, to_canvas_space};
use crate::listeners::{DragListeners, EventListenerGuard, ResizeObserverGuard};
use crate::surface::SurfaceMetrics;

type ShapesCallback = Box<dyn Fn(ShapeList)>;

/// A mounted canvas engine. Dropping it is the same as calling
/// [`Engine::destroy`].
pub struct Engine {
    shared: Rc<Shared>,
}

struct Shared {
    core: RefCell<EngineCore>,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    on_shapes_change: ShapesCallback,
    destroyed: Cell<bool>,
    pointer_down: RefCell<Option<EventListenerGuard>>,
    resize: RefCell<Option<ResizeObserverGuard>>,
    drag: RefCell<Option<DragListeners>>,
    frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    frame_id: Cell<Option<i32>>,
}

impl Engine {
    /// Attach to `canvas`: grab the 2D context, subscribe to presses and
    /// resizes, size the buffer and paint once.
    ///
    /// `on_shapes_change` receives the final shape list once per completed
    /// drag.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no window, the canvas has no 2D context, or
    /// a DOM subscription fails.
    pub fn mount<F>(canvas: HtmlCanvasElement, on_shapes_change: F) -> Result<Self, EngineError>
    where
        F: Fn(ShapeList) + 'static,
    {
        let window = web_sys::window().ok_or(EngineError::MissingWindow)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;

        let shared = Rc::new(Shared {
            core: RefCell::new(EngineCore::new()),
            window,
            canvas,
            ctx,
            on_shapes_change: Box::new(on_shapes_change),
            destroyed: Cell::new(false),
            pointer_down: RefCell::new(None),
            resize: RefCell::new(None),
            drag: RefCell::new(None),
            frame: RefCell::new(None),
            frame_id: Cell::new(None),
        });
        for &(property, value) in CANVAS_LAYOUT_STYLE {
            shared.set_style(property, value);
        }
        shared.set_cursor(CURSOR_IDLE);

        let weak = Rc::downgrade(&shared);
        let down = EventListenerGuard::listen(shared.canvas.as_ref(), "pointerdown", move |event| {
            if let Some(shared) = weak.upgrade() {
                Shared::pointer_down(&shared, &event);
            }
        })?;
        *shared.pointer_down.borrow_mut() = Some(down);

        let weak = Rc::downgrade(&shared);
        let resize = ResizeObserverGuard::observe(shared.canvas.as_ref(), move || {
            if let Some(shared) = weak.upgrade() {
                Shared::measure(&shared);
            }
        })?;
        *shared.resize.borrow_mut() = Some(resize);

        Shared::measure(&shared);
        log::debug!("canvas engine mounted");
        Ok(Self { shared })
    }

    /// Push a new document. A shape list with a new identity discards any
    /// local edits; the same list again keeps them.
    pub fn set_document(&self, doc: &Document) {
        if self.shared.destroyed.get() {
            return;
        }
        let actions = self.shared.core.borrow_mut().set_document(doc);
        Shared::dispatch(&self.shared, actions);
    }

    /// Release every subscription and cancel the pending frame. An open drag
    /// is dropped without committing. Safe to call more than once.
    pub fn destroy(&self) {
        self.shared.destroy();
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.shared.destroyed.get()
    }

    /// The working shape list, including uncommitted drag edits.
    #[must_use]
    pub fn shapes(&self) -> ShapeList {
        Rc::clone(self.shared.core.borrow().shapes())
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.shared.core.borrow().is_dragging()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shared.destroy();
    }
}

impl Shared {
    // --- DOM inputs ---

    fn measure(shared: &Rc<Self>) {
        if shared.destroyed.get() {
            return;
        }
        let rect = shared.canvas.get_bounding_client_rect();
        let dpr = shared.window.device_pixel_ratio();
        let actions = shared.core.borrow_mut().on_resize(rect.width(), rect.height(), dpr);
        Self::dispatch(shared, actions);
    }

    fn pointer_down(shared: &Rc<Self>, event: &Event) {
        if shared.destroyed.get() {
            return;
        }
        let Some(pt) = shared.canvas_point(event) else {
            return;
        };
        let actions = match event.dyn_ref::<PointerEvent>() {
            Some(pointer) => shared.core.borrow_mut().on_pointer_down_from(pointer.pointer_id(), pt),
            None => shared.core.borrow_mut().on_pointer_down(pt),
        };
        if !actions.is_empty() {
            event.prevent_default();
        }
        Self::dispatch(shared, actions);
    }

    fn pointer_move(shared: &Rc<Self>, event: &Event) {
        if shared.destroyed.get() || !shared.is_captured(event) {
            return;
        }
        let Some(pt) = shared.canvas_point(event) else {
            return;
        };
        let actions = shared.core.borrow_mut().on_pointer_move(pt);
        Self::dispatch(shared, actions);
    }

    fn pointer_up(shared: &Rc<Self>, event: &Event) {
        if shared.destroyed.get() || !shared.is_captured(event) {
            return;
        }
        let actions = shared.core.borrow_mut().on_pointer_up();
        Self::dispatch(shared, actions);
    }

    fn pointer_cancel(shared: &Rc<Self>) {
        if shared.destroyed.get() {
            return;
        }
        let actions = shared.core.borrow_mut().on_pointer_cancel();
        Self::dispatch(shared, actions);
    }

    /// Events from other pointers (a second finger) are ignored during a
    /// drag. Non-pointer events such as `blur` always pass.
    fn is_captured(&self, event: &Event) -> bool {
        event
            .dyn_ref::<PointerEvent>()
            .is_none_or(|pointer| self.core.borrow().is_captured_pointer(pointer.pointer_id()))
    }

    /// Client coordinates of a pointer event mapped into canvas space.
    fn canvas_point(&self, event: &Event) -> Option<Point> {
        let mouse = event.dyn_ref::<MouseEvent>()?;
        let rect = self.canvas.get_bounding_client_rect();
        let client = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        let bounds = ClientRect::new(rect.left(), rect.top(), rect.width(), rect.height());
        let buffer = PixelSize::new(self.canvas.width(), self.canvas.height());
        Some(to_canvas_space(client, bounds, buffer))
    }

    // --- Actions ---

    fn dispatch(shared: &Rc<Self>, actions: Vec<Action>) {
        let mut capture_failed = false;
        for action in actions {
            if shared.destroyed.get() {
                return;
            }
            match action {
                Action::RenderNow => shared.paint(),
                Action::ScheduleFrame => Self::schedule_frame(shared),
                Action::ResizeSurface(metrics) => shared.resize_surface(metrics),
                Action::BeginCapture => capture_failed = !Self::begin_capture(shared),
                Action::EndCapture => shared.end_capture(),
                Action::SetCursor(cursor) => shared.set_cursor(cursor),
                Action::Commit(shapes) => (shared.on_shapes_change)(shapes),
            }
        }
        // Without window listeners the drag could never end; close it now.
        if capture_failed {
            Self::pointer_cancel(shared);
        }
    }

    fn paint(&self) {
        if let Err(e) = self.core.borrow().render(&self.ctx) {
            log::warn!("canvas paint failed: {e:?}");
        }
    }

    fn resize_surface(&self, metrics: SurfaceMetrics) {
        let size = metrics.backing_size();
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        // Resizing the buffer resets the context, so the scale goes on fresh.
        if let Err(e) = self.ctx.set_transform(metrics.dpr, 0.0, 0.0, metrics.dpr, 0.0, 0.0) {
            log::warn!("failed to scale canvas context: {e:?}");
        }
    }

    fn schedule_frame(shared: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(shared);
        let callback = Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
            if let Some(shared) = weak.upgrade() {
                shared.run_frame();
            }
        });

        match shared.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => {
                shared.frame_id.set(Some(id));
                *shared.frame.borrow_mut() = Some(callback);
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed, painting now: {e:?}");
                shared.run_frame();
            }
        }
    }

    fn run_frame(&self) {
        self.frame_id.set(None);
        if self.destroyed.get() {
            return;
        }
        let due = self.core.borrow_mut().take_frame();
        if due {
            self.paint();
        }
        self.frame.borrow_mut().take();
    }

    /// Subscribe the window-wide drag listeners. Returns `false` if the
    /// subscription failed.
    fn begin_capture(shared: &Rc<Self>) -> bool {
        if shared.drag.borrow().is_some() {
            return true;
        }
        let on_move = {
            let weak = Rc::downgrade(shared);
            move |event: Event| {
                if let Some(shared) = weak.upgrade() {
                    Self::pointer_move(&shared, &event);
                }
            }
        };
        let on_up = {
            let weak = Rc::downgrade(shared);
            move |event: Event| {
                if let Some(shared) = weak.upgrade() {
                    Self::pointer_up(&shared, &event);
                }
            }
        };
        let on_cancel = {
            let weak = Rc::downgrade(shared);
            move |event: Event| {
                if let Some(shared) = weak.upgrade() {
                    if shared.is_captured(&event) {
                        Self::pointer_cancel(&shared);
                    }
                }
            }
        };

        match DragListeners::attach(&shared.window, on_move, on_up, on_cancel) {
            Ok(listeners) => {
                *shared.drag.borrow_mut() = Some(listeners);
                true
            }
            Err(e) => {
                log::warn!("failed to capture drag: {e}");
                false
            }
        }
    }

    fn end_capture(&self) {
        self.drag.borrow_mut().take();
    }

    fn set_cursor(&self, cursor: &str) {
        self.set_style("cursor", cursor);
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.canvas.style().set_property(property, value) {
            log::warn!("failed to set canvas {property}: {e:?}");
        }
    }

    // --- Teardown ---

    fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.core.borrow_mut().shutdown();
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel frame: {e:?}");
            }
        }
        self.drag.borrow_mut().take();
        self.pointer_down.borrow_mut().take();
        self.resize.borrow_mut().take();
        self.frame.borrow_mut().take();
        log::debug!("canvas engine destroyed");
    }
}
