//! JavaScript surface.
//!
//! ```js
//! initLogging("debug");
//! const canvas = new BlueprintCanvas(el, (shapes) => save(shapes));
//! canvas.setDocument({ shapes, grid: { show: true, size: 50 } });
//! canvas.destroy();
//! ```
//!
//! Documents cross the boundary as JSON. The `shapes` array is tracked by JS
//! identity: passing the last pushed or last committed array object keeps
//! local state, any other array replaces it.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, JSON, Object, Reflect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::doc::{Document, GridConfig, Shape, ShapeList};
use crate::error::EngineError;
use crate::host::Engine;
use crate::sync::ListSync;

/// Last pushed and last committed JS shapes arrays, with their lists.
type Synced = Rc<RefCell<ListSync<JsValue>>>;

/// Install the console logger and panic hook. `level` is a `log` level name
/// (`"error"` .. `"trace"`); defaults to `info`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let parsed = level.as_deref().map(str::parse::<log::Level>);
    let level = match parsed {
        Some(Ok(level)) => level,
        Some(Err(_)) | None => log::Level::Info,
    };
    if let Err(e) = console_log::init_with_level(level) {
        log::debug!("logger already installed: {e}");
    }
}

/// A shape canvas mounted on one `<canvas>` element.
#[wasm_bindgen]
pub struct BlueprintCanvas {
    engine: Engine,
    synced: Synced,
}

#[wasm_bindgen]
impl BlueprintCanvas {
    /// Mount on `canvas`. `on_shapes_change` is called with the final shapes
    /// array after each drag.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, on_shapes_change: Function) -> Result<BlueprintCanvas, JsValue> {
        let synced: Synced = Rc::new(RefCell::new(ListSync::new()));
        let synced_for_commit = Rc::clone(&synced);
        let engine = Engine::mount(canvas, move |shapes: ShapeList| {
            let value = match to_js(&*shapes) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("failed to encode committed shapes: {e}");
                    return;
                }
            };
            synced_for_commit.borrow_mut().committed(value.clone(), shapes);
            if let Err(e) = on_shapes_change.call1(&JsValue::NULL, &value) {
                log::warn!("onShapesChange threw: {e:?}");
            }
        })?;
        Ok(Self { engine, synced })
    }

    /// Push `{ shapes, grid }`. Missing `shapes` means no shapes; missing
    /// `grid` means the default (hidden) grid.
    #[wasm_bindgen(js_name = setDocument)]
    pub fn set_document(&self, doc: &JsValue) -> Result<(), JsValue> {
        let shapes_js = Reflect::get(doc, &JsValue::from_str("shapes"))?;
        let grid_js = Reflect::get(doc, &JsValue::from_str("grid"))?;

        let shapes = self.resolve_shapes(shapes_js)?;
        let grid: GridConfig = if grid_js.is_undefined() || grid_js.is_null() {
            GridConfig::default()
        } else {
            from_js(&grid_js)?
        };
        self.engine.set_document(&Document { shapes, grid });
        Ok(())
    }

    /// Release all subscriptions. Further calls are no-ops.
    pub fn destroy(&self) {
        self.engine.destroy();
        self.synced.borrow_mut().clear();
    }

    /// Whether a drag is in progress.
    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    /// Current working shapes, including an uncommitted drag.
    pub fn shapes(&self) -> Result<JsValue, JsValue> {
        to_js(&*self.engine.shapes()).map_err(JsValue::from)
    }
}

impl BlueprintCanvas {
    /// Reuse the decoded list when `shapes_js` is the array last pushed or
    /// last committed; decode it otherwise.
    fn resolve_shapes(&self, shapes_js: JsValue) -> Result<ShapeList, EngineError> {
        let known = self.synced.borrow_mut().resolve(&shapes_js, |a, b| Object::is(a, b));
        if let Some(list) = known {
            return Ok(list);
        }
        let shapes: Vec<Shape> = if shapes_js.is_undefined() || shapes_js.is_null() {
            Vec::new()
        } else {
            from_js(&shapes_js)?
        };
        let shapes = Rc::new(shapes);
        self.synced.borrow_mut().pushed(shapes_js, Rc::clone(&shapes));
        Ok(shapes)
    }
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, EngineError> {
    let text: String = JSON::stringify(value)?.into();
    Ok(serde_json::from_str(&text)?)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, EngineError> {
    let text = serde_json::to_string(value)?;
    Ok(JSON::parse(&text)?)
}
