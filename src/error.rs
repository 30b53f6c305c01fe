//! Errors raised while mounting the engine or crossing the JS boundary.
//!
//! Everything past setup is infallible from the caller's point of view: a
//! missing shape id is a no-op and a failed paint is logged.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No global `window` (running outside a browser main thread).
    #[error("no window available")]
    MissingWindow,
    /// The canvas refused to hand out a 2D context.
    #[error("canvas 2d context unavailable")]
    ContextUnavailable,
    /// A DOM call threw.
    #[error("dom call failed: {0}")]
    Js(String),
    /// The document or shape list did not round-trip through JSON.
    #[error("invalid document: {0}")]
    Document(#[from] serde_json::Error),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
