//! Retained-mode 2D shape canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. The caller
//! pushes a [`doc::Document`] (shapes plus a grid directive); the engine draws
//! it on a `<canvas>`, lets the user drag rectangles and circles around, and
//! hands the final shape list back once per completed drag. Everything except
//! [`host`], [`listeners`] and [`bindings`] is plain Rust and tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the [`engine::Action`]s it emits |
//! | [`doc`] | Shape, patch, grid and document types |
//! | [`geometry`] | Points and the viewport-to-canvas transform |
//! | [`hit`] | Topmost-first hit-testing |
//! | [`store`] | Working copy of the shape list |
//! | [`drag`] | Drag gesture state machine |
//! | [`schedule`] | Frame coalescing |
//! | [`surface`] | Backing-buffer sizing for the device pixel ratio |
//! | [`sync`] | Identity tracking for caller-supplied shape lists |
//! | [`render`] | Painter over a [`render::DrawContext`] |
//! | [`host`] | Browser [`host::Engine`] wired to DOM events |
//! | [`listeners`] | Scoped DOM subscriptions |
//! | [`bindings`] | `#[wasm_bindgen]` API |
//! | [`error`] | [`error::EngineError`] |
//! | [`consts`] | Defaults (grid, colors, cursors) |

pub mod bindings;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod host;
pub mod listeners;
pub mod render;
pub mod schedule;
pub mod store;
pub mod surface;
pub mod sync;
