//! Quadcrop WASM - WebAssembly bindings for Quadcrop
//!
//! This crate exposes the quadcrop-core region editor to JavaScript/TypeScript
//! applications drawing on an HTML canvas.
//!
//! # Module Structure
//!
//! - `editor` - `JsRegionEditor`, the interactive crop region editor
//! - `logging` - Console logger for core log records
//! - `types` - Conversions between DOM values and core types
//!
//! # Usage
//!
//! ```typescript
//! import init, { init_logging, JsRegionEditor } from '@quadcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! init_logging('warn');
//!
//! const editor = new JsRegionEditor(canvas.width, canvas.height);
//! editor.set_world_transform(zoom, 0, 0, zoom, panX, panY);
//! canvas.onpointerdown = (e) =>
//!   editor.pointer_down(e.offsetX, e.offsetY, e.buttons === 1, e.shiftKey, e.altKey);
//! editor.show();
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod logging;
mod types;

// Re-export public types
pub use editor::JsRegionEditor;
pub use logging::init_logging;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Logging stays off until the host calls `init_logging`
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
