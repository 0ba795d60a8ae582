//! Region editor WASM bindings.
//!
//! `JsRegionEditor` wraps the core editor together with the host's viewport.
//! The host forwards DOM pointer and key events, keeps the viewport in sync
//! with its pan/zoom state, and calls `paint()` each frame to get a display
//! list to draw on a canvas.
//!
//! Editor events are queued while a handler runs and delivered to the
//! `on_event` callback right after it, in emission order.

use crate::types::{affine_from_canvas, cursor_css, flatten_corners, parse_key};
use quadcrop_core::{
    Bounds, DisplayList, EditorConfig, EditorEvent, PointerEvent, Propagation, RegionEditor,
    Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Interactive crop region editor for JavaScript.
#[wasm_bindgen]
pub struct JsRegionEditor {
    editor: RegionEditor,
    viewport: Viewport,
    queue: Rc<RefCell<Vec<EditorEvent>>>,
    listener: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl JsRegionEditor {
    /// Create a hidden editor over a widget of the given size.
    ///
    /// # Arguments
    /// * `width`, `height` - Widget size in CSS pixels
    /// * `config` - Optional partial config object; missing keys take defaults
    ///
    /// # Example (TypeScript)
    /// ```typescript
    /// const editor = new JsRegionEditor(canvas.width, canvas.height, { snap_step_degrees: 15 });
    /// editor.on_event((e) => { if (e.type === 'region_committed') crop(e.region.corners); });
    /// editor.show();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config: JsValue) -> Result<JsRegionEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?
        };
        let mut editor = RegionEditor::new(config).map_err(to_js)?;
        let viewport = Viewport::new(width, height).map_err(to_js)?;

        let queue = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&queue);
        editor.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Ok(Self {
            editor,
            viewport,
            queue,
            listener: None,
        })
    }

    /// Register the callback that receives every editor event as a plain object.
    pub fn on_event(&mut self, callback: js_sys::Function) {
        self.listener = Some(callback);
    }

    /// Set the pan/zoom transform, in canvas `setTransform` argument order.
    pub fn set_world_transform(
        &mut self,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    ) -> Result<(), JsValue> {
        self.viewport
            .set_world(affine_from_canvas(a, b, c, d, e, f))
            .map_err(to_js)
    }

    /// Set the fit-to-window transform, in canvas `setTransform` argument order.
    pub fn set_image_fit_transform(
        &mut self,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    ) -> Result<(), JsValue> {
        self.viewport
            .set_image_fit(affine_from_canvas(a, b, c, d, e, f))
            .map_err(to_js)
    }

    /// Set the widget rectangle that pointer presses must fall inside.
    pub fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
        self.viewport
            .set_bounds(Bounds::new(x, y, width, height))
            .map_err(to_js)
    }

    /// Returns true when the editor consumed the event.
    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        left_button: bool,
        shift: bool,
        alt: bool,
    ) -> Result<bool, JsValue> {
        let event = pointer_event(x, y, left_button, shift, alt);
        let result = self.editor.pointer_down(&event, &self.viewport);
        self.flush(result)
    }

    /// Returns true when the editor consumed the event.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        left_button: bool,
        shift: bool,
        alt: bool,
    ) -> Result<bool, JsValue> {
        let event = pointer_event(x, y, left_button, shift, alt);
        let result = self.editor.pointer_move(&event, &self.viewport);
        self.flush(result)
    }

    /// Returns true when the editor consumed the event.
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        left_button: bool,
        shift: bool,
        alt: bool,
    ) -> Result<bool, JsValue> {
        let event = pointer_event(x, y, left_button, shift, alt);
        let result = self.editor.pointer_up(&event, &self.viewport);
        self.flush(result)
    }

    /// `key` is a DOM `KeyboardEvent.key` value.
    pub fn key_down(&mut self, key: &str) -> Result<bool, JsValue> {
        let result = self.editor.key_down(parse_key(key));
        self.flush(result)
    }

    pub fn key_up(&mut self, key: &str) -> Result<bool, JsValue> {
        let result = self.editor.key_up(parse_key(key));
        self.flush(result)
    }

    pub fn show(&mut self) -> Result<(), JsValue> {
        self.editor.show();
        self.flush(Propagation::Consumed).map(|_| ())
    }

    pub fn hide(&mut self) -> Result<(), JsValue> {
        self.editor.hide();
        self.flush(Propagation::Consumed).map(|_| ())
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.editor.reset();
        self.flush(Propagation::Consumed).map(|_| ())
    }

    /// Current state name, e.g. "idle" or "rotating".
    pub fn state(&self) -> String {
        self.editor.state().name().to_string()
    }

    /// CSS cursor keyword for the current cursor.
    pub fn cursor(&self) -> String {
        cursor_css(self.editor.cursor()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.editor.is_visible()
    }

    /// Model-space corners as `[x0, y0, ..., x3, y3]`; empty before the first drag.
    pub fn corners(&self) -> Vec<f64> {
        self.editor
            .model()
            .corners()
            .map(flatten_corners)
            .unwrap_or_default()
    }

    /// Draw one frame; returns the display list as an array of draw commands.
    pub fn paint(&mut self) -> Result<JsValue, JsValue> {
        let mut list = DisplayList::new();
        self.editor.paint(&self.viewport, &mut list);
        serde_wasm_bindgen::to_value(&list.commands)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize display list: {}", e)))
    }
}

impl JsRegionEditor {
    /// Deliver queued events to the listener, then report `result`.
    fn flush(&mut self, result: Propagation) -> Result<bool, JsValue> {
        let events: Vec<EditorEvent> = self.queue.borrow_mut().drain(..).collect();
        if let Some(listener) = &self.listener {
            for event in &events {
                let value = serde_wasm_bindgen::to_value(event).map_err(to_js)?;
                listener.call1(&JsValue::NULL, &value)?;
            }
        }
        Ok(result.is_consumed())
    }
}

fn pointer_event(x: f64, y: f64, left_button: bool, shift: bool, alt: bool) -> PointerEvent {
    let mut event = PointerEvent::left(x, y);
    event.left_button = left_button;
    event.modifiers.shift = shift;
    event.modifiers.alt = alt;
    event
}


/// WASM-specific tests that require JsValue.
///
/// The constructor takes a `JsValue` config and can only run on wasm32
/// targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn editor() -> JsRegionEditor {
        let mut editor = JsRegionEditor::new(400.0, 300.0, JsValue::UNDEFINED).unwrap();
        editor.show().unwrap();
        editor
    }

    #[wasm_bindgen_test]
    fn test_draw_and_read_corners() {
        let mut editor = editor();
        assert!(editor.pointer_down(10.0, 10.0, true, false, false).unwrap());
        editor.pointer_move(110.0, 60.0, true, false, false).unwrap();
        editor.pointer_up(110.0, 60.0, true, false, false).unwrap();

        assert_eq!(editor.state(), "idle");
        assert_eq!(
            editor.corners(),
            vec![10.0, 10.0, 110.0, 10.0, 110.0, 60.0, 10.0, 60.0]
        );
    }

    #[wasm_bindgen_test]
    fn test_alt_press_is_not_consumed() {
        let mut editor = editor();
        assert!(!editor.pointer_down(10.0, 10.0, true, false, true).unwrap());
        assert_eq!(editor.state(), "empty");
        assert_eq!(editor.cursor(), "grabbing");
    }

    #[wasm_bindgen_test]
    fn test_escape_hides() {
        let mut editor = editor();
        assert!(editor.key_down("Escape").unwrap());
        assert!(!editor.visible());
        assert_eq!(editor.state(), "cancelled");
    }

    #[wasm_bindgen_test]
    fn test_rejects_singular_transform() {
        let mut editor = editor();
        assert!(editor
            .set_world_transform(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
            .is_err());
    }

    #[wasm_bindgen_test]
    fn test_rejects_invalid_config() {
        let config = serde_wasm_bindgen::to_value(&invalid_config()).unwrap();
        assert!(JsRegionEditor::new(100.0, 100.0, config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_paint_returns_commands() {
        let mut editor = editor();
        let commands = editor.paint().unwrap();
        assert!(js_sys::Array::is_array(&commands));
    }

    fn invalid_config() -> EditorConfig {
        EditorConfig {
            handle_size: -1.0,
            ..EditorConfig::default()
        }
    }
}
