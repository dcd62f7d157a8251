//! Browser bindings.
//!
//! A thin adapter from DOM event fields to typed editor events. Results and
//! state cross the boundary as JSON strings so the host can render sections,
//! handles, and the drop ghost however it likes.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::camera::Point;
use crate::engine::{Action, Editor, Event};
use crate::geometry;
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::storage::BrowserStore;
use crate::templates::{self, SectionTemplate};

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| js_sys::Error::new(&err.to_string()).into())
}

#[allow(clippy::fn_params_excessive_bools)]
fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers { shift, ctrl, alt, meta }
}

/// Store-map editor bound to `localStorage`.
#[wasm_bindgen]
pub struct WebEditor {
    inner: Editor<BrowserStore>,
}

#[wasm_bindgen]
#[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
impl WebEditor {
    /// Open the editor from `localStorage`, falling back to the default layout.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Editor::open(BrowserStore) }
    }

    /// Apply any JSON-encoded [`Event`]. Returns the resulting actions as JSON.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` when `event` is not a valid event.
    pub fn dispatch(&mut self, event: &str) -> Result<String, JsValue> {
        let event: Event =
            serde_json::from_str(event).map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;
        self.emit(event)
    }

    // --- Input events ---

    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> Result<String, JsValue> {
        self.emit(Event::PointerDown {
            screen: Point::new(x, y),
            button: Button::from_dom(button),
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> Result<String, JsValue> {
        self.emit(Event::PointerMove { screen: Point::new(x, y), modifiers: modifiers(shift, ctrl, alt, meta) })
    }

    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> Result<String, JsValue> {
        self.emit(Event::PointerUp {
            screen: Point::new(x, y),
            button: Button::from_dom(button),
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    /// Start dragging the palette entry named `name`.
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` when no built-in template has that name.
    pub fn template_pointer_down(&mut self, name: &str) -> Result<String, JsValue> {
        let Some(template) = templates::find_template(name) else {
            return Err(js_sys::Error::new(&format!("unknown template `{name}`")).into());
        };
        self.emit(Event::TemplatePointerDown { template })
    }

    pub fn wheel(&mut self, x: f64, y: f64, dx: f64, dy: f64, ctrl: bool, meta: bool) -> Result<String, JsValue> {
        self.emit(Event::Wheel {
            screen: Point::new(x, y),
            delta: WheelDelta { dx, dy },
            modifiers: modifiers(false, ctrl, false, meta),
        })
    }

    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> Result<String, JsValue> {
        self.emit(Event::KeyDown { key: Key(key.to_owned()), modifiers: modifiers(shift, ctrl, alt, meta) })
    }

    // --- Queries ---

    /// Every section in draw order.
    pub fn sections(&self) -> Result<String, JsValue> {
        to_json(self.inner.canvas().sections())
    }

    /// Resize handle squares of the selected section, or `[]`.
    pub fn selection_handles(&self) -> Result<String, JsValue> {
        let rects = self
            .inner
            .selection()
            .and_then(|id| self.inner.canvas().get(id))
            .map(|s| geometry::handle_rects(s.bounds()).to_vec())
            .unwrap_or_default();
        to_json(&rects)
    }

    /// Drop rectangle under the pointer during a template drag, or `null`.
    pub fn ghost_preview(&self) -> Result<String, JsValue> {
        to_json(&self.inner.core.ghost_preview())
    }

    pub fn templates(&self) -> Result<String, JsValue> {
        to_json(&templates::all_store_sections())
    }

    pub fn color_themes(&self) -> Result<String, JsValue> {
        to_json(&templates::color_themes())
    }

    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.inner.selection().map(str::to_owned)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.inner.core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.inner.core.can_redo()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.inner.camera().zoom
    }

    #[must_use]
    pub fn pan_x(&self) -> f64 {
        self.inner.camera().pan_x
    }

    #[must_use]
    pub fn pan_y(&self) -> f64 {
        self.inner.camera().pan_y
    }

    #[must_use]
    pub fn cursor_at(&self, x: f64, y: f64) -> String {
        self.inner.core.cursor_at(Point::new(x, y)).to_owned()
    }
}

impl Default for WebEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl WebEditor {
    fn emit(&mut self, event: Event) -> Result<String, JsValue> {
        let actions: Vec<Action> = self.inner.apply(event);
        to_json(&actions)
    }
}
