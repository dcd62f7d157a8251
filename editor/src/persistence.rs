//! Best-effort persistence of the canvas, its history, and the view.
//!
//! ERROR HANDLING
//! ==============
//! The in-memory session is authoritative. Every read or write failure is
//! logged and then treated as "absent" (reads) or a no-op (writes); nothing
//! here ever reports an error to the editor. Missing or corrupt data on load
//! falls back to the built-in six-section layout.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::camera::Camera;
use crate::doc::{CanvasState, Section};
use crate::history::History;
use crate::storage::{KeyValueStore, StorageError};
use crate::templates;

/// Key holding the current section list.
pub const SECTIONS_KEY: &str = "store-map-sections";
/// Key holding `{ history, historyIndex }`.
pub const HISTORY_KEY: &str = "store-map-history";
/// Key holding the camera.
pub const VIEW_KEY: &str = "store-map-view";

#[derive(serde::Deserialize)]
struct StoredHistory {
    history: Vec<Vec<Section>>,
    #[serde(rename = "historyIndex")]
    history_index: usize,
}

/// Everything needed to reopen an editor where it was left.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub canvas: CanvasState,
    pub history: History,
    pub camera: Camera,
}

/// Persistence adapter over any [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Writes ---

    /// Write the section list. Returns `false` if the write was dropped.
    pub fn save_canvas(&self, canvas: &CanvasState) -> bool {
        self.write_json(SECTIONS_KEY, canvas)
    }

    /// Write the history and its cursor. Returns `false` if the write was dropped.
    pub fn save_history(&self, history: &History) -> bool {
        self.write_json(HISTORY_KEY, history)
    }

    /// Write the camera. Returns `false` if the write was dropped.
    pub fn save_view(&self, camera: &Camera) -> bool {
        self.write_json(VIEW_KEY, camera)
    }

    // --- Reads ---

    /// Load the stored section list, or `None` when absent or unreadable.
    #[must_use]
    pub fn load_canvas(&self) -> Option<CanvasState> {
        let sections: Vec<Section> = self.read_json(SECTIONS_KEY)?;
        Some(CanvasState::from_sections(sections))
    }

    /// Load the stored history, or `None` when absent, unreadable, or invalid.
    #[must_use]
    pub fn load_history(&self) -> Option<History> {
        let stored: StoredHistory = self.read_json(HISTORY_KEY)?;
        let entries = stored.history.into_iter().map(CanvasState::from_sections).collect();
        let history = History::from_parts(entries, stored.history_index);
        if history.is_none() {
            warn!(key = HISTORY_KEY, "stored history has no entries or an out-of-range cursor; ignoring");
        }
        history
    }

    /// Load the stored camera, or `None` when absent or unreadable.
    #[must_use]
    pub fn load_view(&self) -> Option<Camera> {
        self.read_json::<Camera>(VIEW_KEY).map(Camera::sanitized)
    }

    /// Load canvas, history, and view, falling back to defaults for anything missing.
    ///
    /// A missing history is seeded with the loaded (or default) canvas.
    #[must_use]
    pub fn restore(&self) -> Restored {
        let canvas = self.load_canvas().unwrap_or_else(|| {
            debug!("no stored sections; using default layout");
            templates::default_sections()
        });
        let history = self.load_history().unwrap_or_else(|| History::new(canvas.clone()));
        let camera = self.load_view().unwrap_or_default();
        Restored { canvas, history, camera }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "failed to read from storage");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %StorageError::from(err), "discarding corrupt stored value");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %StorageError::from(err), "failed to encode value for storage");
                return false;
            }
        };
        match self.store.set(key, &raw) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, error = %err, "failed to write to storage");
                false
            }
        }
    }
}
