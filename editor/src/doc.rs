//! Document model: store sections, sparse edits, and the canvas state.
//!
//! A `Section` is one named rectangle on the store map. `CanvasState` is the
//! ordered collection of all sections at a point in time and is the unit the
//! history snapshots. Insertion order doubles as draw order; nothing else
//! depends on it.
//!
//! Data flows into this layer from persistence (JSON deserialization) and
//! from the interaction controller (mutations). The JSON shape uses camelCase
//! keys so state written by the web editor loads unchanged.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, Bounds};

/// Opaque, stable identifier for a section.
pub type SectionId = String;

/// Allocate a fresh section id. Ids are never reused.
#[must_use]
pub fn fresh_section_id() -> SectionId {
    format!("section-{}", Uuid::new_v4())
}

/// A named rectangular region of the store map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique identifier, assigned at creation.
    pub id: SectionId,
    /// Display label.
    pub name: String,
    /// Icon shown above the label. Opaque to the editor.
    pub emoji: String,
    /// Background/border style. Opaque to the editor.
    pub color: String,
    /// Label style. Opaque to the editor.
    pub text_color: String,
    /// Left edge in canvas units.
    pub x: i32,
    /// Top edge in canvas units.
    pub y: i32,
    /// Width in canvas units.
    pub width: i32,
    /// Height in canvas units.
    pub height: i32,
    /// Hidden sections stay in state but are not drawn or hit-tested.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Section {
    /// Current bounding box.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Overwrite position and size.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    /// Return the section with its geometry pulled back inside the canvas.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.set_bounds(geometry::clamp_bounds(self.bounds()));
        self
    }
}

/// Sparse update for a section's presentation fields. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl SectionPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.emoji.is_none()
            && self.color.is_none()
            && self.text_color.is_none()
            && self.visible.is_none()
    }
}

/// Ordered collection of every section on the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasState {
    sections: Vec<Section>,
}

impl CanvasState {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self { sections: Vec::new() }
    }

    /// Build a canvas from sections, clamping any out-of-range geometry.
    #[must_use]
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections: sections.into_iter().map(Section::normalized).collect() }
    }

    /// Return a reference to a section by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Return a mutable reference to a section by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Append a section on top of the draw order.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section.normalized());
    }

    /// Remove a section by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Section> {
        let index = self.sections.iter().position(|s| s.id == id)?;
        Some(self.sections.remove(index))
    }

    /// Apply a sparse patch. Returns `true` if any field actually changed.
    pub fn apply_patch(&mut self, id: &str, patch: &SectionPatch) -> bool {
        let Some(section) = self.get_mut(id) else {
            return false;
        };
        let mut changed = false;
        if let Some(name) = &patch.name {
            changed |= section.name != *name;
            section.name.clone_from(name);
        }
        if let Some(emoji) = &patch.emoji {
            changed |= section.emoji != *emoji;
            section.emoji.clone_from(emoji);
        }
        if let Some(color) = &patch.color {
            changed |= section.color != *color;
            section.color.clone_from(color);
        }
        if let Some(text_color) = &patch.text_color {
            changed |= section.text_color != *text_color;
            section.text_color.clone_from(text_color);
        }
        if let Some(visible) = patch.visible {
            changed |= section.visible != visible;
            section.visible = visible;
        }
        changed
    }

    /// Set visibility on every section. Returns `true` if any section changed.
    pub fn set_all_visible(&mut self, visible: bool) -> bool {
        let mut changed = false;
        for section in &mut self.sections {
            changed |= section.visible != visible;
            section.visible = visible;
        }
        changed
    }

    /// All sections in draw order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Visible sections in draw order.
    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &Section> {
        self.sections.iter().filter(|s| s.visible)
    }

    /// Number of sections, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the canvas holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
