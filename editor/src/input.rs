//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the interaction controller.
//! `Modifiers` and `Button` capture the user's intent at the time of a
//! pointer event. `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying all context needed to apply live
//! updates and decide on release whether anything gets committed.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::SectionId;
use crate::geometry::{Bounds, CanvasPoint, ResizeHandle};
use crate::templates::SectionTemplate;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"z"`, `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive comparison against a key name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// UI state visible to the renderer. Never part of history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// The id of the currently selected section, if any.
    pub selected_id: Option<SectionId>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute live
/// updates and the final commit on pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the view.
    Panning {
        /// Screen position of the pointer minus the pan offset at pointer-down.
        start: Point,
    },
    /// The user is moving a section across the canvas.
    DraggingSection {
        /// Id of the section being dragged.
        id: SectionId,
        /// Pointer position relative to the section origin at pointer-down.
        grab: CanvasPoint,
        /// Bounds at pointer-down, used to skip no-op commits.
        orig: Bounds,
    },
    /// The user is resizing a section by dragging one of its eight handles.
    ResizingSection {
        /// Id of the section being resized.
        id: SectionId,
        /// Which corner/edge handle is being dragged.
        handle: ResizeHandle,
        /// Bounds at pointer-down, used to skip no-op commits.
        orig: Bounds,
    },
    /// The user is dragging a palette template toward the canvas.
    CreatingFromTemplate {
        /// Fields stamped onto the new section on drop.
        template: SectionTemplate,
        /// Pointer position inside the ghost preview.
        grab: CanvasPoint,
        /// Last pointer position in canvas space, if it has moved yet.
        pointer: Option<CanvasPoint>,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
