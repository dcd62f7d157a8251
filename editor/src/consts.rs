//! Shared numeric constants for the store-map editor.

// ── Canvas ──────────────────────────────────────────────────────

/// Width of the store-map canvas in canvas units.
pub const CANVAS_WIDTH: i32 = 1200;

/// Height of the store-map canvas in canvas units.
pub const CANVAS_HEIGHT: i32 = 600;

/// Smallest width or height a section may be resized to.
pub const MIN_SIZE: i32 = 50;

// ── New sections ────────────────────────────────────────────────

/// Width of a section created from a template drop or the add dialog.
pub const DEFAULT_SECTION_WIDTH: i32 = 200;

/// Height of a section created from a template drop or the add dialog.
pub const DEFAULT_SECTION_HEIGHT: i32 = 150;

/// Pointer offset inside the ghost preview while dragging a template.
pub const TEMPLATE_GRAB_OFFSET_X: i32 = 50;

/// Vertical counterpart of [`TEMPLATE_GRAB_OFFSET_X`].
pub const TEMPLATE_GRAB_OFFSET_Y: i32 = 25;

/// Where the add dialog places a blank section.
pub const BLANK_SECTION_X: i32 = 100;

/// Vertical counterpart of [`BLANK_SECTION_X`].
pub const BLANK_SECTION_Y: i32 = 100;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of snapshots kept in the undo history.
pub const MAX_HISTORY_SIZE: usize = 50;

// ── View ────────────────────────────────────────────────────────

/// Lowest zoom factor.
pub const MIN_ZOOM: f64 = 0.25;

/// Highest zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom change per wheel notch or zoom button press.
pub const ZOOM_STEP: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of the square hit region centered on each resize anchor.
pub const HANDLE_SIZE: i32 = 8;
