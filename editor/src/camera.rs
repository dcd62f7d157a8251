//! View state: pan/zoom camera and screen/canvas coordinate conversions.
//!
//! The camera never touches section data and is excluded from undo/redo. It
//! is persisted on its own so the editor reopens at the same view.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MAX_ZOOM, MIN_ZOOM};
use crate::geometry::CanvasPoint;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the nearest integer canvas unit, saturating at `i32` limits.
    #[must_use]
    pub fn to_canvas(self) -> CanvasPoint {
        CanvasPoint { x: round_to_unit(self.x), y: round_to_unit(self.y) }
    }

    /// Whether the unrounded point lies on the canvas, edges included.
    #[must_use]
    pub fn in_canvas(self) -> bool {
        (0.0..=f64::from(CANVAS_WIDTH)).contains(&self.x) && (0.0..=f64::from(CANVAS_HEIGHT)).contains(&self.y)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_unit(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    // `as` saturates for out-of-range floats.
    v.round() as i32
}

/// Camera state for pan/zoom over the store map.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Change zoom by `delta`, clamped to the zoom range.
    ///
    /// With a `focus` point (screen space) the pan is adjusted so the canvas
    /// point under `focus` stays put. Returns `false` when nothing changed.
    pub fn zoom_by(&mut self, delta: f64, focus: Option<Point>) -> bool {
        let next = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if (next - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        if let Some(focus) = focus {
            let ratio = next / self.zoom;
            self.pan_x = focus.x - (focus.x - self.pan_x) * ratio;
            self.pan_y = focus.y - (focus.y - self.pan_y) * ratio;
        }
        self.zoom = next;
        true
    }

    /// Return to zoom 1.0 with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Repair a camera read from storage: non-finite values fall back to the
    /// defaults and zoom is pulled into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let zoom = if self.zoom.is_finite() { self.zoom.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 };
        let pan_x = if self.pan_x.is_finite() { self.pan_x } else { 0.0 };
        let pan_y = if self.pan_y.is_finite() { self.pan_y } else { 0.0 };
        Self { pan_x, pan_y, zoom }
    }
}
