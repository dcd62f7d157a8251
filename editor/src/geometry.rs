//! Pure geometry for moving and resizing sections on the fixed-size canvas.
//!
//! Nothing here fails. Out-of-range pointer coordinates saturate at the
//! canvas edges and every result satisfies the section invariants:
//! `0 <= x`, `0 <= y`, `x + width <= CANVAS_WIDTH`,
//! `y + height <= CANVAS_HEIGHT`, `width >= MIN_SIZE`, `height >= MIN_SIZE`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_SECTION_HEIGHT, DEFAULT_SECTION_WIDTH, HANDLE_SIZE, MIN_SIZE};

/// A point in integer canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: CanvasPoint) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }
}

/// One of the eight resize handles on a section's border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// Every handle, corners before edges.
    pub const ALL: [Self; 8] = [Self::Nw, Self::Ne, Self::Sw, Self::Se, Self::N, Self::S, Self::W, Self::E];

    /// Short lowercase name (`"nw"`, `"e"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
            Self::Nw => "nw-resize",
        }
    }

    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    #[must_use]
    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a handle name is not one of the eight compass points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize handle `{0}`; expected one of n, ne, e, se, s, sw, w, nw")]
pub struct ParseHandleError(pub String);

impl FromStr for ResizeHandle {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseHandleError(s.to_owned()))
    }
}

/// Pull `pos` back so a span of `size` starting there fits in `[0, extent]`.
#[must_use]
pub fn clamp_axis(pos: i32, size: i32, extent: i32) -> i32 {
    pos.min(extent.saturating_sub(size)).max(0)
}

/// Clamp a size into `[MIN_SIZE, extent]`.
#[must_use]
pub fn clamp_size(size: i32, extent: i32) -> i32 {
    size.max(MIN_SIZE).min(extent)
}

/// Saturate a pointer at the canvas edges.
#[must_use]
pub fn saturate_pointer(pt: CanvasPoint) -> CanvasPoint {
    CanvasPoint { x: pt.x.clamp(0, CANVAS_WIDTH), y: pt.y.clamp(0, CANVAS_HEIGHT) }
}

/// Whether `pt` is on the canvas, edges included.
#[must_use]
pub fn in_canvas(pt: CanvasPoint) -> bool {
    (0..=CANVAS_WIDTH).contains(&pt.x) && (0..=CANVAS_HEIGHT).contains(&pt.y)
}

/// Force arbitrary bounds into a valid section rectangle.
#[must_use]
pub fn clamp_bounds(b: Bounds) -> Bounds {
    let width = clamp_size(b.width, CANVAS_WIDTH);
    let height = clamp_size(b.height, CANVAS_HEIGHT);
    Bounds {
        x: clamp_axis(b.x, width, CANVAS_WIDTH),
        y: clamp_axis(b.y, height, CANVAS_HEIGHT),
        width,
        height,
    }
}

/// New top-left corner for a section dragged so that `grab` (the pointer's
/// offset inside the section at pointer-down) stays under `pointer`.
#[must_use]
pub fn move_section(bounds: Bounds, pointer: CanvasPoint, grab: CanvasPoint) -> CanvasPoint {
    CanvasPoint {
        x: clamp_axis(pointer.x.saturating_sub(grab.x), bounds.width, CANVAS_WIDTH),
        y: clamp_axis(pointer.y.saturating_sub(grab.y), bounds.height, CANVAS_HEIGHT),
    }
}

/// New bounds for a section whose `handle` is dragged to `pointer`.
///
/// The edge opposite each moving edge never moves. When the requested size
/// falls under `MIN_SIZE` the moving edge stops `MIN_SIZE` away from the
/// fixed one.
#[must_use]
pub fn resize_section(bounds: Bounds, handle: ResizeHandle, pointer: CanvasPoint) -> Bounds {
    let p = saturate_pointer(pointer);
    let right = bounds.right();
    let bottom = bounds.bottom();
    let mut next = bounds;

    if handle.moves_west() {
        next.width = (right - p.x).max(MIN_SIZE);
        next.x = right - next.width;
    } else if handle.moves_east() {
        next.width = (p.x - bounds.x).max(MIN_SIZE);
    }

    if handle.moves_north() {
        next.height = (bottom - p.y).max(MIN_SIZE);
        next.y = bottom - next.height;
    } else if handle.moves_south() {
        next.height = (p.y - bounds.y).max(MIN_SIZE);
    }

    clamp_bounds(next)
}

/// The eight anchor points (corners and edge midpoints) of `bounds`.
#[must_use]
pub fn handle_anchors(bounds: Bounds) -> [(ResizeHandle, CanvasPoint); 8] {
    let cx = bounds.x + bounds.width / 2;
    let cy = bounds.y + bounds.height / 2;
    let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
    ResizeHandle::ALL.map(|handle| {
        let pt = match handle {
            ResizeHandle::Nw => CanvasPoint::new(l, t),
            ResizeHandle::Ne => CanvasPoint::new(r, t),
            ResizeHandle::Sw => CanvasPoint::new(l, b),
            ResizeHandle::Se => CanvasPoint::new(r, b),
            ResizeHandle::N => CanvasPoint::new(cx, t),
            ResizeHandle::S => CanvasPoint::new(cx, b),
            ResizeHandle::W => CanvasPoint::new(l, cy),
            ResizeHandle::E => CanvasPoint::new(r, cy),
        };
        (handle, pt)
    })
}

/// The square hit region centered on a handle anchor.
#[must_use]
pub fn handle_rect(anchor: CanvasPoint) -> Bounds {
    let half = HANDLE_SIZE / 2;
    Bounds::new(anchor.x - half, anchor.y - half, HANDLE_SIZE, HANDLE_SIZE)
}

/// Hit regions for all eight handles of `bounds`.
#[must_use]
pub fn handle_rects(bounds: Bounds) -> [(ResizeHandle, Bounds); 8] {
    handle_anchors(bounds).map(|(handle, anchor)| (handle, handle_rect(anchor)))
}

/// Where a template dropped at `pointer` lands, before the in-canvas check.
#[must_use]
pub fn drop_bounds(pointer: CanvasPoint, grab: CanvasPoint) -> Bounds {
    let origin = move_section(
        Bounds::new(0, 0, DEFAULT_SECTION_WIDTH, DEFAULT_SECTION_HEIGHT),
        pointer,
        grab,
    );
    Bounds::new(origin.x, origin.y, DEFAULT_SECTION_WIDTH, DEFAULT_SECTION_HEIGHT)
}
