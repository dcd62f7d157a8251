#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{CanvasState, Section, SectionId};
use crate::geometry::{self, CanvasPoint, ResizeHandle};

/// Which part of a section was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub section_id: SectionId,
    pub part: HitPart,
}

/// Test which section (if any) is under `pt`.
///
/// The selected section's handles win over everything else. After that,
/// visible sections are checked top-most first, handles before body. Hidden
/// sections are never hit.
#[must_use]
pub fn hit_test(pt: CanvasPoint, canvas: &CanvasState, selected_id: Option<&str>) -> Option<Hit> {
    if let Some(selected) = selected_id.and_then(|id| canvas.get(id)).filter(|s| s.visible) {
        if let Some(handle) = handle_at(pt, selected) {
            return Some(Hit { section_id: selected.id.clone(), part: HitPart::ResizeHandle(handle) });
        }
    }

    canvas.visible().rev().find_map(|section| {
        if let Some(handle) = handle_at(pt, section) {
            return Some(Hit { section_id: section.id.clone(), part: HitPart::ResizeHandle(handle) });
        }
        section
            .bounds()
            .contains(pt)
            .then(|| Hit { section_id: section.id.clone(), part: HitPart::Body })
    })
}

fn handle_at(pt: CanvasPoint, section: &Section) -> Option<ResizeHandle> {
    geometry::handle_rects(section.bounds())
        .into_iter()
        .find(|(_, rect)| rect.contains(pt))
        .map(|(handle, _)| handle)
}
