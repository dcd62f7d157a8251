//! Undo/redo history: a bounded, linear stack of full canvas snapshots.
//!
//! DESIGN
//! ======
//! Every entry is an owned deep copy of the canvas, so nothing the editor
//! mutates afterwards can leak into a stored snapshot. The cursor always
//! points at the entry equal to the live canvas right after a commit.
//! Committing while the cursor sits before the end discards the redo branch.
//! When the cap is exceeded the oldest entry is dropped and the cursor slides
//! down with it, so it keeps pointing at the newest commit.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::Serialize;
use tracing::debug;

use crate::consts::MAX_HISTORY_SIZE;
use crate::doc::CanvasState;

/// Snapshot history with an undo/redo cursor.
///
/// Serializes as `{ "history": [...], "historyIndex": n }`. Reading it back
/// goes through [`History::from_parts`] so stored data is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    #[serde(rename = "history")]
    entries: Vec<CanvasState>,
    #[serde(rename = "historyIndex")]
    cursor: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: CanvasState) -> Self {
        Self { entries: vec![initial], cursor: 0 }
    }

    /// Rebuild a history from stored parts.
    ///
    /// Returns `None` when the parts cannot describe a valid history (no
    /// entries, or a cursor past the end). Over-long histories are trimmed
    /// from the front.
    #[must_use]
    pub fn from_parts(entries: Vec<CanvasState>, cursor: usize) -> Option<Self> {
        if entries.is_empty() || cursor >= entries.len() {
            return None;
        }
        let entries: Vec<CanvasState> = entries
            .into_iter()
            .map(|entry| CanvasState::from_sections(entry.sections().to_vec()))
            .collect();
        let excess = entries.len().saturating_sub(MAX_HISTORY_SIZE);
        let mut history = Self { entries, cursor };
        if excess > 0 {
            history.entries.drain(..excess);
            history.cursor = history.cursor.saturating_sub(excess);
        }
        Some(history)
    }

    /// Record `state` as the newest entry.
    pub fn commit(&mut self, state: &CanvasState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state.clone());
        self.cursor = self.entries.len() - 1;
        if self.entries.len() > MAX_HISTORY_SIZE {
            self.entries.remove(0);
            self.cursor -= 1;
        }
        debug!(cursor = self.cursor, len = self.entries.len(), "history commit");
    }

    /// Step back one entry, returning a copy of it. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<CanvasState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, len = self.entries.len(), "history undo");
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry, returning a copy of it. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<CanvasState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, len = self.entries.len(), "history redo");
        Some(self.entries[self.cursor].clone())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&CanvasState> {
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a history built through [`History::new`] or [`History::from_parts`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[CanvasState] {
        &self.entries
    }
}
