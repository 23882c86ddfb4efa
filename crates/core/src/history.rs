//! Linear undo/redo history over script snapshots.
//!
//! `index` counts committed entries up to and including the active one, so
//! the active entry is `entries[index - 1]`. A push after an undo discards
//! everything past the active entry.

use serde::{Deserialize, Serialize};

use crate::document::ScriptDocument;

/// Provenance tag of the entry recorded by [`ScriptHistory::init`].
pub const INIT_ENTRY: &str = "init";

/// One committed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub data: ScriptDocument,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
    current: Option<ScriptDocument>,
}

impl ScriptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a single `init` entry holding `document`.
    pub fn init(&mut self, document: ScriptDocument) {
        self.entries.clear();
        self.index = 0;
        self.push(INIT_ENTRY, &document);
        self.current = Some(document);
    }

    /// Record a snapshot of `document`.
    ///
    /// Returns false without touching state when `document` equals the
    /// active entry.
    pub fn push(&mut self, name: &str, document: &ScriptDocument) -> bool {
        if self.active_entry().is_some_and(|entry| entry.data == *document) {
            tracing::trace!(name, index = self.index, "history push skipped: unchanged");
            return false;
        }
        self.entries.truncate(self.index);
        self.entries.push(HistoryEntry {
            data: document.clone(),
            name: name.to_string(),
        });
        self.index += 1;
        tracing::trace!(name, index = self.index, len = self.entries.len(), "history push");
        true
    }

    /// Replace the current document without recording history.
    pub fn update_current(&mut self, document: ScriptDocument) {
        self.current = Some(document);
    }

    /// Step back one entry. No-op unless [`undoable`](Self::undoable).
    pub fn undo(&mut self) -> bool {
        if !self.undoable() {
            return false;
        }
        self.current = Some(self.entries[self.index - 2].data.clone());
        self.index -= 1;
        tracing::trace!(index = self.index, "history undo");
        true
    }

    /// Step forward one entry. No-op unless [`redoable`](Self::redoable).
    pub fn redo(&mut self) -> bool {
        if !self.redoable() {
            return false;
        }
        self.current = Some(self.entries[self.index].data.clone());
        self.index += 1;
        tracing::trace!(index = self.index, "history redo");
        true
    }

    pub fn undoable(&self) -> bool {
        self.index > 1
    }

    pub fn redoable(&self) -> bool {
        self.index < self.entries.len()
    }

    pub fn current(&self) -> Option<&ScriptDocument> {
        self.current.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn active_entry(&self) -> Option<&HistoryEntry> {
        self.index.checked_sub(1).and_then(|i| self.entries.get(i))
    }
}
