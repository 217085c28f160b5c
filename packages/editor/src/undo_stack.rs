//! # Undo/Redo Stack
//!
//! Linear snapshot history of a template document.
//!
//! ## Design
//!
//! - Each entry is a full document snapshot plus a label and a timestamp
//! - The first entry is the loaded state, so undo never goes past it
//! - Recording after an undo drops every entry beyond the pointer
//! - The stack is bounded; the oldest entry is evicted first
//!
//! Snapshots are cheap: a document clone shares every section `Arc` with
//! the original, and mutations copy only the sections they touch.

use chrono::{DateTime, Utc};
use pagecraft_model::TemplateDocument;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub document: TemplateDocument,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UndoStack {
    entries: Vec<HistoryEntry>,

    /// Index of the entry matching the current document
    pointer: usize,

    /// Maximum number of entries (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            entries: Vec::new(),
            pointer: 0,
            max_levels,
        }
    }

    /// Drop all history and start over from `document`
    pub fn reset(&mut self, document: &TemplateDocument, action: impl Into<String>) {
        self.entries.clear();
        self.pointer = 0;
        self.entries.push(HistoryEntry {
            document: document.clone(),
            action: action.into(),
            timestamp: Utc::now(),
        });
    }

    /// Record the state after a mutation
    pub fn record(&mut self, document: &TemplateDocument, action: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.pointer + 1);
        }

        self.entries.push(HistoryEntry {
            document: document.clone(),
            action: action.into(),
            timestamp: Utc::now(),
        });

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            self.entries.remove(0);
        }

        self.pointer = self.entries.len() - 1;
    }

    /// Step back. Returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&TemplateDocument> {
        if !self.can_undo() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer).map(|e| &e.document)
    }

    /// Step forward. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&TemplateDocument> {
        if !self.can_redo() {
            return None;
        }
        self.pointer += 1;
        self.entries.get(self.pointer).map(|e| &e.document)
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.pointer
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len().saturating_sub(self.pointer + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.pointer = 0;
    }

    /// Label of the change the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries.get(self.pointer).map(|e| e.action.as_str())
    }

    /// Label of the change the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.entries.get(self.pointer + 1).map(|e| e.action.as_str())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
