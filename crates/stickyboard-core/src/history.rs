//! Linear undo/redo history.
//!
//! History is a list of content snapshots plus a cursor pointing at the
//! snapshot currently shown. Pushing a snapshot after an undo discards
//! everything after the cursor, so there is never more than one future.

use crate::document::BoardContent;
use serde::{Deserialize, Serialize};

/// A recorded state of the board content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Deep copy of notes, drawing elements and connectors.
    pub content: BoardContent,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Name of the action that produced this state.
    pub action_label: String,
    pub user_id: String,
}

/// Snapshot list with a cursor.
///
/// Invariant: `cursor < snapshots.len()` whenever the list is non-empty.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<HistorySnapshot>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Cursor position, or None while the history is empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then_some(self.cursor)
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.snapshots.get(self.cursor)
    }

    pub fn snapshots(&self) -> &[HistorySnapshot] {
        &self.snapshots
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor < self.snapshots.len() - 1
    }

    /// Append a snapshot after the cursor, discarding the redo branch.
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Replace the whole history with a single snapshot.
    pub fn reset(&mut self, snapshot: HistorySnapshot) {
        self.snapshots.clear();
        self.snapshots.push(snapshot);
        self.cursor = 0;
    }

    /// Step back one snapshot. Returns the snapshot now at the cursor.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot. Returns the snapshot now at the cursor.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    /// Drop the oldest snapshots until at most `limit` remain (minimum 1).
    /// The cursor keeps pointing at the same snapshot when it survives.
    pub fn trim_oldest(&mut self, limit: usize) {
        let limit = limit.max(1);
        if self.snapshots.len() <= limit {
            return;
        }
        let excess = self.snapshots.len() - limit;
        self.snapshots.drain(..excess);
        self.cursor = self.cursor.saturating_sub(excess);
    }
}
