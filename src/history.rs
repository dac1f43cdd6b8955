//! Snapshot-based undo/redo engine.
//!
//! Two bounded stacks of deep-copied graph states. The caller pushes the
//! state *before* applying a mutation, never after, so undo always
//! restores the state immediately prior to the last user action. A push
//! clears the redo stack; branching history is not supported.

use crate::graph::GraphModel;

/// Maximum number of undo levels retained; the oldest entry is evicted
/// beyond this depth.
pub const MAX_DEPTH: usize = 50;

#[derive(Debug, Default)]
pub struct SnapshotHistory {
    past: Vec<GraphModel>,
    future: Vec<GraphModel>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state about to be mutated. Evicts the oldest snapshot
    /// past [`MAX_DEPTH`] and invalidates any redo entries.
    pub fn push(&mut self, current: &GraphModel) {
        self.push_owned(current.clone());
    }

    /// Like [`push`](Self::push) for a snapshot the caller already owns,
    /// e.g. the pre-drag state stashed at drag start and committed on drop.
    pub fn push_owned(&mut self, snapshot: GraphModel) {
        self.past.push(snapshot);
        if self.past.len() > MAX_DEPTH {
            self.past.remove(0);
        }
        self.future.clear();
    }

    /// Pops the most recent snapshot, parking `current` for redo.
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &GraphModel) -> Option<GraphModel> {
        let previous = self.past.pop()?;
        self.future.push(current.clone());
        Some(previous)
    }

    /// Symmetric to [`undo`](Self::undo).
    pub fn redo(&mut self, current: &GraphModel) -> Option<GraphModel> {
        let next = self.future.pop()?;
        self.past.push(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo levels currently available.
    pub fn depth(&self) -> usize {
        self.past.len()
    }
}
