//! Undo/redo history of element store snapshots.

use crate::store::ElementStore;
use std::collections::VecDeque;

/// Two stacks of past and future store snapshots.
///
/// Undo entries are pushed to and popped from the end. Redo entries are
/// pushed to and taken from the front, so the most recently undone state is
/// always the first one redone.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<ElementStore>,
    redo_stack: VecDeque<ElementStore>,
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` undo entries.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record `previous` as the state before a new edit. Clears redo.
    pub fn commit(&mut self, previous: ElementStore) {
        self.undo_stack.push(previous);
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
    }

    /// Step back. `current` becomes the first redo entry and the most recent
    /// undo entry is returned, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current: ElementStore) -> Option<ElementStore> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push_front(current);
        Some(previous)
    }

    /// Step forward. `current` is pushed onto undo and the first redo entry
    /// is returned, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current: ElementStore) -> Option<ElementStore> {
        let next = self.redo_stack.pop_front()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Every retained snapshot, undo entries first.
    pub fn snapshots(&self) -> impl Iterator<Item = &ElementStore> {
        self.undo_stack.iter().chain(self.redo_stack.iter())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
