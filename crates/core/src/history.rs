//! Bounded undo/redo history of whole-map snapshots.

use std::collections::VecDeque;
use std::mem;

use crate::map::MapStore;

pub const HISTORY_CAPACITY: usize = 64;

#[derive(Clone, Debug, Default)]
pub struct EditHistory {
    undo: VecDeque<MapStore>,
    redo: VecDeque<MapStore>,
}

/// Pushes onto the top, evicting the oldest entry at capacity.
fn push_bounded(stack: &mut VecDeque<MapStore>, snapshot: MapStore) {
    if stack.len() == HISTORY_CAPACITY {
        stack.pop_front();
    }
    stack.push_back(snapshot);
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `current` before a mutation. Any pending redo entries become invalid.
    pub fn record_edit(&mut self, current: &MapStore) {
        push_bounded(&mut self.undo, current.clone());
        self.redo.clear();
    }

    /// Returns `false` without touching `current` when there is nothing to undo.
    pub fn undo(&mut self, current: &mut MapStore) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        push_bounded(&mut self.redo, mem::replace(current, previous));
        true
    }

    pub fn redo(&mut self, current: &mut MapStore) -> bool {
        let Some(next) = self.redo.pop_back() else {
            return false;
        };
        push_bounded(&mut self.undo, mem::replace(current, next));
        true
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
