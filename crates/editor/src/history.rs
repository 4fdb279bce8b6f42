//! Bounded undo/redo history
//!
//! Snapshots hold owned deep copies of the model and selection, so nothing
//! stored here aliases the live state. Pushing past the depth limit evicts
//! the oldest snapshot.

use crate::Selection;
use ddlforge_model::Model;
use std::collections::VecDeque;

/// The pre-image of a destructive edit
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    /// Description of the action that was about to run
    pub action: String,
    pub model: Model,
    pub selection: Selection,
}

impl HistorySnapshot {
    pub fn new(action: impl Into<String>, model: &Model, selection: &Selection) -> Self {
        Self {
            action: action.into(),
            model: model.clone(),
            selection: selection.clone(),
        }
    }
}

/// Undo and redo stacks
#[derive(Debug, Clone)]
pub struct History {
    /// Past states (for undo), oldest first
    past: VecDeque<HistorySnapshot>,
    /// Future states (for redo)
    future: Vec<HistorySnapshot>,
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_max_size(50)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            max_size,
        }
    }

    /// Push a new snapshot (clears redo stack)
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.past.push_back(snapshot);
        self.future.clear();

        while self.past.len() > self.max_size {
            self.past.pop_front();
        }
    }

    /// Undo: pop from past, push current to future
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Redo: pop from future, push current to past
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Action label of the snapshot the next undo restores
    pub fn last_action(&self) -> Option<&str> {
        self.past.back().map(|s| s.action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(label: &str) -> HistorySnapshot {
        HistorySnapshot::new(label, &Model::default(), &Selection::new())
    }

    #[test]
    fn test_undo_redo_order() {
        let mut history = History::new();
        history.push(snapshot("a"));
        history.push(snapshot("b"));

        let undone = history.undo(snapshot("current")).unwrap();
        assert_eq!(undone.action, "b");
        assert!(history.can_redo());

        let redone = history.redo(snapshot("after-undo")).unwrap();
        assert_eq!(redone.action, "current");
        assert_eq!(history.last_action(), Some("after-undo"));
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new();
        history.push(snapshot("a"));
        history.undo(snapshot("current"));
        assert_eq!(history.redo_count(), 1);

        history.push(snapshot("b"));
        assert_eq!(history.redo_count(), 0);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut history = History::with_max_size(3);
        for label in ["1", "2", "3", "4", "5"] {
            history.push(snapshot(label));
        }
        assert_eq!(history.undo_count(), 3);

        let mut labels = Vec::new();
        while let Some(s) = history.undo(snapshot("current")) {
            labels.push(s.action);
        }
        assert_eq!(labels, vec!["5", "4", "3"]);
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.undo(snapshot("current")).is_none());
        assert!(history.redo(snapshot("current")).is_none());
        assert_eq!(history.redo_count(), 0);
        assert_eq!(history.max_size(), 50);
    }
}
