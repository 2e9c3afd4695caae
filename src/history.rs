use crate::contact::ContactRecord;
use std::collections::VecDeque;
use tracing::trace;

/// Full copy of the contact list at one point in time
pub type Snapshot = Vec<ContactRecord>;

/// Undo/redo log of whole-list snapshots.
///
/// The undo stack holds the state before each mutation; the redo stack holds
/// the states that undo stepped back from. Stacks grow without bound unless a
/// maximum depth is set, in which case the oldest snapshot is dropped first.
#[derive(Debug, Default, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    max_depth: Option<usize>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }

    /// Record the pre-mutation state. Any redo history is discarded.
    pub fn record_mutation(&mut self, snapshot: Snapshot) {
        Self::push_bounded(&mut self.undo_stack, snapshot, self.max_depth);
        if !self.redo_stack.is_empty() {
            trace!(target: "history", "Discarding {} redo snapshots", self.redo_stack.len());
        }
        self.redo_stack.clear();
    }

    /// Pop the most recent pre-mutation snapshot.
    ///
    /// The caller pushes the state it is replacing with `push_redo`.
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.undo_stack.pop_back()
    }

    /// Pop the most recently undone snapshot.
    ///
    /// The caller pushes the state it is replacing with `push_undo`.
    pub fn redo(&mut self) -> Option<Snapshot> {
        self.redo_stack.pop_back()
    }

    /// Push onto the undo stack without touching redo history
    pub fn push_undo(&mut self, snapshot: Snapshot) {
        Self::push_bounded(&mut self.undo_stack, snapshot, self.max_depth);
    }

    /// Push onto the redo stack without touching undo history
    pub fn push_redo(&mut self, snapshot: Snapshot) {
        Self::push_bounded(&mut self.redo_stack, snapshot, self.max_depth);
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

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_depth: Option<usize>) {
        if let Some(limit) = max_depth {
            if limit == 0 {
                return;
            }
            while stack.len() >= limit {
                stack.pop_front();
            }
        }
        stack.push_back(snapshot);
    }
}
