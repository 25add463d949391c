//! Undo/redo history over document snapshots.

use std::collections::VecDeque;

/// A present/past/future triple of snapshots.
///
/// `commit` records the current present before replacing it and clears the
/// future. `amend` edits the present in place without recording; pair it with
/// `record` to turn a run of amendments into one undo step.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: Vec<T>,
    /// Maximum number of past states kept (`None` = unbounded).
    limit: Option<usize>,
}

impl<T: Clone> History<T> {
    /// Create a history whose present is `initial` and whose past is empty.
    pub fn new(initial: T, limit: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: Vec::new(),
            limit,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Replace the present, recording the old one for undo.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.record(previous);
    }

    /// Mutable access to the present without recording an undo step.
    pub fn amend(&mut self) -> &mut T {
        &mut self.present
    }

    /// Record `previous` as the state the current present was derived from.
    pub fn record(&mut self, previous: T) {
        self.past.push_back(previous);
        self.future.clear();

        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push_back(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}
