//! Bounded, linear undo/redo log of dataset snapshots.
//!
//! The log is a timeline of [`HistoryEntry`] values with a cursor on the
//! current one. Pushing while the cursor is behind the tip discards the redo
//! branch first, so history never forks. Once the log holds `capacity`
//! entries the oldest is evicted and the cursor shifts down with it.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::{dataset::Dataset, error::EditError};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub dataset: Dataset,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(dataset: Dataset, description: impl Into<String>) -> Self {
        Self {
            dataset,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    index: usize,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            index: 0,
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl HistoryLog {
    pub fn with_capacity(capacity: usize) -> Result<Self, EditError> {
        if capacity == 0 {
            return Err(EditError::InvalidCapacity);
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity),
            index: 0,
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current entry. Meaningless while the log is empty.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Replaces the whole timeline with a single entry.
    pub fn reset(&mut self, entry: HistoryEntry) {
        self.entries.clear();
        self.entries.push_back(entry);
        self.index = 0;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }

    /// Appends `entry` after the cursor, dropping the redo branch and evicting
    /// the oldest entry when over capacity. Returns the number of entries discarded.
    pub fn push(&mut self, entry: HistoryEntry) -> usize {
        let mut discarded = 0;
        if !self.entries.is_empty() {
            discarded = self.entries.len() - (self.index + 1);
            self.entries.truncate(self.index + 1);
        }
        self.entries.push_back(entry);
        self.index = self.entries.len() - 1;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.index -= 1;
            discarded += 1;
        }
        discarded
    }

    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }
}
