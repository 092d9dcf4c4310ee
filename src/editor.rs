//! One editing session over a dataset.
//!
//! An [`Editor`] owns the dataset of record, the undo/redo [`HistoryLog`] and
//! the snapshot taken at import time. Editors share nothing, so each chart tab
//! or editing surface gets its own instance.
//!
//! Edits are two-step: an operation computes an [`Edit`], and [`Editor::commit`]
//! records it. [`Editor::apply`] does both; [`Editor::preview`] only computes.

use log::{debug, info};

use crate::{
    dataset::{Dataset, Record},
    error::EditError,
    history::{HistoryEntry, HistoryLog},
    transform::{Edit, Operation, rows},
};

pub const INITIAL_IMPORT: &str = "Initial import";
pub const RESET_TO_ORIGINAL: &str = "Reset to original data";

#[derive(Debug, Clone, Default)]
pub struct Editor {
    dataset: Option<Dataset>,
    original: Option<Dataset>,
    history: HistoryLog,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, EditError> {
        Ok(Self {
            dataset: None,
            original: None,
            history: HistoryLog::with_capacity(capacity)?,
        })
    }

    /// Makes `dataset` the dataset of record with a fresh single-entry history.
    /// `None` or an empty dataset clears the session instead.
    pub fn load(&mut self, dataset: Option<Dataset>) {
        let Some(dataset) = dataset.filter(|d| !d.is_empty()) else {
            self.clear();
            return;
        };
        info!(
            "Loaded '{}' with {} row(s) across {} column(s)",
            dataset.name,
            dataset.rows(),
            dataset.columns.len()
        );
        self.history
            .reset(HistoryEntry::new(dataset.clone(), INITIAL_IMPORT));
        self.original = Some(dataset.clone());
        self.dataset = Some(dataset);
    }

    pub fn clear(&mut self) {
        debug!("Clearing editor state");
        self.dataset = None;
        self.original = None;
        self.history.clear();
    }

    /// Records `dataset` as a new history entry and makes it current.
    pub fn commit(&mut self, dataset: Dataset, description: impl Into<String>) {
        let description = description.into();
        let discarded = self
            .history
            .push(HistoryEntry::new(dataset.clone(), description.clone()));
        info!(
            "Committed '{}' ({} row(s)); history {}/{}",
            description,
            dataset.rows(),
            self.history.index() + 1,
            self.history.len()
        );
        if discarded > 0 {
            debug!("Discarded {discarded} history entries");
        }
        self.dataset = Some(dataset);
    }

    /// Computes `operation` against the current dataset without recording it.
    pub fn preview(&self, operation: &Operation) -> Result<Option<Edit>, EditError> {
        match &self.dataset {
            Some(dataset) => operation.apply(dataset),
            None => Ok(None),
        }
    }

    /// Computes and commits `operation`. Returns whether an entry was recorded.
    pub fn apply(&mut self, operation: &Operation) -> Result<bool, EditError> {
        let edit = self.preview(operation)?;
        Ok(self.commit_edit(edit))
    }

    /// Keeps the records matching `predicate`, labelled with `description`.
    pub fn filter_rows<F>(&mut self, predicate: F, description: &str) -> bool
    where
        F: Fn(&Record) -> bool,
    {
        let edit = self
            .dataset
            .as_ref()
            .and_then(|dataset| rows::filter_rows(dataset, predicate, description));
        self.commit_edit(edit)
    }

    /// Commits a copy of the import snapshot, so the reset itself can be undone.
    pub fn reset_to_original(&mut self) -> bool {
        let Some(original) = self.original.clone() else {
            return false;
        };
        if self.dataset.is_none() {
            return false;
        }
        self.commit(original, RESET_TO_ORIGINAL);
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                debug!("Undo to '{}'", entry.description);
                self.dataset = Some(entry.dataset.clone());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                debug!("Redo to '{}'", entry.description);
                self.dataset = Some(entry.dataset.clone());
                true
            }
            None => false,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn original(&self) -> Option<&Dataset> {
        self.original.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_length(&self) -> usize {
        self.history.len()
    }

    pub fn current_history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.entries()
    }

    fn commit_edit(&mut self, edit: Option<Edit>) -> bool {
        match edit {
            Some(Edit {
                dataset,
                description,
            }) => {
                self.commit(dataset, description);
                true
            }
            None => false,
        }
    }
}
