//! Edit plans: an ordered list of steps replayed through an [`Editor`].
//!
//! ```yaml
//! history_capacity: 20
//! steps:
//!   - op: trim_whitespace
//!   - op: remove_null_rows
//!     column: revenue
//!   - undo
//!   - reset
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    editor::Editor,
    error::EditError,
    history::DEFAULT_HISTORY_CAPACITY,
    transform::Operation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Undo,
    Redo,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Control(Control),
    Edit(Operation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPlan {
    #[serde(default = "default_capacity")]
    pub history_capacity: usize,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// What happened to each step when a plan ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanReport {
    pub applied: usize,
    pub skipped: usize,
}

impl EditPlan {
    pub fn from_yaml_str(raw: &str) -> Result<Self, EditError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, EditError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, EditError> {
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&raw),
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::from_yaml_str(&raw)
            }
            _ => Err(EditError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Replays the steps in order. Steps whose preconditions fail (nothing to
    /// undo, a rename onto itself, ...) are counted as skipped.
    pub fn run(&self, editor: &mut Editor) -> Result<PlanReport, EditError> {
        let mut report = PlanReport::default();
        for (idx, step) in self.steps.iter().enumerate() {
            let done = match step {
                Step::Control(Control::Undo) => editor.undo(),
                Step::Control(Control::Redo) => editor.redo(),
                Step::Control(Control::Reset) => editor.reset_to_original(),
                Step::Edit(operation) => editor.apply(operation)?,
            };
            if done {
                report.applied += 1;
            } else {
                debug!("Step {} had no effect", idx + 1);
                report.skipped += 1;
            }
        }
        info!(
            "Plan finished: {} step(s) applied, {} skipped",
            report.applied, report.skipped
        );
        Ok(report)
    }
}
