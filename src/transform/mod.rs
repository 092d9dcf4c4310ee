//! Dataset transformations.
//!
//! Every operation is a pure function from a borrowed [`Dataset`] (plus
//! parameters) to an [`Edit`]: a brand new dataset and the label it will carry
//! in the history log. `None` means there is nothing to record, for example a
//! rename to the same name or an edit aimed at a column that does not exist.
//!
//! [`Operation`] is the serialisable form of the same library, used by edit
//! plans and by [`crate::editor::Editor::apply`].

pub mod cleaning;
pub mod columns;
pub mod rows;
pub mod string_ops;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    data::Value,
    dataset::{ColumnType, Dataset},
    error::EditError,
    expr::RowPredicate,
};

/// A computed, not yet committed, replacement dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub dataset: Dataset,
    pub description: String,
}

impl Edit {
    pub fn new(dataset: Dataset, description: impl Into<String>) -> Self {
        Self {
            dataset,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    RemoveColumn {
        column: String,
    },
    RenameColumn {
        from: String,
        to: String,
    },
    ChangeColumnType {
        column: String,
        to: ColumnType,
    },
    ReorderColumns {
        order: Vec<String>,
    },
    RemoveRow {
        index: usize,
    },
    RemoveRows {
        indices: Vec<usize>,
    },
    RemoveDuplicates {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    Filter {
        expression: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    FindAndReplace {
        column: String,
        find: String,
        replace: String,
        #[serde(default)]
        match_case: bool,
    },
    TrimWhitespace {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    FillNulls {
        column: String,
        value: Value,
    },
    RemoveNullRows {
        column: String,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::RemoveColumn { .. } => "remove_column",
            Operation::RenameColumn { .. } => "rename_column",
            Operation::ChangeColumnType { .. } => "change_column_type",
            Operation::ReorderColumns { .. } => "reorder_columns",
            Operation::RemoveRow { .. } => "remove_row",
            Operation::RemoveRows { .. } => "remove_rows",
            Operation::RemoveDuplicates { .. } => "remove_duplicates",
            Operation::Filter { .. } => "filter",
            Operation::FindAndReplace { .. } => "find_and_replace",
            Operation::TrimWhitespace { .. } => "trim_whitespace",
            Operation::FillNulls { .. } => "fill_nulls",
            Operation::RemoveNullRows { .. } => "remove_null_rows",
        }
    }

    /// Computes the edit without touching `dataset`. Only a filter expression
    /// that does not compile can fail.
    pub fn apply(&self, dataset: &Dataset) -> Result<Option<Edit>, EditError> {
        debug!("Applying {} to '{}'", self.name(), dataset.name);
        let edit = match self {
            Operation::RemoveColumn { column } => columns::remove_column(dataset, column),
            Operation::RenameColumn { from, to } => columns::rename_column(dataset, from, to),
            Operation::ChangeColumnType { column, to } => {
                columns::change_column_type(dataset, column, *to)
            }
            Operation::ReorderColumns { order } => columns::reorder_columns(dataset, order),
            Operation::RemoveRow { index } => rows::remove_row(dataset, *index),
            Operation::RemoveRows { indices } => rows::remove_rows(dataset, indices),
            Operation::RemoveDuplicates { columns } => {
                rows::remove_duplicates(dataset, columns.as_deref())
            }
            Operation::Filter {
                expression,
                description,
            } => {
                let predicate = RowPredicate::compile(expression)?;
                let label = description
                    .clone()
                    .unwrap_or_else(|| format!("Filtered rows: {expression}"));
                rows::filter_rows(dataset, |record| predicate.matches(record), &label)
            }
            Operation::FindAndReplace {
                column,
                find,
                replace,
                match_case,
            } => cleaning::find_and_replace(dataset, column, find, replace, *match_case),
            Operation::TrimWhitespace { columns } => {
                cleaning::trim_whitespace(dataset, columns.as_deref())
            }
            Operation::FillNulls { column, value } => cleaning::fill_nulls(dataset, column, value),
            Operation::RemoveNullRows { column } => cleaning::remove_null_rows(dataset, column),
        };
        Ok(edit)
    }
}
