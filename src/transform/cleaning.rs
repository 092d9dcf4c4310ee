//! Content clean-up: find/replace, whitespace trimming, null filling and
//! dropping rows with empty cells.

use std::borrow::Cow;

use crate::{
    data::Value,
    dataset::{ColumnType, Dataset},
    transform::{Edit, string_ops},
};

/// Replaces every literal occurrence of `find` inside string cells of `column`.
/// Matching ignores case unless `match_case` is set. Non-string cells are left alone.
pub fn find_and_replace(
    dataset: &Dataset,
    column: &str,
    find: &str,
    replace: &str,
    match_case: bool,
) -> Option<Edit> {
    if find.is_empty() || !dataset.has_column(column) {
        return None;
    }
    let pattern = string_ops::literal_pattern(find, match_case).ok()?;
    let mut affected = 0usize;
    let data = dataset
        .data
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(Value::String(text)) = record.get_mut(column) {
                let replaced = match string_ops::replace_literal(text, &pattern, replace) {
                    Cow::Owned(replaced) => Some(replaced),
                    Cow::Borrowed(_) => None,
                };
                if let Some(replaced) = replaced {
                    *text = replaced;
                    affected += 1;
                }
            }
            record
        })
        .collect();
    Some(Edit::new(
        dataset.with_data(data),
        format!("Replaced \"{find}\" with \"{replace}\" in {affected} rows"),
    ))
}

/// Trims string cells in `columns`, or in every column typed `string` when `None`.
pub fn trim_whitespace(dataset: &Dataset, columns: Option<&[String]>) -> Option<Edit> {
    let targets = match columns {
        Some(names) => names.to_vec(),
        None => dataset
            .columns
            .iter()
            .filter(|c| c.column_type == ColumnType::String)
            .map(|c| c.name.clone())
            .collect(),
    };
    let data = dataset
        .data
        .iter()
        .map(|record| {
            let mut record = record.clone();
            for name in &targets {
                if let Some(Value::String(text)) = record.get_mut(name) {
                    let trimmed = string_ops::trim(text);
                    if trimmed.len() != text.len() {
                        *text = trimmed.into_owned();
                    }
                }
            }
            record
        })
        .collect();
    Some(Edit::new(
        dataset.with_data(data),
        format!("Trimmed whitespace in {} columns", targets.len()),
    ))
}

/// Fills null and undefined cells of `column` with `value`.
pub fn fill_nulls(dataset: &Dataset, column: &str, value: &Value) -> Option<Edit> {
    if !dataset.has_column(column) {
        return None;
    }
    let mut filled = 0usize;
    let data = dataset
        .data
        .iter()
        .map(|record| {
            let mut record = record.clone();
            let slot = record.entry(column.to_string()).or_insert(Value::Null);
            if slot.is_null() {
                *slot = value.clone();
                filled += 1;
            }
            record
        })
        .collect();
    Some(Edit::new(
        dataset.with_data(data),
        format!("Filled {filled} null values in \"{column}\""),
    ))
}

/// Drops every record whose `column` is null, undefined or the empty string.
pub fn remove_null_rows(dataset: &Dataset, column: &str) -> Option<Edit> {
    if !dataset.has_column(column) {
        return None;
    }
    let data = dataset
        .data
        .iter()
        .filter(|record| match record.get(column) {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.is_empty(),
            Some(_) => true,
        })
        .cloned()
        .collect::<Vec<_>>();
    let removed = dataset.rows() - data.len();
    Some(Edit::new(
        dataset.with_data(data),
        format!("Removed {removed} rows with empty \"{column}\""),
    ))
}
