//! Structural column edits: remove, rename, retype and reorder.

use itertools::Itertools;

use crate::{
    data::Value,
    dataset::{ColumnType, Dataset},
    transform::Edit,
};

pub fn remove_column(dataset: &Dataset, name: &str) -> Option<Edit> {
    let index = dataset.column_index(name)?;
    let mut columns = dataset.columns.clone();
    columns.remove(index);
    let data = dataset
        .data
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.remove(name);
            record
        })
        .collect();
    Some(Edit::new(
        Dataset::new(dataset.name.clone(), columns, data),
        format!("Removed column \"{name}\""),
    ))
}

/// Renames a column and re-keys every record. A target name that already exists
/// is overwritten in each record that carries the source key.
pub fn rename_column(dataset: &Dataset, from: &str, to: &str) -> Option<Edit> {
    if from == to {
        return None;
    }
    let index = dataset.column_index(from)?;
    let mut columns = dataset.columns.clone();
    columns[index].name = to.to_string();
    let data = dataset
        .data
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(value) = record.remove(from) {
                record.insert(to.to_string(), value);
            }
            record
        })
        .collect();
    Some(Edit::new(
        Dataset::new(dataset.name.clone(), columns, data),
        format!("Renamed column \"{from}\" to \"{to}\""),
    ))
}

pub fn change_column_type(dataset: &Dataset, name: &str, to: ColumnType) -> Option<Edit> {
    let index = dataset.column_index(name)?;
    let data = dataset
        .data
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(value) = record.get_mut(name) {
                *value = coerce_value(value, to);
            }
            record
        })
        .collect::<Vec<_>>();
    let mut columns = dataset.columns.clone();
    columns[index].column_type = to;
    columns[index].refresh_profile(&data);
    Some(Edit::new(
        Dataset::new(dataset.name.clone(), columns, data),
        format!("Changed \"{name}\" type to {to}"),
    ))
}

/// Converts a cell to the declared type. Conversion is lossy: text that is not
/// numeric becomes null, and anything but `"true"`, `true` or `1` becomes `false`.
pub fn coerce_value(value: &Value, to: ColumnType) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    match to {
        ColumnType::Number => value.to_number().map_or(Value::Null, Value::Number),
        ColumnType::String | ColumnType::Date => Value::String(value.to_display().into_owned()),
        ColumnType::Boolean => Value::Boolean(value.is_truthy_literal()),
    }
}

/// Rebuilds the column list in `order`. Unknown names are skipped; columns the
/// order does not mention keep their relative position after the listed ones.
pub fn reorder_columns(dataset: &Dataset, order: &[String]) -> Option<Edit> {
    let listed = order
        .iter()
        .unique()
        .filter_map(|name| dataset.column(name))
        .cloned()
        .collect::<Vec<_>>();
    let remainder = dataset
        .columns
        .iter()
        .filter(|column| !listed.iter().any(|l| l.name == column.name))
        .cloned()
        .collect::<Vec<_>>();
    let columns = listed.into_iter().chain(remainder).collect();
    Some(Edit::new(
        Dataset::new(dataset.name.clone(), columns, dataset.data.clone()),
        "Reordered columns",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, Record};

    fn sample() -> Dataset {
        let data = vec![
            Record::from([
                ("a".to_string(), Value::Number(1.0)),
                ("b".to_string(), Value::from("x")),
            ]),
            Record::from([
                ("a".to_string(), Value::Number(2.0)),
                ("b".to_string(), Value::Null),
            ]),
        ];
        Dataset::new(
            "sample",
            vec![
                Column::new("a", ColumnType::Number),
                Column::new("b", ColumnType::String),
            ],
            data,
        )
    }

    #[test]
    fn remove_column_drops_descriptor_and_keys() {
        let edit = remove_column(&sample(), "b").expect("edit");
        assert_eq!(edit.dataset.column_names(), vec!["a"]);
        assert!(edit.dataset.data.iter().all(|r| !r.contains_key("b")));
        assert_eq!(edit.description, "Removed column \"b\"");
        assert!(remove_column(&sample(), "missing").is_none());
    }

    #[test]
    fn rename_to_same_name_is_noop() {
        assert!(rename_column(&sample(), "a", "a").is_none());
    }

    #[test]
    fn rename_rekeys_records() {
        let edit = rename_column(&sample(), "a", "amount").expect("edit");
        assert_eq!(edit.dataset.column_names(), vec!["amount", "b"]);
        assert_eq!(edit.dataset.data[1]["amount"], Value::Number(2.0));
        assert!(!edit.dataset.data[0].contains_key("a"));
    }

    #[test]
    fn coerce_value_covers_each_target() {
        assert_eq!(coerce_value(&Value::from("3"), ColumnType::Number), Value::Number(3.0));
        assert_eq!(coerce_value(&Value::from("abc"), ColumnType::Number), Value::Null);
        assert_eq!(coerce_value(&Value::Number(1.5), ColumnType::String), Value::from("1.5"));
        assert_eq!(coerce_value(&Value::Number(1.0), ColumnType::Boolean), Value::Boolean(true));
        assert_eq!(coerce_value(&Value::from("yes"), ColumnType::Boolean), Value::Boolean(false));
        assert_eq!(coerce_value(&Value::Boolean(true), ColumnType::Date), Value::from("true"));
        assert_eq!(coerce_value(&Value::Null, ColumnType::Boolean), Value::Null);
    }

    #[test]
    fn change_type_refreshes_profile() {
        let edit = change_column_type(&sample(), "a", ColumnType::String).expect("edit");
        let column = edit.dataset.column("a").unwrap();
        assert_eq!(column.column_type, ColumnType::String);
        assert_eq!(column.stats.as_ref().and_then(|s| s.distinct_count), Some(2));
        assert_eq!(edit.dataset.data[0]["a"], Value::from("1"));
    }

    #[test]
    fn reorder_skips_unknown_and_keeps_unlisted() {
        let order = vec!["b".to_string(), "ghost".to_string()];
        let edit = reorder_columns(&sample(), &order).expect("edit");
        assert_eq!(edit.dataset.column_names(), vec!["b", "a"]);
    }

    #[test]
    fn reorder_collapses_repeated_names() {
        let order = vec!["b".to_string(), "b".to_string(), "a".to_string()];
        let edit = reorder_columns(&sample(), &order).expect("edit");
        assert_eq!(edit.dataset.column_names(), vec!["b", "a"]);
        assert_eq!(edit.dataset.columns.len(), 2);
        assert_eq!(edit.dataset.data, sample().data);
    }
}
