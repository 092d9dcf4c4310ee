//! Row edits. Indices are positions in the dataset's current `data` order,
//! not stable record identities.

use std::collections::{BTreeSet, HashSet};

use crate::{
    data::canonical_key,
    dataset::{Dataset, Record},
    transform::Edit,
};

pub fn remove_row(dataset: &Dataset, index: usize) -> Option<Edit> {
    if index >= dataset.rows() {
        return None;
    }
    let mut data = dataset.data.clone();
    data.remove(index);
    Some(Edit::new(
        dataset.with_data(data),
        format!("Removed row {}", index + 1),
    ))
}

pub fn remove_rows(dataset: &Dataset, indices: &[usize]) -> Option<Edit> {
    let targets = indices
        .iter()
        .copied()
        .filter(|idx| *idx < dataset.rows())
        .collect::<BTreeSet<_>>();
    if targets.is_empty() {
        return None;
    }
    let data = dataset
        .data
        .iter()
        .enumerate()
        .filter(|(idx, _)| !targets.contains(idx))
        .map(|(_, record)| record.clone())
        .collect();
    Some(Edit::new(
        dataset.with_data(data),
        format!("Removed {} rows", targets.len()),
    ))
}

/// Keeps the first record of each distinct key over `columns` (all columns when
/// `None` or empty), preserving the original order of the survivors.
pub fn remove_duplicates(dataset: &Dataset, columns: Option<&[String]>) -> Option<Edit> {
    let key_columns = match columns {
        Some(names) if !names.is_empty() => names.to_vec(),
        _ => dataset.columns.iter().map(|c| c.name.clone()).collect(),
    };
    let mut seen = HashSet::with_capacity(dataset.rows());
    let data = dataset
        .data
        .iter()
        .filter(|record| {
            let values = key_columns
                .iter()
                .map(|name| record.get(name))
                .collect::<Vec<_>>();
            seen.insert(canonical_key(&values))
        })
        .cloned()
        .collect::<Vec<_>>();
    let removed = dataset.rows() - data.len();
    Some(Edit::new(
        dataset.with_data(data),
        format!("Removed {removed} duplicate rows"),
    ))
}

/// Keeps the records for which `predicate` holds.
pub fn filter_rows<F>(dataset: &Dataset, predicate: F, description: &str) -> Option<Edit>
where
    F: Fn(&Record) -> bool,
{
    let data = dataset
        .data
        .iter()
        .filter(|record| predicate(record))
        .cloned()
        .collect();
    Some(Edit::new(dataset.with_data(data), description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::Value,
        dataset::{Column, ColumnType},
    };

    fn dataset(rows: Vec<(f64, &str)>) -> Dataset {
        let data = rows
            .into_iter()
            .map(|(a, b)| {
                Record::from([
                    ("a".to_string(), Value::Number(a)),
                    ("b".to_string(), Value::from(b)),
                ])
            })
            .collect();
        Dataset::new(
            "rows",
            vec![
                Column::new("a", ColumnType::Number),
                Column::new("b", ColumnType::String),
            ],
            data,
        )
    }

    #[test]
    fn remove_row_uses_current_position() {
        let source = dataset(vec![(1.0, "x"), (2.0, "y"), (3.0, "z")]);
        let edit = remove_row(&source, 1).expect("edit");
        assert_eq!(edit.dataset.rows(), 2);
        assert_eq!(edit.dataset.data[1]["a"], Value::Number(3.0));
        assert_eq!(edit.description, "Removed row 2");
        assert!(remove_row(&source, 3).is_none());
    }

    #[test]
    fn remove_rows_ignores_repeats_and_out_of_range() {
        let source = dataset(vec![(1.0, "x"), (2.0, "y"), (3.0, "z")]);
        let edit = remove_rows(&source, &[2, 0, 2, 9]).expect("edit");
        assert_eq!(edit.dataset.rows(), 1);
        assert_eq!(edit.dataset.data[0]["a"], Value::Number(2.0));
        assert_eq!(edit.description, "Removed 2 rows");
        assert!(remove_rows(&source, &[7]).is_none());
    }

    #[test]
    fn duplicates_keyed_on_subset_keep_first() {
        let source = dataset(vec![(1.0, "x"), (1.0, "y"), (1.0, "x")]);
        let edit = remove_duplicates(&source, Some(&["a".to_string()])).expect("edit");
        assert_eq!(edit.dataset.rows(), 1);
        assert_eq!(edit.dataset.data[0]["b"], Value::from("x"));
        assert_eq!(edit.description, "Removed 2 duplicate rows");
    }

    #[test]
    fn duplicates_default_to_all_columns() {
        let source = dataset(vec![(1.0, "x"), (1.0, "y"), (1.0, "x")]);
        let edit = remove_duplicates(&source, None).expect("edit");
        assert_eq!(edit.dataset.rows(), 2);
        assert_eq!(edit.dataset.data[1]["b"], Value::from("y"));
    }

    #[test]
    fn filter_keeps_matching_records() {
        let source = dataset(vec![(1.0, "x"), (5.0, "y"), (9.0, "z")]);
        let edit = filter_rows(
            &source,
            |record| record.get("a").and_then(Value::to_number).unwrap_or(0.0) > 2.0,
            "Only large",
        )
        .expect("edit");
        assert_eq!(edit.dataset.rows(), 2);
        assert_eq!(edit.description, "Only large");
    }
}
