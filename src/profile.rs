//! Informational column profiles: sample values plus min/max/mean for numeric
//! columns and a distinct count for everything else.

use std::collections::HashSet;

use crate::{
    data::Value,
    dataset::{ColumnStats, ColumnType, Record},
};

pub const SAMPLE_SIZE: usize = 5;

pub fn profile_column(
    data: &[Record],
    column: &str,
    column_type: ColumnType,
) -> (Vec<Value>, ColumnStats) {
    let samples = data
        .iter()
        .filter_map(|record| record.get(column))
        .filter(|value| !value.is_null())
        .take(SAMPLE_SIZE)
        .cloned()
        .collect();
    let stats = match column_type {
        ColumnType::Number => numeric_stats(data, column),
        _ => distinct_stats(data, column),
    };
    (samples, stats)
}

#[derive(Default)]
struct NumericSummary {
    count: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumericSummary {
    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |current| current.min(value)));
        self.max = Some(self.max.map_or(value, |current| current.max(value)));
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn numeric_stats(data: &[Record], column: &str) -> ColumnStats {
    let mut summary = NumericSummary::default();
    for value in data.iter().filter_map(|record| record.get(column)) {
        if value.is_null() {
            continue;
        }
        if let Some(number) = value.to_number().filter(|n| n.is_finite()) {
            summary.add(number);
        }
    }
    ColumnStats {
        min: summary.min,
        max: summary.max,
        mean: summary.mean(),
        distinct_count: None,
    }
}

fn distinct_stats(data: &[Record], column: &str) -> ColumnStats {
    let distinct = data
        .iter()
        .filter_map(|record| record.get(column))
        .filter(|value| !value.is_null())
        .map(|value| value.to_display().into_owned())
        .collect::<HashSet<_>>();
    ColumnStats {
        distinct_count: Some(distinct.len()),
        ..ColumnStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(column: &str, values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|value| Record::from([(column.to_string(), value)]))
            .collect()
    }

    #[test]
    fn numeric_profile_skips_nulls_and_text() {
        let data = rows(
            "v",
            vec![
                Value::Number(4.0),
                Value::Null,
                Value::from("abc"),
                Value::from("8"),
            ],
        );
        let (samples, stats) = profile_column(&data, "v", ColumnType::Number);
        assert_eq!(samples.len(), 3);
        assert_eq!(stats.min, Some(4.0));
        assert_eq!(stats.max, Some(8.0));
        assert_eq!(stats.mean, Some(6.0));
        assert_eq!(stats.distinct_count, None);
    }

    #[test]
    fn string_profile_counts_distinct_values() {
        let data = rows(
            "stage",
            vec![Value::from("a"), Value::from("b"), Value::from("a")],
        );
        let (samples, stats) = profile_column(&data, "stage", ColumnType::String);
        assert_eq!(samples, vec![Value::from("a"), Value::from("b"), Value::from("a")]);
        assert_eq!(stats.distinct_count, Some(2));
        assert_eq!(stats.mean, None);
    }

    #[test]
    fn samples_are_capped() {
        let data = rows("n", (0..20).map(|i| Value::Number(i as f64)).collect());
        let (samples, _) = profile_column(&data, "n", ColumnType::Number);
        assert_eq!(samples.len(), SAMPLE_SIZE);
    }
}
