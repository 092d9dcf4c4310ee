//! Aggregation and pagination of a dataset into chart series.
//!
//! Records are grouped by the display form of the x-axis cell, the y-axis
//! cells of each group are reduced to one number, optionally sorted by that
//! number, and finally sliced into a page. The pre-slice category count is
//! reported so callers can render page controls.
//!
//! When either axis is unset or there is no data, a fixed sample funnel is
//! returned instead of an empty series.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{data::Value, dataset::Record, error::EditError};

pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const DEFAULT_PAGE_SIZE: usize = 10;

const FALLBACK_SERIES: [(&str, f64); 5] = [
    ("Awareness", 1000.0),
    ("Interest", 750.0),
    ("Consideration", 500.0),
    ("Intent", 250.0),
    ("Purchase", 100.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl FromStr for Aggregation {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "avg" | "average" | "mean" => Ok(Aggregation::Avg),
            "count" => Ok(Aggregation::Count),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            other => Err(EditError::UnknownAggregation(other.to_string())),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::Count => "count",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(SortOrder::None),
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(EditError::UnknownSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortOrder::None => "none",
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartQuery {
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub aggregation: Aggregation,
    pub sort: SortOrder,
    pub page_start: usize,
    /// Zero disables slicing.
    pub page_size: usize,
}

impl Default for ChartQuery {
    fn default() -> Self {
        Self {
            x_axis: None,
            y_axis: None,
            aggregation: Aggregation::default(),
            sort: SortOrder::default(),
            page_start: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ChartQuery {
    pub fn new(x_axis: &str, y_axis: &str, aggregation: Aggregation) -> Self {
        Self {
            x_axis: Some(x_axis.to_string()),
            y_axis: Some(y_axis.to_string()),
            aggregation,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPage {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub total_count: usize,
    pub page_start: usize,
    pub page_size: usize,
    pub fallback: bool,
}

impl ChartPage {
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.total_count.div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        match self.page_size {
            0 => 0,
            size => self.page_start / size,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_size > 0 && self.page_start > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_size > 0 && self.page_start.saturating_add(self.page_size) < self.total_count
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

pub fn fallback_page() -> ChartPage {
    ChartPage {
        categories: FALLBACK_SERIES.iter().map(|(c, _)| c.to_string()).collect(),
        values: FALLBACK_SERIES.iter().map(|(_, v)| *v).collect(),
        total_count: FALLBACK_SERIES.len(),
        page_start: 0,
        page_size: FALLBACK_SERIES.len(),
        fallback: true,
    }
}

/// Groups, reduces, sorts and pages `data` according to `query`.
pub fn aggregate(data: &[Record], query: &ChartQuery) -> ChartPage {
    let axis = |name: &Option<String>| name.clone().filter(|n| !n.is_empty());
    let (Some(x_axis), Some(y_axis)) = (axis(&query.x_axis), axis(&query.y_axis)) else {
        return fallback_page();
    };
    if data.is_empty() {
        return fallback_page();
    }

    let mut groups = GroupAccumulator::default();
    for record in data {
        groups.ingest(record, &x_axis, &y_axis);
    }
    let mut series = groups.reduce(query.aggregation);
    match query.sort {
        SortOrder::None => {}
        SortOrder::Asc => series.sort_by(|a, b| a.1.total_cmp(&b.1)),
        SortOrder::Desc => series.sort_by(|a, b| b.1.total_cmp(&a.1)),
    }

    let total_count = series.len();
    let take = match query.page_size {
        0 => usize::MAX,
        size => size,
    };
    let (categories, values) = series
        .into_iter()
        .skip(query.page_start)
        .take(take)
        .unzip();
    ChartPage {
        categories,
        values,
        total_count,
        page_start: query.page_start,
        page_size: query.page_size,
        fallback: false,
    }
}

/// Groups in first-seen order.
#[derive(Default)]
struct GroupAccumulator {
    order: Vec<String>,
    values: HashMap<String, Vec<f64>>,
}

impl GroupAccumulator {
    fn ingest(&mut self, record: &Record, x_axis: &str, y_axis: &str) {
        let category = match record.get(x_axis) {
            None | Some(Value::Null) => UNKNOWN_CATEGORY.to_string(),
            Some(value) => value.to_display().into_owned(),
        };
        // Text and missing cells count as zero rather than being skipped.
        let value = record.get(y_axis).and_then(Value::to_number).unwrap_or(0.0);
        let bucket = self.values.entry(category.clone()).or_insert_with(|| {
            self.order.push(category);
            Vec::new()
        });
        bucket.push(value);
    }

    fn reduce(mut self, aggregation: Aggregation) -> Vec<(String, f64)> {
        self.order
            .into_iter()
            .map(|category| {
                let values = self.values.remove(&category).unwrap_or_default();
                let reduced = reduce_values(&values, aggregation);
                (category, round2(reduced))
            })
            .collect()
    }
}

fn reduce_values(values: &[f64], aggregation: Aggregation) -> f64 {
    match aggregation {
        Aggregation::Sum => values.iter().sum(),
        Aggregation::Avg => {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        Aggregation::Count => values.len() as f64,
        Aggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Rounds to 2 decimals with halves going towards positive infinity, so
/// `-0.125` becomes `-0.12` and `0.125` becomes `0.13`.
fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 100.0;
    let rounded = scaled.round();
    let rounded = if rounded - scaled == -0.5 {
        rounded + 1.0
    } else {
        rounded
    };
    rounded / 100.0
}
