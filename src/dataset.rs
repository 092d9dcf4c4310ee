//! The tabular value under edit.
//!
//! A [`Dataset`] is an ordered list of [`Column`] descriptors plus the row
//! [`Record`]s. Datasets are plain values: every transformation clones and
//! returns a new one, so a snapshot held by the history log or a renderer is
//! never changed underneath it. The row count is derived from `data` and is
//! emitted as `rows` when serialised; any incoming `rows` field is ignored.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::{data::Value, error::EditError, profile};

/// One row, keyed by column name. A missing key is an undefined cell.
pub type Record = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(ColumnType::String),
            "number" | "numeric" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            other => Err(EditError::UnknownColumnType(other.to_string())),
        }
    }
}

/// Informational summary of a column. Never consulted by edits or charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub sample_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ColumnStats>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            sample_values: Vec::new(),
            stats: None,
        }
    }

    pub(crate) fn refresh_profile(&mut self, data: &[Record]) {
        let (samples, stats) = profile::profile_column(data, &self.name, self.column_type);
        self.sample_values = samples;
        self.stats = Some(stats);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub data: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, columns: Vec<Column>, data: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            columns,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// A dataset with neither columns nor rows carries nothing to edit.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.data.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Same name and columns, replacement rows.
    pub fn with_data(&self, data: Vec<Record>) -> Self {
        Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            data,
        }
    }

    /// Recomputes sample values and stats for every column.
    pub fn with_profiles(mut self) -> Self {
        for column in &mut self.columns {
            column.refresh_profile(&self.data);
        }
        self
    }
}

impl Serialize for Dataset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Dataset", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("rows", &self.rows())?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}
