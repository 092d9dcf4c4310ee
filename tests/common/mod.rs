#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use funnel_tables::{
    data::Value,
    dataset::{Column, ColumnType, Dataset, Record},
};
use tempfile::{TempDir, tempdir};

/// Builds a record from `(column, value)` pairs.
pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// A small funnel export: stage, channel, visitors.
pub fn funnel_dataset() -> Dataset {
    let rows = [
        ("Visit", "ads", 1200.0),
        ("Visit", "organic", 800.0),
        ("Signup", "ads", 300.0),
        ("Signup", "organic", 260.0),
        ("Paid", "ads", 45.0),
    ];
    let data = rows
        .iter()
        .map(|(stage, channel, visitors)| {
            record(&[
                ("stage", Value::from(*stage)),
                ("channel", Value::from(*channel)),
                ("visitors", Value::Number(*visitors)),
            ])
        })
        .collect();
    Dataset::new(
        "funnel",
        vec![
            Column::new("stage", ColumnType::String),
            Column::new("channel", ColumnType::String),
            Column::new("visitors", ColumnType::Number),
        ],
        data,
    )
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Serialises `dataset` as a JSON document under the workspace.
    pub fn write_dataset(&self, name: &str, dataset: &Dataset) -> PathBuf {
        let encoded = serde_json::to_string_pretty(dataset).expect("encode dataset");
        self.write(name, &encoded)
    }
}
