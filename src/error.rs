use thiserror::Error;

/// Failures at the edges of the editor: parsing user input and moving datasets
/// in and out of files. Edits and chart queries themselves never fail.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Unknown column type '{0}'")]
    UnknownColumnType(String),
    #[error("Unknown aggregation '{0}' (expected sum, avg, count, min or max)")]
    UnknownAggregation(String),
    #[error("Unknown sort order '{0}' (expected none, asc or desc)")]
    UnknownSortOrder(String),
    #[error("Invalid filter expression '{expression}': {message}")]
    Expression { expression: String, message: String },
    #[error("History capacity must be at least 1")]
    InvalidCapacity,
    #[error("Unsupported file extension for {0:?} (expected .json, .csv, .yml or .yaml)")]
    UnsupportedFormat(std::path::PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
