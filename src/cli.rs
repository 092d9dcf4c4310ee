use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::chart::{Aggregation, DEFAULT_PAGE_SIZE, SortOrder};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Edit tabular datasets with undo/redo history and aggregate them into chart series",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay an edit plan against a dataset and write the result
    Edit(EditArgs),
    /// Aggregate a dataset into a paged chart series
    Chart(ChartArgs),
    /// List columns with their declared types and profiles
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input dataset (.json document, .csv or .tsv; '-' reads JSON from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// YAML map of column name to type (string, number, date, boolean) for CSV input
    #[arg(long = "types")]
    pub types: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Edit plan (.yml, .yaml or .json)
    #[arg(short = 'p', long = "plan")]
    pub plan: PathBuf,
    /// Output file (.json, .csv or .tsv); JSON on stdout when omitted
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Print the history timeline after the plan runs
    #[arg(long = "history")]
    pub history: bool,
    /// Override the plan's history capacity
    #[arg(long = "history-capacity")]
    pub history_capacity: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Column providing the categories
    #[arg(short = 'x', long = "x-axis")]
    pub x_axis: Option<String>,
    /// Column providing the values
    #[arg(short = 'y', long = "y-axis")]
    pub y_axis: Option<String>,
    /// Aggregation applied per category (sum, avg, count, min, max)
    #[arg(long = "agg", default_value = "sum")]
    pub aggregation: Aggregation,
    /// Sort by aggregated value (none, asc, desc)
    #[arg(long = "sort", default_value = "none")]
    pub sort: SortOrder,
    /// Offset of the first category to show
    #[arg(long = "page-start", default_value_t = 0)]
    pub page_start: usize,
    /// Categories per page (0 shows all)
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Emit the page as JSON instead of a table
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: InputArgs,
}
