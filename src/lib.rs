pub mod chart;
pub mod cli;
pub mod data;
pub mod dataset;
pub mod editor;
pub mod error;
pub mod expr;
pub mod history;
pub mod io_utils;
pub mod plan;
pub mod profile;
pub mod table;
pub mod transform;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    chart::ChartQuery,
    cli::{ChartArgs, Cli, Commands, EditArgs, InputArgs, InspectArgs},
    data::format_number,
    dataset::Dataset,
    editor::Editor,
    io_utils::ColumnTypes,
    plan::EditPlan,
    table::Align,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("funnel_tables", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Edit(args) => handle_edit(&args),
        Commands::Chart(args) => handle_chart(&args),
        Commands::Inspect(args) => handle_inspect(&args),
    }
}

fn load_source(args: &InputArgs) -> Result<Dataset> {
    let types = match &args.types {
        Some(path) => io_utils::load_column_types(path)
            .with_context(|| format!("Loading column types from {path:?}"))?,
        None => ColumnTypes::new(),
    };
    let dataset = io_utils::load_dataset(&args.input, &types)
        .with_context(|| format!("Loading dataset from {:?}", args.input))?;
    info!(
        "Loaded '{}' with {} row(s) and {} column(s)",
        dataset.name,
        dataset.rows(),
        dataset.columns.len()
    );
    Ok(dataset)
}

fn handle_edit(args: &EditArgs) -> Result<()> {
    let dataset = load_source(&args.source)?;
    let plan = EditPlan::load(&args.plan)
        .with_context(|| format!("Loading edit plan from {:?}", args.plan))?;
    let capacity = args.history_capacity.unwrap_or(plan.history_capacity);
    debug!("History capacity: {capacity}");
    let mut editor = Editor::with_capacity(capacity).context("Creating editor")?;
    editor.load(Some(dataset));

    plan.run(&mut editor)
        .with_context(|| format!("Running edit plan {:?}", args.plan))?;

    if args.history {
        print_history(&editor);
    }

    let Some(result) = editor.dataset() else {
        info!("Editor holds no dataset; nothing written");
        return Ok(());
    };
    let output = args.output.as_deref().unwrap_or(Path::new("-"));
    io_utils::save_dataset(result, output)
        .with_context(|| format!("Writing dataset to {output:?}"))?;
    if !io_utils::is_dash(output) {
        info!("Wrote {} row(s) to {output:?}", result.rows());
    }
    Ok(())
}

fn print_history(editor: &Editor) {
    let current = editor.current_history_index();
    let rows = editor
        .entries()
        .enumerate()
        .map(|(idx, entry)| {
            vec![
                if idx == current { "*" } else { "" }.to_string(),
                (idx + 1).to_string(),
                entry.description.clone(),
                entry.dataset.rows().to_string(),
                entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(
        &["", "#", "description", "rows", "timestamp"],
        &rows,
        &[Align::Left, Align::Right, Align::Left, Align::Right],
    );
    info!(
        "History {}/{} (undo: {}, redo: {})",
        current + 1,
        editor.history_length(),
        editor.can_undo(),
        editor.can_redo()
    );
}

fn handle_chart(args: &ChartArgs) -> Result<()> {
    let dataset = load_source(&args.source)?;
    let query = ChartQuery {
        x_axis: args.x_axis.clone(),
        y_axis: args.y_axis.clone(),
        aggregation: args.aggregation,
        sort: args.sort,
        page_start: args.page_start,
        page_size: args.page_size,
    };
    let page = chart::aggregate(&dataset.data, &query);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&page).context("Serialising chart page")?
        );
        return Ok(());
    }

    let rows = page
        .points()
        .map(|(category, value)| vec![category.to_string(), format_number(value)])
        .collect::<Vec<_>>();
    table::print_table(&["category", "value"], &rows, &[Align::Left, Align::Right]);
    if page.fallback {
        println!("Sample series (no data or axis selected)");
    } else if page.categories.is_empty() {
        println!("No categories on this page ({} in total)", page.total_count);
    } else {
        println!(
            "Showing {}-{} of {} categories (page {}/{}, {} by {})",
            page.page_start + 1,
            page.page_start + page.categories.len(),
            page.total_count,
            page.current_page() + 1,
            page.page_count(),
            query.aggregation,
            query.sort
        );
    }
    Ok(())
}

fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let dataset = load_source(&args.source)?.with_profiles();
    if dataset.columns.is_empty() {
        info!("Dataset '{}' does not define any columns", dataset.name);
        return Ok(());
    }
    let rows = dataset
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let samples = column
                .sample_values
                .iter()
                .map(|v| v.to_display().into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            let stats = column
                .stats
                .as_ref()
                .map(|stats| match stats.distinct_count {
                    Some(distinct) => format!("distinct={distinct}"),
                    None => format!(
                        "min={} max={} mean={}",
                        stats.min.map(format_number).unwrap_or_default(),
                        stats.max.map(format_number).unwrap_or_default(),
                        stats.mean.map(format_number).unwrap_or_default()
                    ),
                })
                .unwrap_or_default();
            vec![
                (idx + 1).to_string(),
                column.name.clone(),
                column.column_type.to_string(),
                samples,
                stats,
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&["#", "name", "type", "samples", "stats"], &rows, &[Align::Right]);
    info!(
        "Listed {} column(s) over {} row(s)",
        dataset.columns.len(),
        dataset.rows()
    );
    Ok(())
}
