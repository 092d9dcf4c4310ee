//! Moving datasets in and out of files.
//!
//! - **JSON**: the dataset document as serialised by [`Dataset`]. `-` reads
//!   stdin / writes stdout.
//! - **CSV/TSV**: the header row names the columns; declared types come from an
//!   optional YAML map of `column: type` and default to `string`. Cells are
//!   converted with the same coercions as a column type change and empty cells
//!   become null. No type inference happens here.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::debug;

use crate::{
    data::Value,
    dataset::{Column, ColumnType, Dataset, Record},
    error::EditError,
    transform::columns::coerce_value,
};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub type ColumnTypes = BTreeMap<String, ColumnType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Delimited(u8),
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_format(path: &Path) -> Result<DataFormat, EditError> {
    if is_dash(path) {
        return Ok(DataFormat::Json);
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DataFormat::Json),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {
            Ok(DataFormat::Delimited(DEFAULT_CSV_DELIMITER))
        }
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => {
            Ok(DataFormat::Delimited(DEFAULT_TSV_DELIMITER))
        }
        _ => Err(EditError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, EditError> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn open_output(path: &Path) -> Result<Box<dyn Write>, EditError> {
    if is_dash(path) {
        Ok(Box::new(BufWriter::new(io::stdout().lock())))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

pub fn load_column_types(path: &Path) -> Result<ColumnTypes, EditError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_yaml::from_reader(reader)?)
}

pub fn load_dataset(path: &Path, types: &ColumnTypes) -> Result<Dataset, EditError> {
    let dataset = match resolve_format(path)? {
        DataFormat::Json => read_json(open_input(path)?)?,
        DataFormat::Delimited(delimiter) => {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("dataset");
            read_delimited(open_input(path)?, name, delimiter, types)?
        }
    };
    debug!(
        "Read {} row(s) across {} column(s) from {path:?}",
        dataset.rows(),
        dataset.columns.len()
    );
    Ok(dataset)
}

pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<(), EditError> {
    let mut writer = open_output(path)?;
    match resolve_format(path)? {
        DataFormat::Json => write_json(dataset, &mut writer)?,
        DataFormat::Delimited(delimiter) => write_delimited(dataset, &mut writer, delimiter)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn read_json<R: Read>(reader: R) -> Result<Dataset, EditError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_json<W: Write>(dataset: &Dataset, mut writer: W) -> Result<(), EditError> {
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writeln!(writer)?;
    Ok(())
}

pub fn read_delimited<R: Read>(
    reader: R,
    name: &str,
    delimiter: u8,
    types: &ColumnTypes,
) -> Result<Dataset, EditError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = headers
        .iter()
        .map(|header| {
            let column_type = types.get(header).copied().unwrap_or_default();
            Column::new(header, column_type)
        })
        .collect::<Vec<_>>();

    let mut data = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let cell = record.get(idx).unwrap_or("");
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    coerce_value(&Value::from(cell), column.column_type)
                };
                (column.name.clone(), value)
            })
            .collect::<Record>();
        data.push(row);
    }
    Ok(Dataset::new(name, columns, data).with_profiles())
}

pub fn write_delimited<W: Write>(
    dataset: &Dataset,
    writer: W,
    delimiter: u8,
) -> Result<(), EditError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    writer.write_record(dataset.columns.iter().map(|c| c.name.as_str()))?;
    for record in &dataset.data {
        writer.write_record(dataset.columns.iter().map(|column| {
            match record.get(&column.name) {
                None | Some(Value::Null) => String::new(),
                Some(value) => value.to_display().into_owned(),
            }
        }))?;
    }
    writer.flush()?;
    Ok(())
}
