//! Decoding of CSV and JSON bodies into raw rows.

use std::collections::BTreeMap;

use evictwatch_core::FilingSet;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::LoadError;
use crate::cast::{Row, cast_rows};
use crate::dataset::{DatasetSpec, Format};

/// Parse a full dataset body and cast it to filings.
pub fn parse_dataset(
    bytes: &[u8],
    format: Format,
    dataset: &DatasetSpec,
) -> Result<FilingSet, LoadError> {
    let rows = match format {
        Format::Csv => parse_csv(bytes)?,
        Format::Json => parse_json(bytes)?,
    };
    info!(rows = rows.len(), %format, "parsed dataset body");
    check_columns(&rows, dataset);
    cast_rows(&rows)
}

/// CSV with a header row. Empty cells become `null`.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Row>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (name.to_string(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// JSON in either "records" orientation (`[{col: v, ...}, ...]`) or "columns"
/// orientation (`{col: {row_index: v, ...}, ...}`).
pub fn parse_json(bytes: &[u8]) -> Result<Vec<Row>, LoadError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(LoadError::Shape(format!(
                    "record {i} is not an object: {other}"
                ))),
            })
            .collect(),
        Value::Object(columns) => columns_to_rows(columns),
        other => Err(LoadError::Shape(format!(
            "expected an array of records or an object of columns, got {}",
            json_kind(&other)
        ))),
    }
}

fn columns_to_rows(columns: Map<String, Value>) -> Result<Vec<Row>, LoadError> {
    let mut rows: BTreeMap<u64, Row> = BTreeMap::new();
    for (column, cells) in columns {
        let Value::Object(cells) = cells else {
            return Err(LoadError::Shape(format!(
                "column {column:?} is not an object of row index to value"
            )));
        };
        for (index, value) in cells {
            let index: u64 = index.parse().map_err(|_| {
                LoadError::Shape(format!("column {column:?} has non-numeric row index {index:?}"))
            })?;
            rows.entry(index).or_default().insert(column.clone(), value);
        }
    }
    Ok(rows.into_values().collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Log declared columns that never appear and columns nobody declared.
fn check_columns(rows: &[Row], dataset: &DatasetSpec) {
    let Some(first) = rows.first() else {
        return;
    };
    for (name, _) in dataset.columns {
        if !rows.iter().any(|r| r.contains_key(*name)) {
            warn!(dataset = dataset.name, column = *name, "declared column missing from source");
        }
    }
    for name in first.keys() {
        if !dataset.columns.iter().any(|(declared, _)| *declared == name.as_str()) {
            debug!(dataset = dataset.name, column = %name, "ignoring undeclared column");
        }
    }
}
