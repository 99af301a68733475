use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::Record;
use crate::config::{DATE_COLUMN, TEXT_COLUMN};

/// Problems with the shape or content of an input table.
///
/// Row numbers count data rows from 1, header excluded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("file has no header row")]
    NoHeader,
    #[error("missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: cannot parse date '{value}'")]
    UnparseableDate { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load post records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`                             – header row with `date` and `text`
/// * `.xlsx` / `.xlsm` / `.xls` / `.xlsb` / `.ods` – first worksheet, same header
/// * `.json`                            – `[{ "date": "...", "text": "..." }, ...]`
/// * `.parquet`                         – `date` (string, date or timestamp) and `text` columns
///
/// Rows with an empty or null date are skipped; any unparseable date fails
/// the whole load.
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let mut rows = RowSink::default();
    match ext.as_str() {
        "csv" => load_csv(path, &mut rows)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => load_spreadsheet(path, &mut rows)?,
        "json" => load_json(path, &mut rows)?,
        "parquet" | "pq" => load_parquet(path, &mut rows)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }

    if rows.skipped > 0 {
        log::info!("Skipped {} rows without a date", rows.skipped);
    }
    Ok(rows.records)
}

/// Collects records and counts the dateless rows that were dropped.
#[derive(Default)]
struct RowSink {
    records: Vec<Record>,
    skipped: usize,
}

impl RowSink {
    fn push(&mut self, date: Option<NaiveDate>, text: String) {
        match date {
            Some(date) => self.records.push(Record { date, text }),
            None => self.skipped += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M",
];

/// Parse a date or datetime string into its calendar date.
///
/// Time of day is dropped and offsets are kept as written, so
/// `2024-01-01T23:30:00+08:00` is `2024-01-01`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
}

/// `None` for an absent or blank cell, an error for text that is not a date.
fn optional_date(raw: Option<&str>, row: usize) -> Result<Option<NaiveDate>, LoadError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| LoadError::UnparseableDate {
                row,
                value: s.to_string(),
            }),
    }
}

fn column_index<'a>(
    headers: impl IntoIterator<Item = &'a str>,
    name: &'static str,
) -> Result<usize, LoadError> {
    headers
        .into_iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn(name))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, rows: &mut RowSink) -> Result<()> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let date_idx = column_index(headers.iter(), DATE_COLUMN)?;
    let text_idx = column_index(headers.iter(), TEXT_COLUMN)?;

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;

        let date = optional_date(record.get(date_idx), row)?;
        let text = record.get(text_idx).unwrap_or("").to_string();
        rows.push(date, text);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Reads the first worksheet; its first row is the header.
fn load_spreadsheet(path: &Path, rows: &mut RowSink) -> Result<()> {
    let mut workbook = open_workbook_auto(path).context("opening spreadsheet")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("spreadsheet has no worksheets")?
        .context("reading first worksheet")?;

    let mut sheet_rows = range.rows();
    let header: Vec<String> = sheet_rows
        .next()
        .ok_or(LoadError::NoHeader)?
        .iter()
        .map(|c| c.to_string())
        .collect();

    let date_idx = column_index(header.iter().map(String::as_str), DATE_COLUMN)?;
    let text_idx = column_index(header.iter().map(String::as_str), TEXT_COLUMN)?;

    for (i, cells) in sheet_rows.enumerate() {
        let row = i + 1;
        let date = spreadsheet_date(cells.get(date_idx), row)?;
        let text = match cells.get(text_idx) {
            None | Some(Data::Empty) => String::new(),
            Some(Data::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        rows.push(date, text);
    }

    Ok(())
}

fn spreadsheet_date(cell: Option<&Data>, row: usize) -> Result<Option<NaiveDate>, LoadError> {
    match cell {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::DateTime(dt)) => dt
            .as_datetime()
            .map(|d| Some(d.date()))
            .ok_or_else(|| LoadError::UnparseableDate {
                row,
                value: dt.as_f64().to_string(),
            }),
        Some(Data::String(s)) | Some(Data::DateTimeIso(s)) => optional_date(Some(s.as_str()), row),
        Some(other) => Err(LoadError::UnparseableDate {
            row,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, ISO date strings):
///
/// ```json
/// [
///   { "date": "2024-01-01", "text": "first post", "author": "ignored" },
///   ...
/// ]
/// ```
fn load_json(path: &Path, rows: &mut RowSink) -> Result<()> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let values = root.as_array().context("Expected top-level JSON array")?;

    for (i, value) in values.iter().enumerate() {
        let row = i + 1;
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;

        let date = match obj.get(DATE_COLUMN) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => optional_date(Some(s.as_str()), row)?,
            Some(other) => {
                return Err(LoadError::UnparseableDate {
                    row,
                    value: other.to_string(),
                }
                .into())
            }
        };
        let text = match obj.get(TEXT_COLUMN) {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        rows.push(date, text);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing posts.
///
/// Expected schema:
/// - `date`: Utf8 / LargeUtf8 strings, or any Arrow date / timestamp type
/// - `text`: anything castable to Utf8 (nulls become empty text)
/// - Any other columns are ignored
fn load_parquet(path: &Path, rows: &mut RowSink) -> Result<()> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    // checked on the file schema so an empty file with the wrong columns fails too
    let schema = builder.schema().clone();
    let date_idx = schema
        .index_of(DATE_COLUMN)
        .map_err(|_| LoadError::MissingColumn(DATE_COLUMN))?;
    let text_idx = schema
        .index_of(TEXT_COLUMN)
        .map_err(|_| LoadError::MissingColumn(TEXT_COLUMN))?;

    let reader = builder.build().context("building parquet reader")?;

    let mut first_row = 1;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let dates = parquet_dates(batch.column(date_idx).as_ref(), first_row)?;

        let texts = cast(batch.column(text_idx).as_ref(), &DataType::Utf8)
            .context("converting 'text' column to strings")?;
        let texts = texts.as_string::<i32>();

        for (i, date) in dates.into_iter().enumerate() {
            let text = if texts.is_null(i) {
                String::new()
            } else {
                texts.value(i).to_string()
            };
            rows.push(date, text);
        }
        first_row += batch.num_rows();
    }

    Ok(())
}

fn parquet_dates(col: &dyn Array, first_row: usize) -> Result<Vec<Option<NaiveDate>>> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast(col, &DataType::Utf8).context("reading 'date' strings")?;
            let strings = strings.as_string::<i32>();
            let dates = (0..strings.len())
                .map(|i| {
                    let raw = (!strings.is_null(i)).then(|| strings.value(i));
                    optional_date(raw, first_row + i)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dates)
        }
        other => {
            let days = cast(col, &DataType::Date32)
                .with_context(|| format!("'date' column of type {other:?} is not a date"))?;
            let days = days.as_primitive::<Date32Type>();
            let dates = (0..days.len())
                .map(|i| {
                    if days.is_null(i) {
                        return Ok(None);
                    }
                    days.value_as_date(i)
                        .map(Some)
                        .ok_or_else(|| LoadError::UnparseableDate {
                            row: first_row + i,
                            value: days.value(i).to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dates)
        }
    }
}
