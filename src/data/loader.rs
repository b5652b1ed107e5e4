use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::columns::ColumnMapping;
use super::model::{Dataset, LaunchRecord, Outcome};
use crate::error::DataLoadError;

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a launch dataset using the default column mapping.
pub fn load(path: &Path) -> Result<Dataset> {
    load_file(path, &ColumnMapping::default())
}

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names (the usual export)
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – flat table, any numeric, boolean or string physical types
///
/// The outcome column takes `0`/`1` (integral floats included) or a boolean.
///
/// Columns not named in `mapping` are ignored.
pub fn load_file(path: &Path, mapping: &ColumnMapping) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path, mapping),
        "json" => load_json(path, mapping),
        "parquet" | "pq" => load_parquet(path, mapping),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} launch records from {} (sites: {:?})",
        dataset.len(),
        path.display(),
        dataset.site_names()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell decoding shared by every format
// ---------------------------------------------------------------------------

/// One raw cell, before it is interpreted for its column.
#[derive(Debug)]
enum Cell<'a> {
    Missing,
    Text(Cow<'a, str>),
    Number(f64),
}

impl Cell<'_> {
    fn raw(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(s) => s.to_string(),
            Cell::Number(n) => n.to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

fn invalid(row: usize, column: &str, cell: &Cell<'_>, reason: &'static str) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: cell.raw(),
        reason,
    }
}

fn text_field(row: usize, column: &str, cell: &Cell<'_>) -> Result<String> {
    if cell.is_blank() {
        return Err(invalid(row, column, cell, "missing value"));
    }
    Ok(match cell {
        Cell::Text(s) => s.trim().to_string(),
        other => other.raw(),
    })
}

fn number_field(row: usize, column: &str, cell: &Cell<'_>) -> Result<f64> {
    match cell {
        Cell::Number(n) => Ok(*n),
        Cell::Text(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(row, column, cell, "not a number")),
        _ => Err(invalid(row, column, cell, "missing value")),
    }
}

fn payload_field(row: usize, column: &str, cell: &Cell<'_>) -> Result<f64> {
    let v = number_field(row, column, cell)?;
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(row, column, cell, "payload mass must be a non-negative number"));
    }
    Ok(v)
}

fn outcome_field(row: usize, column: &str, cell: &Cell<'_>) -> Result<Outcome> {
    // Boolean columns (Parquet, JSON) arrive as "true"/"false".
    if let Cell::Text(s) = cell {
        match s.trim() {
            t if t.eq_ignore_ascii_case("true") => return Ok(Outcome::Success),
            t if t.eq_ignore_ascii_case("false") => return Ok(Outcome::Failure),
            _ => {}
        }
    }
    let v = number_field(row, column, cell)?;
    if v.fract() != 0.0 {
        return Err(invalid(row, column, cell, "outcome must be 0 or 1"));
    }
    Outcome::from_class(v as i64).ok_or_else(|| invalid(row, column, cell, "outcome must be 0 or 1"))
}

fn flight_field(row: usize, column: &str, cell: &Cell<'_>) -> Result<Option<u32>> {
    if cell.is_blank() {
        return Ok(None);
    }
    let v = number_field(row, column, cell)?;
    if v.fract() != 0.0 || v < 0.0 || v > u32::MAX as f64 {
        return Err(invalid(row, column, cell, "flight number must be a non-negative integer"));
    }
    Ok(Some(v as u32))
}

/// Build one record by looking every mapped column up through `cell`.
fn build_record<'a>(
    row: usize,
    mapping: &ColumnMapping,
    cell: impl Fn(&str) -> Cell<'a>,
) -> Result<LaunchRecord> {
    let flight_number = match &mapping.flight_number {
        Some(col) => flight_field(row, col, &cell(col))?,
        None => None,
    };
    Ok(LaunchRecord {
        site: text_field(row, &mapping.site, &cell(&mapping.site))?,
        payload_mass_kg: payload_field(
            row,
            &mapping.payload_mass_kg,
            &cell(&mapping.payload_mass_kg),
        )?,
        outcome: outcome_field(row, &mapping.outcome, &cell(&mapping.outcome))?,
        booster_category: text_field(
            row,
            &mapping.booster_category,
            &cell(&mapping.booster_category),
        )?,
        flight_number,
    })
}

/// Fail on the first required column absent from `present`.
fn check_required(
    mapping: &ColumnMapping,
    present: impl Fn(&str) -> bool,
) -> Result<()> {
    match mapping.required().into_iter().find(|col| !present(*col)) {
        Some(missing) => Err(DataLoadError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Leading/trailing whitespace around cells is ignored.
fn load_csv(path: &Path, mapping: &ColumnMapping) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    check_required(mapping, |col| headers.contains_key(col))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let rec = build_record(row_no, mapping, |col| {
            match headers.get(col).and_then(|&i| row.get(i)) {
                Some(s) => Cell::Text(Cow::Owned(s.to_string())),
                None => Cell::Missing,
            }
        })?;
        records.push(rec);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Flight Number": 1, "Launch Site": "CCAFS LC-40", "class": 0,
///     "Payload Mass (kg)": 0.0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
///
/// A required key must appear in at least one record; a record lacking a
/// required key that others have is an invalid value. An empty array is an
/// empty table, the same as a header-only CSV.
fn load_json(path: &Path, mapping: &ColumnMapping) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let rows = root.as_array().ok_or(DataLoadError::JsonLayout)?;
    if rows.is_empty() {
        return Ok(Dataset::from_records(Vec::new()));
    }

    let mut keys: BTreeSet<&str> = BTreeSet::new();
    let mut objects = Vec::with_capacity(rows.len());
    for row in rows {
        let obj = row.as_object().ok_or(DataLoadError::JsonLayout)?;
        keys.extend(obj.keys().map(String::as_str));
        objects.push(obj);
    }
    check_required(mapping, |col| keys.contains(col))?;

    let records = objects
        .into_iter()
        .enumerate()
        .map(|(i, obj)| {
            build_record(i, mapping, |col| match obj.get(col) {
                None | Some(JsonValue::Null) => Cell::Missing,
                Some(JsonValue::String(s)) => Cell::Text(Cow::Borrowed(s.as_str())),
                Some(JsonValue::Number(n)) => match n.as_f64() {
                    Some(v) => Cell::Number(v),
                    None => Cell::Text(Cow::Owned(n.to_string())),
                },
                Some(other) => Cell::Text(Cow::Owned(other.to_string())),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Every mapped column is cast to text once per
/// record batch and decoded like a CSV cell, so integer, float and string
/// physical types are all accepted. Nulls count as missing values.
fn load_parquet(path: &Path, mapping: &ColumnMapping) -> Result<Dataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let schema = builder.schema().clone();

    check_required(mapping, |col| schema.index_of(col).is_ok())?;

    let mut wanted: Vec<&str> = mapping.required().to_vec();
    if let Some(col) = &mapping.flight_number {
        if schema.index_of(col).is_ok() {
            wanted.push(col.as_str());
        }
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch in reader {
        let batch = batch?;
        let mut text_columns: HashMap<&str, ArrayRef> = HashMap::new();
        for col in &wanted {
            let idx = batch.schema().index_of(col)?;
            let as_text: ArrayRef = cast(batch.column(idx), &DataType::Utf8)?;
            text_columns.insert(*col, as_text);
        }

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let rec = build_record(offset + row, mapping, |col| {
                text_cell(text_columns.get(col), row)
            })?;
            records.push(rec);
        }
    }

    Ok(Dataset::from_records(records))
}

fn text_cell(column: Option<&Arc<dyn Array>>, row: usize) -> Cell<'static> {
    match column {
        Some(col) if !col.is_null(row) => {
            Cell::Text(Cow::Owned(col.as_string::<i32>().value(row).to_string()))
        }
        _ => Cell::Missing,
    }
}
