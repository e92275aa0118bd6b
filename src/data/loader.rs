use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{
    Dinosaur, FIELD_ID, FIELD_INFO, FIELD_LENGTH, FIELD_MYA, FIELD_NAME, FIELD_PERIOD,
    FIELD_PRONUNCIATION, FieldValue, Mya, REQUIRED_FIELDS,
};

/// The sample collection shipped with the crate.
const BUNDLED_JSON: &str = include_str!("../../data/dinosaurs.json");

/// A problem with a single field of a single record.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field '{field}': '{token}' is not a number")]
    BadNumber { field: &'static str, token: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dinosaur collection from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "dinosaurId": "...", "mya": [156, 144], ... }, ...]`
/// * `.csv`  – one record per row, `mya` as semicolon-separated numbers
pub fn load_file(path: &Path) -> Result<Vec<Dinosaur>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dinosaurs = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON file {}", path.display()))?;
            parse_json(&text)?
        }
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::info!("loaded {} dinosaurs from {}", dinosaurs.len(), path.display());
    Ok(dinosaurs)
}

/// The sample collection compiled into the crate.
pub fn bundled() -> Result<Vec<Dinosaur>> {
    parse_json(BUNDLED_JSON).context("parsing bundled dinosaur data")
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array. Fields other than the required ones
/// are kept in [`Dinosaur::extra`].
pub fn parse_json(text: &str) -> Result<Vec<Dinosaur>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut dinosaurs = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let dino = json_to_dinosaur(obj).with_context(|| format!("Row {i}"))?;
        dinosaurs.push(dino);
    }

    warn_duplicate_ids(&dinosaurs);
    Ok(dinosaurs)
}

fn json_to_dinosaur(obj: &Map<String, JsonValue>) -> Result<Dinosaur, RecordError> {
    let mut extra = BTreeMap::new();
    for (key, val) in obj {
        if REQUIRED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        extra.insert(key.clone(), json_to_field(val));
    }

    Ok(Dinosaur {
        dinosaur_id: json_string(obj, FIELD_ID)?,
        name: json_string(obj, FIELD_NAME)?,
        pronunciation: json_string(obj, FIELD_PRONUNCIATION)?,
        info: json_string(obj, FIELD_INFO)?,
        period: json_string(obj, FIELD_PERIOD)?,
        mya: json_mya(obj)?,
        length_in_meters: json_number(obj, FIELD_LENGTH)?,
        extra,
    })
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    field: &'static str,
) -> Result<&'a JsonValue, RecordError> {
    obj.get(field).ok_or(RecordError::MissingField(field))
}

fn json_string(obj: &Map<String, JsonValue>, field: &'static str) -> Result<String, RecordError> {
    json_field(obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(RecordError::WrongType {
            field,
            expected: "a string",
        })
}

fn json_number(obj: &Map<String, JsonValue>, field: &'static str) -> Result<f64, RecordError> {
    json_field(obj, field)?.as_f64().ok_or(RecordError::WrongType {
        field,
        expected: "a number",
    })
}

fn json_mya(obj: &Map<String, JsonValue>) -> Result<Mya, RecordError> {
    let wrong_type = || RecordError::WrongType {
        field: FIELD_MYA,
        expected: "an array of numbers",
    };
    let arr = json_field(obj, FIELD_MYA)?
        .as_array()
        .ok_or_else(wrong_type)?;

    arr.iter()
        .map(|v| v.as_f64().ok_or_else(wrong_type))
        .collect::<Result<Vec<f64>, _>>()
        .map(Mya::from)
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Array(items) => FieldValue::List(items.iter().map(json_to_field).collect()),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names.
/// The `mya` column contains semicolon-separated numbers: `"156;144"`.
/// Columns other than the required ones are kept as extra fields.
fn load_csv(path: &Path) -> Result<Vec<Dinosaur>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    parse_csv(reader)
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Dinosaur>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for field in REQUIRED_FIELDS {
        if !headers.iter().any(|h| h == field) {
            bail!("CSV missing '{field}' column");
        }
    }

    let mut dinosaurs = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut cells: BTreeMap<&str, &str> = BTreeMap::new();
        let mut extra = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                continue;
            };
            if REQUIRED_FIELDS.contains(&col_name.as_str()) {
                cells.insert(col_name.as_str(), value);
            } else {
                extra.insert(col_name.clone(), guess_field_type(value));
            }
        }

        let dino = csv_to_dinosaur(&cells, extra).with_context(|| format!("CSV row {row_no}"))?;
        dinosaurs.push(dino);
    }

    warn_duplicate_ids(&dinosaurs);
    Ok(dinosaurs)
}

fn csv_to_dinosaur(
    cells: &BTreeMap<&str, &str>,
    extra: BTreeMap<String, FieldValue>,
) -> Result<Dinosaur, RecordError> {
    let text = |field: &'static str| -> Result<String, RecordError> {
        cells
            .get(field)
            .map(|s| s.to_string())
            .ok_or(RecordError::MissingField(field))
    };

    Ok(Dinosaur {
        dinosaur_id: text(FIELD_ID)?,
        name: text(FIELD_NAME)?,
        pronunciation: text(FIELD_PRONUNCIATION)?,
        info: text(FIELD_INFO)?,
        period: text(FIELD_PERIOD)?,
        mya: parse_semicolon_numbers(&text(FIELD_MYA)?, FIELD_MYA).map(Mya::from)?,
        length_in_meters: parse_number(&text(FIELD_LENGTH)?, FIELD_LENGTH)?,
        extra,
    })
}

fn parse_number(tok: &str, field: &'static str) -> Result<f64, RecordError> {
    tok.trim().parse::<f64>().map_err(|_| RecordError::BadNumber {
        field,
        token: tok.to_string(),
    })
}

fn parse_semicolon_numbers(s: &str, field: &'static str) -> Result<Vec<f64>, RecordError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(';').map(|tok| parse_number(tok, field)).collect()
}

fn guess_field_type(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    FieldValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Identifiers should be unique; duplicates are reported but kept.
fn warn_duplicate_ids(dinosaurs: &[Dinosaur]) {
    let mut seen = HashSet::new();
    for dino in dinosaurs {
        if !seen.insert(dino.dinosaur_id.as_str()) {
            log::warn!("duplicate dinosaurId '{}'", dino.dinosaur_id);
        }
    }
}
