use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{FieldValue, Record};
use super::resolver::DataFormat;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an already-resolved data file into records.  Dispatch by format.
///
/// Every branch applies the same output invariant: a row appears in the
/// result only if at least one of its values is non-blank after trimming.
pub fn load(path: &Path, format: DataFormat) -> Result<Vec<Record>, DataError> {
    match format {
        DataFormat::Csv => load_csv(path),
        DataFormat::Json => load_json(path),
        DataFormat::Xlsx => load_xlsx(path),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: UTF-8, comma-delimited, header row first.  Lines whose
/// leading-whitespace-stripped form begins with `#` are comments and are
/// removed before the parser sees them, so a leading comment block never
/// shifts header detection.
///
/// Cells load as text; an empty cell becomes `Null`.  Ragged rows are
/// tolerated: missing trailing cells become `Null`, extra cells beyond the
/// header count are dropped.
fn load_csv(path: &Path) -> Result<Vec<Record>, DataError> {
    let raw = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let content = strip_comment_lines(&raw);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::malformed(path, "invalid CSV header row", e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| DataError::malformed(path, format!("CSV row {row_no}"), e))?;

        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = match row.get(i) {
                    Some("") | None => FieldValue::Null,
                    Some(cell) => FieldValue::String(cell.to_string()),
                };
                (header.clone(), value)
            })
            .collect();

        if !record.is_blank() {
            records.push(record);
        }
    }
    Ok(records)
}

fn strip_comment_lines(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Accepted shapes, in resolution order:
///
/// ```json
/// { "login_test_data": [ {...}, {...} ] }
/// ```
/// (a `"<module>_test_data"` key), then a key equal to the file stem, then
/// a bare top-level array `[ {...}, {...} ]`.
///
/// Both key conventions exist in the wild, so the lookup order must stay
/// exactly as above.  When nothing matches, the result is an empty
/// sequence, logged at warn level so a malformed file is distinguishable
/// from an intentionally empty one in the run log.
fn load_json(path: &Path) -> Result<Vec<Record>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| DataError::malformed(path, "invalid JSON", e))?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let module = stem.strip_suffix("_test_data").unwrap_or(stem);
    let module_key = format!("{module}_test_data");

    let rows: &[JsonValue] = if let Some(rows) = root.get(&module_key).and_then(JsonValue::as_array)
    {
        rows
    } else if let Some(rows) = root.get(stem).and_then(JsonValue::as_array) {
        rows
    } else if let Some(rows) = root.as_array() {
        rows
    } else {
        log::warn!(
            "{}: no '{module_key}' or '{stem}' array and top level is not an array; \
             treating as zero test cases",
            path.display()
        );
        return Ok(Vec::new());
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| DataError::malformed_at(path, format!("row {i} is not a JSON object")))?;

        let record: Record = obj
            .iter()
            .map(|(field, value)| (field.clone(), field_from_json(value)))
            .collect();

        if !record.is_blank() {
            records.push(record);
        }
    }
    Ok(records)
}

fn field_from_json(value: &JsonValue) -> FieldValue {
    match value {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

/// First sheet in declared order, header in row 1, data from row 2 onward.
/// The workbook handle is scoped to this call and released on every exit
/// path, including errors.
#[cfg(feature = "xlsx")]
fn load_xlsx(path: &Path) -> Result<Vec<Record>, DataError> {
    let mut workbook = super::xlsx::Workbook::open(path)?;
    let Some(sheet) = workbook.sheet_names().into_iter().next() else {
        return Ok(Vec::new());
    };
    workbook.sheet_records(&sheet)
}

#[cfg(not(feature = "xlsx"))]
fn load_xlsx(path: &Path) -> Result<Vec<Record>, DataError> {
    let _ = path;
    Err(DataError::DependencyMissing {
        format: DataFormat::Xlsx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_stripped_wherever_they_appear() {
        let raw = "# header comment\nusername,password\n  # indented comment\na,b\n";
        assert_eq!(strip_comment_lines(raw), "username,password\na,b");
    }

    #[test]
    fn json_numbers_keep_integer_identity() {
        assert_eq!(field_from_json(&serde_json::json!(42)), FieldValue::Integer(42));
        assert_eq!(field_from_json(&serde_json::json!(1.5)), FieldValue::Float(1.5));
        assert_eq!(field_from_json(&serde_json::json!(null)), FieldValue::Null);
    }
}
