use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};

use super::model::{FieldValue, Record};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Workbook – scoped access to one .xlsx file
// ---------------------------------------------------------------------------

/// An open `.xlsx` workbook.
///
/// The underlying file handle lives exactly as long as this value, so it is
/// released on every exit path of the caller, success or error.
pub struct Workbook {
    book: Xlsx<BufReader<File>>,
    path: PathBuf,
}

impl Workbook {
    pub fn open(path: &Path) -> Result<Self, DataError> {
        let book: Xlsx<_> = match open_workbook(path) {
            Ok(book) => book,
            Err(XlsxError::Io(e)) => return Err(DataError::io(path, e)),
            Err(e) => return Err(DataError::malformed(path, "failed to open workbook", e)),
        };
        log::info!("opened workbook {}", path.display());
        Ok(Workbook {
            book,
            path: path.to_path_buf(),
        })
    }

    /// Sheet names in declared order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.book.sheet_names().to_vec()
    }

    /// Read one sheet into records.
    ///
    /// Row 1 is the header row; if all of its cells are empty the sheet
    /// yields no records.  Each later row is skipped when every cell is
    /// empty, otherwise it is zipped against the headers: a present but
    /// empty cell becomes `Null`, a physically missing trailing cell drops
    /// its header/value pair, and extra cells beyond the header count are
    /// dropped.  Columns under a blank header cell are ignored.
    pub fn sheet_records(&mut self, sheet: &str) -> Result<Vec<Record>, DataError> {
        let range = self.worksheet_range(sheet)?;
        let mut rows = range.rows();

        let Some(header_row) = rows.next() else {
            return Ok(Vec::new());
        };
        let headers: Vec<String> = header_row.iter().map(cell_text).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for row in rows {
            if row.iter().all(cell_is_blank) {
                continue;
            }
            let record: Record = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .filter_map(|(i, header)| {
                    row.get(i).map(|cell| (header.clone(), cell_value(cell)))
                })
                .collect();
            if !record.is_blank() {
                records.push(record);
            }
        }

        log::debug!(
            "read {} records from sheet '{sheet}' of {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Value of a single cell, addressed 1-based like the surrounding
    /// spreadsheet tooling.  Out-of-range coordinates read as `Null`.
    pub fn cell(&mut self, sheet: &str, row: u32, col: u32) -> Result<FieldValue, DataError> {
        let range = self.worksheet_range(sheet)?;
        let value = match (row.checked_sub(1), col.checked_sub(1)) {
            (Some(r), Some(c)) => range.get_value((r, c)).map(cell_value),
            _ => None,
        };
        Ok(value.unwrap_or(FieldValue::Null))
    }

    fn worksheet_range(&mut self, sheet: &str) -> Result<calamine::Range<Data>, DataError> {
        self.book.worksheet_range(sheet).map_err(|e| {
            DataError::malformed(&self.path, format!("failed to read sheet '{sheet}'"), e)
        })
    }
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::Null,
        Data::String(s) => FieldValue::String(s.clone()),
        Data::Int(i) => FieldValue::Integer(*i),
        // Spreadsheets store every number as a float; surface whole values
        // as integers the way cell editors display them.
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
                FieldValue::Integer(*f as i64)
            } else {
                FieldValue::Float(*f)
            }
        }
        Data::Bool(b) => FieldValue::Bool(*b),
        other => FieldValue::String(other.to_string()),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
