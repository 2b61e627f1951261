//! Row-oriented CSV access for small reference tables.
//!
//! Census exports, the code dictionary and the key-date list are a few
//! dozen rows each and are read with the `csv` crate rather than Polars.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A small CSV table held as header list plus row maps.
#[derive(Debug, Clone)]
pub struct CsvRows {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl CsvRows {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Fails with [`IngestError::MissingColumn`] unless `column` is present.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(IngestError::MissingColumn {
                column: column.to_string(),
                path: self.path.clone(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a CSV file into a vector of row maps.
///
/// Each row is represented as a BTreeMap with column headers as keys.
/// Handles BOM characters and trims whitespace from values.
pub fn read_csv_rows(path: &Path) -> Result<CsvRows> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::csv(path, e))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let Some(key) = headers.get(idx) else {
                continue;
            };
            row.insert(key.clone(), value.trim().to_string());
        }
        rows.push(row);
    }

    Ok(CsvRows {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Get a field value from a row, returning empty string if not present.
pub fn get_field<'a>(row: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("")
}

/// Get an optional field value from a row (None if empty or missing).
pub fn get_optional(row: &BTreeMap<String, String>, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_csv_rows_trims_and_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{feff}Code,Label\n MAGER9 , Mother's age \n").unwrap();

        let table = read_csv_rows(file.path()).unwrap();
        assert_eq!(table.headers, vec!["Code", "Label"]);
        assert_eq!(table.len(), 1);
        assert_eq!(get_field(&table.rows[0], "Code"), "MAGER9");
        assert_eq!(get_field(&table.rows[0], "Label"), "Mother's age");
        assert_eq!(get_optional(&table.rows[0], "Range"), None);
    }

    #[test]
    fn test_require_column() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "event,plot_date\n").unwrap();

        let table = read_csv_rows(file.path()).unwrap();
        assert!(table.require_column("event").is_ok());
        assert!(matches!(
            table.require_column("plot"),
            Err(IngestError::MissingColumn { .. })
        ));
    }
}
