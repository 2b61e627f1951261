//! CSV file reading into string-typed frames.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, parse_csv_line};

/// Reads the first line of a file, stripping a UTF-8 BOM.
fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let reader = BufReader::new(file);

    match reader.lines().next() {
        Some(line) => {
            let line = line.map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(
                line.strip_prefix('\u{feff}').unwrap_or(&line).to_string(),
            ))
        }
        None => Ok(None),
    }
}

/// Reads only the header line of a CSV file.
///
/// Used to validate yearly schemas before any data is loaded.
pub fn read_csv_schema(path: &Path) -> Result<CsvHeaders> {
    let line = read_first_line(path)?.ok_or_else(|| IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })?;

    let columns = parse_csv_line(&line);
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(CsvHeaders::new(columns))
}

/// Reads a CSV file into a Polars DataFrame with every column typed as text.
///
/// Natality exports mix numeric codes, flags and placeholders in the same
/// column, so no schema inference is attempted here.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::csv(path, e))?
        .finish()
        .map_err(|e| IngestError::csv(path, e))?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded CSV table"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_schema() {
        let file = create_temp_csv("dob_yy,DOB_MM,dplural\n2019,7,1\n");
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(headers.columns, vec!["dob_yy", "DOB_MM", "dplural"]);
    }

    #[test]
    fn test_read_csv_schema_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_schema(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_schema_with_bom() {
        let file = create_temp_csv("\u{feff}A,B,C\n1,2,3\n");
        let headers = read_csv_schema(file.path()).unwrap();
        assert_eq!(headers.columns, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_read_csv_schema_missing_file() {
        let result = read_csv_schema(Path::new("/nonexistent/natl2019.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_keeps_text() {
        let file = create_temp_csv("DOB_YY,DOB_MM,MAGER9\n2019,07,3\n2019,08,\n");
        let df = read_csv_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let months: Vec<Option<&str>> = df
            .column("DOB_MM")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(months, vec![Some("07"), Some("08")]);
    }
}
