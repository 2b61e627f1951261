//! Loaders for the variable code dictionary and the key-date annotations.

use std::path::Path;

use chrono::NaiveDate;
use natality_model::{CodeDictionary, CodeEntry, KeyDate};

use crate::error::{IngestError, Result};
use crate::table::{get_field, get_optional, read_csv_rows};

pub const CODE_COLUMN: &str = "Code";
pub const LABEL_COLUMN: &str = "Label";
pub const RANGE_COLUMN: &str = "Range";

pub const EVENT_COLUMN: &str = "event";
pub const PLOT_DATE_COLUMN: &str = "plot_date";
pub const PLOT_COLUMN: &str = "plot";

/// Loads the code dictionary (`Code`, `Label`, optional `Range`).
///
/// Rows with an empty code are skipped.
pub fn load_code_dictionary(path: &Path) -> Result<CodeDictionary> {
    let table = read_csv_rows(path)?;
    table.require_column(CODE_COLUMN)?;
    table.require_column(LABEL_COLUMN)?;

    let entries: Vec<CodeEntry> = table
        .rows
        .iter()
        .filter(|row| !get_field(row, CODE_COLUMN).is_empty())
        .map(|row| CodeEntry {
            code: get_field(row, CODE_COLUMN).to_uppercase(),
            label: get_field(row, LABEL_COLUMN).to_string(),
            range: get_optional(row, RANGE_COLUMN),
        })
        .collect();

    let dictionary = CodeDictionary::from_entries(entries);
    tracing::debug!(path = %path.display(), codes = dictionary.len(), "loaded code dictionary");
    Ok(dictionary)
}

/// Loads key-date annotations (`event`, `plot_date`, `plot`).
pub fn load_key_dates(path: &Path) -> Result<Vec<KeyDate>> {
    let table = read_csv_rows(path)?;
    table.require_column(EVENT_COLUMN)?;
    table.require_column(PLOT_DATE_COLUMN)?;
    table.require_column(PLOT_COLUMN)?;

    let mut dates = Vec::with_capacity(table.len());
    for row in &table.rows {
        let raw_date = get_field(row, PLOT_DATE_COLUMN);
        let date = parse_date(raw_date).ok_or_else(|| IngestError::InvalidValue {
            field: PLOT_DATE_COLUMN.to_string(),
            value: raw_date.to_string(),
            path: path.to_path_buf(),
        })?;
        let raw_flag = get_field(row, PLOT_COLUMN);
        let plot = parse_flag(raw_flag).ok_or_else(|| IngestError::InvalidValue {
            field: PLOT_COLUMN.to_string(),
            value: raw_flag.to_string(),
            path: path.to_path_buf(),
        })?;
        dates.push(KeyDate {
            event: get_field(row, EVENT_COLUMN).to_string(),
            date,
            plot,
        });
    }
    Ok(dates)
}

/// Accepts ISO dates, optionally followed by a time part, and US `m/d/Y`.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split_whitespace().next()?;
    let date_part = date_part.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%m/%d/%Y"))
        .ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "" | "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
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
    fn test_load_code_dictionary() {
        let file = create_temp_csv(
            "Code,Label,Range\nmager9,Mother's Age Recode 9,1-9\nDPLURAL,Plurality Recode,\n,orphan,\n",
        );
        let dictionary = load_code_dictionary(file.path()).unwrap();

        assert_eq!(dictionary.len(), 2);
        let entry = dictionary.get("MAGER9").unwrap();
        assert_eq!(entry.label, "Mother's Age Recode 9");
        assert_eq!(entry.range.as_deref(), Some("1-9"));
        assert_eq!(dictionary.get("DPLURAL").unwrap().range, None);
    }

    #[test]
    fn test_load_code_dictionary_requires_label() {
        let file = create_temp_csv("Code,Description\nMAGER9,age\n");
        let result = load_code_dictionary(file.path());
        assert!(matches!(result, Err(IngestError::MissingColumn { .. })));
    }

    #[test]
    fn test_load_key_dates() {
        let file = create_temp_csv(
            "event,plot_date,plot\nNational emergency,2020-03-13 00:00:00,y\nVaccine rollout,12/14/2020,n\n",
        );
        let dates = load_key_dates(file.path()).unwrap();

        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].date, NaiveDate::from_ymd_opt(2020, 3, 13).unwrap());
        assert!(dates[0].plot);
        assert_eq!(dates[1].date, NaiveDate::from_ymd_opt(2020, 12, 14).unwrap());
        assert!(!dates[1].plot);
    }

    #[test]
    fn test_load_key_dates_rejects_bad_date() {
        let file = create_temp_csv("event,plot_date,plot\nsomething,March 2020,y\n");
        let result = load_key_dates(file.path());
        assert!(matches!(result, Err(IngestError::InvalidValue { .. })));
    }
}
