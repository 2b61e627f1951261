//! Census population exports (ACS table S0101).
//!
//! The export layout changed across releases. Each [`CensusProfile`] knows
//! where the total population and the 18 age brackets live; any deviation
//! from that layout is reported as [`IngestError::CensusSchemaDrift`].

use std::path::{Path, PathBuf};

use natality_model::{AGE_BRACKETS, BRACKET_COUNT, CensusProfile, CensusYear};

use crate::error::{IngestError, Result};
use crate::table::{CsvRows, get_field, read_csv_rows};

/// Subject-table code of the total population estimate.
pub const TOTAL_CODE: &str = "S0101_C01_001E";

/// Estimate column of the grouped export.
pub const GROUPED_ESTIMATE: &str = "United States!!Total!!Estimate";

/// Label column of the grouped export.
pub const GROUPED_LABEL: &str = "Label (Grouping)";

/// Data row holding the estimates in subject-table exports (row 0 repeats the labels).
const SUBJECT_DATA_ROW: usize = 1;

/// First bracket row of the grouped export (row 1 is the `AGE` heading).
const GROUPED_FIRST_BRACKET: usize = 2;

/// Subject-table code of the n-th age bracket (`S0101_C01_002E` ...).
pub fn bracket_code(index: usize) -> String {
    format!("S0101_C01_{:03}E", index + 2)
}

/// Reads one census export, choosing the profile from the year when none is given.
pub fn load_census(path: &Path, year: i32, profile: Option<CensusProfile>) -> Result<CensusYear> {
    let profile = profile.unwrap_or_else(|| CensusProfile::for_year(year));
    let table = read_csv_rows(path)?;
    let parser = ProfileParser {
        year,
        profile,
        path: path.to_path_buf(),
    };
    let census = match profile {
        CensusProfile::Legacy => parser.subject(&table, false)?,
        CensusProfile::Subject => parser.subject(&table, true)?,
        CensusProfile::Grouped => parser.grouped(&table)?,
    };
    tracing::debug!(
        year,
        %profile,
        total = census.total,
        "parsed census export"
    );
    Ok(census)
}

struct ProfileParser {
    year: i32,
    profile: CensusProfile,
    path: PathBuf,
}

impl ProfileParser {
    fn drift(&self, expected: impl Into<String>, found: impl Into<String>) -> IngestError {
        IngestError::CensusSchemaDrift {
            year: self.year,
            profile: self.profile.to_string(),
            path: self.path.clone(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    fn require(&self, table: &CsvRows, column: &str) -> Result<()> {
        if table.has_column(column) {
            Ok(())
        } else {
            Err(self.drift(format!("column {column}"), "no such column"))
        }
    }

    fn integer(&self, what: &str, raw: &str) -> Result<u64> {
        strip_separators(raw)
            .parse::<u64>()
            .map_err(|_| self.drift(format!("integer {what}"), format!("'{raw}'")))
    }

    fn decimal(&self, what: &str, raw: &str) -> Result<f64> {
        let value = strip_separators(raw)
            .parse::<f64>()
            .map_err(|_| self.drift(format!("number for {what}"), format!("'{raw}'")))?;
        if !value.is_finite() || value < 0.0 {
            return Err(self.drift(format!("non-negative {what}"), format!("'{raw}'")));
        }
        Ok(value)
    }

    /// Coded-column layouts: one column per estimate, values on the second data row.
    fn subject(&self, table: &CsvRows, integral: bool) -> Result<CensusYear> {
        self.require(table, TOTAL_CODE)?;
        for index in 0..BRACKET_COUNT {
            self.require(table, &bracket_code(index))?;
        }
        let row = table.rows.get(SUBJECT_DATA_ROW).ok_or_else(|| {
            self.drift(
                format!("estimates on data row {SUBJECT_DATA_ROW}"),
                format!("{} data rows", table.len()),
            )
        })?;

        let total = self.integer(TOTAL_CODE, get_field(row, TOTAL_CODE))?;
        let mut brackets = [0.0; BRACKET_COUNT];
        for (index, slot) in brackets.iter_mut().enumerate() {
            let code = bracket_code(index);
            let raw = get_field(row, &code);
            *slot = if integral {
                self.integer(&code, raw)? as f64
            } else {
                self.decimal(&code, raw)?
            };
        }
        Ok(CensusYear {
            year: self.year,
            total,
            brackets,
        })
    }

    /// Row-oriented layout: one labelled row per estimate.
    fn grouped(&self, table: &CsvRows) -> Result<CensusYear> {
        self.require(table, GROUPED_LABEL)?;
        self.require(table, GROUPED_ESTIMATE)?;
        let needed = GROUPED_FIRST_BRACKET + BRACKET_COUNT;
        if table.len() < needed {
            return Err(self.drift(
                format!("at least {needed} rows"),
                format!("{} rows", table.len()),
            ));
        }

        let total_row = &table.rows[0];
        self.check_label(0, "Total population", get_field(total_row, GROUPED_LABEL))?;
        let total = self.integer("total population", get_field(total_row, GROUPED_ESTIMATE))?;

        let mut brackets = [0.0; BRACKET_COUNT];
        for (index, slot) in brackets.iter_mut().enumerate() {
            let row_index = GROUPED_FIRST_BRACKET + index;
            let row = &table.rows[row_index];
            let expected = AGE_BRACKETS[index];
            self.check_label(row_index, expected, get_field(row, GROUPED_LABEL))?;
            *slot = self.integer(expected, get_field(row, GROUPED_ESTIMATE))? as f64;
        }
        Ok(CensusYear {
            year: self.year,
            total,
            brackets,
        })
    }

    fn check_label(&self, row: usize, expected: &str, found: &str) -> Result<()> {
        if found.trim().eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(self.drift(
                format!("label '{expected}' on row {row}"),
                format!("'{}'", found.trim()),
            ))
        }
    }
}

fn strip_separators(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != ',').collect()
}
