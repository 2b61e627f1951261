//! Intermediate artifacts: the harmonized table and the year × month frequency table.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

/// Writes a frame as CSV with a header row.
pub fn write_harmonized(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .map_err(|e| IngestError::csv(path, e))?;
    tracing::info!(
        path = %path.display(),
        rows = frame.height(),
        "wrote harmonized table"
    );
    Ok(())
}

/// Loads a previously written harmonized table; every column is text.
pub fn read_harmonized(path: &Path) -> Result<DataFrame> {
    read_csv_table(path)
}

/// Record counts per birth year and month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    pub years: Vec<i32>,
    /// `counts[year_index][month - 1]`.
    pub counts: Vec<[u64; 12]>,
    /// Rows whose year or month did not parse.
    pub skipped: usize,
}

impl FrequencyTable {
    /// Cross-tabulates `year_column` × `month_column` of a text frame.
    pub fn from_frame(frame: &DataFrame, year_column: &str, month_column: &str) -> Result<Self> {
        let years = text_column(frame, year_column)?;
        let months = text_column(frame, month_column)?;

        let mut table: BTreeMap<i32, [u64; 12]> = BTreeMap::new();
        let mut skipped = 0;
        for (year, month) in years.into_iter().zip(months) {
            let parsed = year
                .and_then(|y| y.trim().parse::<i32>().ok())
                .zip(month.and_then(|m| m.trim().parse::<usize>().ok()));
            match parsed {
                Some((year, month)) if (1..=12).contains(&month) => {
                    table.entry(year).or_insert([0; 12])[month - 1] += 1;
                }
                _ => skipped += 1,
            }
        }

        Ok(Self {
            years: table.keys().copied().collect(),
            counts: table.into_values().collect(),
            skipped,
        })
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Renders the table as CSV text: one row per year, one column per month.
    pub fn to_csv_string(&self, year_column: &str) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut header = vec![year_column.to_string()];
        header.extend((1..=12).map(|month| month.to_string()));
        writer
            .write_record(&header)
            .map_err(|e| IngestError::csv("<frequency table>", e))?;
        for (year, row) in self.years.iter().zip(&self.counts) {
            let mut record = vec![year.to_string()];
            record.extend(row.iter().map(u64::to_string));
            writer
                .write_record(&record)
                .map_err(|e| IngestError::csv("<frequency table>", e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| IngestError::csv("<frequency table>", e))?;
        String::from_utf8(bytes).map_err(|e| IngestError::csv("<frequency table>", e))
    }

    pub fn write(&self, path: &Path, year_column: &str) -> Result<()> {
        let text = self.to_csv_string(year_column)?;
        std::fs::write(path, text).map_err(|e| IngestError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn text_column<'a>(frame: &'a DataFrame, name: &str) -> Result<Vec<Option<&'a str>>> {
    let column = frame
        .column(name)
        .map_err(|_| IngestError::ColumnNotFound {
            column: name.to_string(),
        })?;
    Ok(column.str()?.into_iter().collect())
}
