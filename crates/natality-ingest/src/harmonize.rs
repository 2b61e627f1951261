//! Schema harmonization across yearly natality exports.
//!
//! Each yearly export carries its own column set. Harmonization uppercases
//! every name, keeps only the columns present in every configured year and
//! stacks the restricted tables into one frame, newest year first.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::*;

use crate::csv::{read_csv_schema, read_csv_table};
use crate::discovery::YearFile;
use crate::error::{IngestError, Result};

/// One year's raw birth records.
#[derive(Debug, Clone)]
pub struct YearTable {
    pub year: i32,
    pub frame: DataFrame,
}

/// Stacked records restricted to the common columns.
#[derive(Debug, Clone)]
pub struct Harmonized {
    pub frame: DataFrame,
    /// Common columns in ascending order.
    pub columns: Vec<String>,
    /// Row count per year, in stacking order.
    pub rows_per_year: Vec<(i32, usize)>,
}

impl Harmonized {
    /// Years in stacking order (descending).
    pub fn years(&self) -> Vec<i32> {
        self.rows_per_year.iter().map(|(year, _)| *year).collect()
    }
}

/// A year's uppercased column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSchema {
    pub year: i32,
    pub columns: Vec<String>,
}

impl YearSchema {
    /// Uppercases `columns`, rejecting names that collide once uppercased.
    pub fn new(year: i32, columns: &[String]) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut upper = Vec::with_capacity(columns.len());
        for column in columns {
            let name = column.trim().to_uppercase();
            if !seen.insert(name.clone()) {
                return Err(IngestError::DuplicateColumn { year, column: name });
            }
            upper.push(name);
        }
        Ok(Self {
            year,
            columns: upper,
        })
    }
}

/// Columns present in every schema, sorted ascending.
pub fn common_columns(schemas: &[YearSchema]) -> Vec<String> {
    let mut iter = schemas.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let mut common: BTreeSet<String> = first.columns.iter().cloned().collect();
    for schema in iter {
        let columns: BTreeSet<&String> = schema.columns.iter().collect();
        common.retain(|name| columns.contains(name));
    }
    common.into_iter().collect()
}

/// Verifies the intersection is non-empty and holds every required variable.
///
/// The first missing variable is reported together with the years that lack it.
pub fn check_required(schemas: &[YearSchema], common: &[String], required: &[String]) -> Result<()> {
    if common.is_empty() {
        return Err(IngestError::EmptyIntersection {
            years: schemas.iter().map(|schema| schema.year).collect(),
        });
    }
    for code in required {
        let code = code.trim().to_uppercase();
        if common.contains(&code) {
            continue;
        }
        let mut years: Vec<i32> = schemas
            .iter()
            .filter(|schema| !schema.columns.contains(&code))
            .map(|schema| schema.year)
            .collect();
        years.sort_unstable();
        return Err(IngestError::MissingRequired { code, years });
    }
    Ok(())
}

/// Renames a frame's columns to `upper` and keeps only `common`.
fn restrict(mut frame: DataFrame, upper: &[String], common: &[String]) -> Result<DataFrame> {
    frame.set_column_names(upper.iter().map(String::as_str))?;
    Ok(frame.select(common.iter().map(String::as_str))?)
}

/// Harmonizes tables that are already in memory.
pub fn harmonize_tables(mut tables: Vec<YearTable>, required: &[String]) -> Result<Harmonized> {
    if tables.is_empty() {
        return Err(IngestError::NoTables);
    }

    let schemas = tables
        .iter()
        .map(|table| {
            let names: Vec<String> = table
                .frame
                .get_column_names_owned()
                .into_iter()
                .map(|name| name.to_string())
                .collect();
            YearSchema::new(table.year, &names)
        })
        .collect::<Result<Vec<_>>>()?;
    let common = common_columns(&schemas);
    check_required(&schemas, &common, required)?;

    tables.sort_by(|a, b| b.year.cmp(&a.year));
    let mut stacked: Option<DataFrame> = None;
    let mut rows_per_year = Vec::with_capacity(tables.len());

    for table in tables {
        let schema = schemas
            .iter()
            .find(|schema| schema.year == table.year)
            .ok_or(IngestError::NoTables)?;
        let restricted = restrict(table.frame, &schema.columns, &common)?;
        rows_per_year.push((table.year, restricted.height()));
        append(&mut stacked, restricted)?;
    }

    finish(stacked, common, rows_per_year)
}

/// Harmonizes yearly files on disk.
///
/// All headers are validated before any data is loaded, and each yearly
/// frame is released as soon as it has been appended.
pub fn harmonize_files(files: &[YearFile], required: &[String]) -> Result<Harmonized> {
    if files.is_empty() {
        return Err(IngestError::NoTables);
    }

    let schemas = files
        .iter()
        .map(|file| {
            let headers = read_csv_schema(&file.path)?;
            YearSchema::new(file.year, &headers.columns)
        })
        .collect::<Result<Vec<_>>>()?;
    let common = common_columns(&schemas);
    check_required(&schemas, &common, required)?;
    tracing::info!(
        years = files.len(),
        columns = common.len(),
        "validated yearly schemas"
    );

    let mut order: Vec<(&YearFile, &YearSchema)> = files.iter().zip(&schemas).collect();
    order.sort_by(|a, b| b.0.year.cmp(&a.0.year));

    let mut stacked: Option<DataFrame> = None;
    let mut rows_per_year = Vec::with_capacity(order.len());

    for (file, schema) in order {
        let restricted = load_restricted(&file.path, &schema.columns, &common)?;
        tracing::info!(
            year = file.year,
            rows = restricted.height(),
            "appending yearly table"
        );
        rows_per_year.push((file.year, restricted.height()));
        append(&mut stacked, restricted)?;
    }

    finish(stacked, common, rows_per_year)
}

fn load_restricted(path: &Path, upper: &[String], common: &[String]) -> Result<DataFrame> {
    let frame = read_csv_table(path)?;
    restrict(frame, upper, common)
}

fn append(stacked: &mut Option<DataFrame>, frame: DataFrame) -> Result<()> {
    match stacked {
        Some(existing) => {
            existing.vstack_mut(&frame)?;
        }
        None => *stacked = Some(frame),
    }
    Ok(())
}

fn finish(
    stacked: Option<DataFrame>,
    columns: Vec<String>,
    rows_per_year: Vec<(i32, usize)>,
) -> Result<Harmonized> {
    let mut frame = stacked.ok_or(IngestError::NoTables)?;
    frame.align_chunks_par();
    Ok(Harmonized {
        frame,
        columns,
        rows_per_year,
    })
}
