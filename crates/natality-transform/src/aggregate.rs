//! Monthly aggregation of extracted variables.
//!
//! A single `group_by(date, value)` count feeds every mode: sums weight each
//! distinct value by its count, categorical modes pivot the counts into a
//! code × month matrix.

use std::collections::{BTreeMap, BTreeSet};

use natality_model::{CategoryMatrix, CodeValue, ExtractionMode, Month, MonthlySeries};
use polars::prelude::*;

use crate::data_utils::text_column;
use crate::date::DATE_COLUMN;
use crate::error::{Result, TransformError};

const COUNT_COLUMN: &str = "count";

/// Record count per (month, raw value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCounts {
    pub variable: String,
    /// Sorted by month, then value.
    pub groups: Vec<(Month, String, u64)>,
}

impl GroupedCounts {
    /// Distinct months, ascending.
    pub fn months(&self) -> Vec<Month> {
        let months: BTreeSet<Month> = self.groups.iter().map(|(month, _, _)| *month).collect();
        months.into_iter().collect()
    }

    pub fn total(&self) -> u64 {
        self.groups.iter().map(|(_, _, count)| count).sum()
    }
}

/// Either aggregate shape, depending on the extraction mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    Series(MonthlySeries),
    Matrix(CategoryMatrix),
}

/// Counts rows per (`date`, `variable`) over an extracted frame.
///
/// Null values are not counted; extraction has already removed them.
pub fn grouped_counts(frame: &DataFrame, variable: &str) -> Result<GroupedCounts> {
    text_column(frame, variable)?;
    text_column(frame, DATE_COLUMN)?;

    let grouped = frame
        .clone()
        .lazy()
        .filter(col(variable).is_not_null())
        .group_by([col(DATE_COLUMN), col(variable)])
        .agg([len().alias(COUNT_COLUMN)])
        .collect()?;

    let counts_column = grouped.column(COUNT_COLUMN)?.cast(&DataType::UInt64)?;
    let counts = counts_column.u64()?;
    let dates = text_column(&grouped, DATE_COLUMN)?;
    let values = text_column(&grouped, variable)?;

    let mut groups = Vec::with_capacity(grouped.height());
    for ((date, value), count) in dates.into_iter().zip(values).zip(counts.into_iter()) {
        let date = date.unwrap_or_default();
        let month = date.parse::<Month>().map_err(|_| TransformError::InvalidDate {
            value: date.to_string(),
        })?;
        groups.push((
            month,
            value.unwrap_or_default().trim().to_string(),
            count.unwrap_or(0),
        ));
    }
    groups.sort();

    Ok(GroupedCounts {
        variable: variable.to_string(),
        groups,
    })
}

/// Sums integer values per month.
pub fn sum_series(frame: &DataFrame, variable: &str, name: &str) -> Result<MonthlySeries> {
    let counts = grouped_counts(frame, variable)?;
    sum_counts(&counts, name)
}

fn sum_counts(counts: &GroupedCounts, name: &str) -> Result<MonthlySeries> {
    let mut totals: BTreeMap<Month, f64> = BTreeMap::new();
    for (month, value, count) in &counts.groups {
        let parsed = value
            .parse::<i64>()
            .map_err(|_| TransformError::NonNumericValue {
                variable: counts.variable.clone(),
                value: value.clone(),
            })?;
        *totals.entry(*month).or_insert(0.0) += parsed as f64 * *count as f64;
    }
    let (months, values) = totals.into_iter().unzip();
    Ok(MonthlySeries::new(name, months, values)?)
}

/// Counts records per code and month.
///
/// The code axis holds every code observed anywhere in the frame; months
/// where a code does not occur hold zero.
pub fn category_matrix(
    frame: &DataFrame,
    variable: &str,
    mode: ExtractionMode,
) -> Result<CategoryMatrix> {
    let counts = grouped_counts(frame, variable)?;
    matrix_from_counts(&counts, mode)
}

fn matrix_from_counts(counts: &GroupedCounts, mode: ExtractionMode) -> Result<CategoryMatrix> {
    let months = counts.months();
    let month_index: BTreeMap<Month, usize> = months
        .iter()
        .enumerate()
        .map(|(idx, month)| (*month, idx))
        .collect();

    let mut cells: BTreeMap<CodeValue, Vec<u64>> = BTreeMap::new();
    for (month, value, count) in &counts.groups {
        let code = match mode {
            ExtractionMode::Labels => CodeValue::label(value),
            _ => CodeValue::parse_numeric(value).ok_or_else(|| TransformError::NonNumericValue {
                variable: counts.variable.clone(),
                value: value.clone(),
            })?,
        };
        let row = cells
            .entry(code)
            .or_insert_with(|| vec![0; months.len()]);
        if let Some(idx) = month_index.get(month) {
            row[*idx] += count;
        }
    }

    let (codes, rows): (Vec<CodeValue>, Vec<Vec<u64>>) = cells.into_iter().unzip();
    Ok(CategoryMatrix {
        variable: counts.variable.clone(),
        months,
        codes,
        counts: rows,
    })
}

/// Aggregates one variable according to `mode`.
pub fn aggregate(frame: &DataFrame, variable: &str, mode: ExtractionMode) -> Result<Aggregate> {
    let counts = grouped_counts(frame, variable)?;
    let aggregate = match mode {
        ExtractionMode::Sum => Aggregate::Series(sum_counts(&counts, variable)?),
        ExtractionMode::NumericCodes | ExtractionMode::Labels => {
            Aggregate::Matrix(matrix_from_counts(&counts, mode)?)
        }
    };
    tracing::debug!(
        variable,
        mode = %mode,
        months = counts.months().len(),
        rows = counts.total(),
        "aggregated variable"
    );
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df! {
            "date" => ["2019-02-01", "2019-01-01", "2019-01-01", "2019-02-01", "2019-02-01"],
            "DPLURAL" => ["1", "2", "1", "1", "3"],
            "MRACEHISP" => ["Y", "N", "Y", "U", "Y"],
        }
        .unwrap()
    }

    #[test]
    fn test_grouped_counts_sorted() {
        let counts = grouped_counts(&frame(), "DPLURAL").unwrap();
        let jan = Month::new(2019, 1).unwrap();
        let feb = Month::new(2019, 2).unwrap();
        assert_eq!(
            counts.groups,
            vec![
                (jan, "1".to_string(), 1),
                (jan, "2".to_string(), 1),
                (feb, "1".to_string(), 2),
                (feb, "3".to_string(), 1),
            ]
        );
        assert_eq!(counts.months(), vec![jan, feb]);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_sum_series() {
        let series = sum_series(&frame(), "DPLURAL", "births").unwrap();
        assert_eq!(series.name, "births");
        assert_eq!(series.values, vec![3.0, 5.0]);
    }

    #[test]
    fn test_numeric_matrix() {
        let matrix = category_matrix(&frame(), "DPLURAL", ExtractionMode::NumericCodes).unwrap();
        assert_eq!(
            matrix.codes,
            vec![
                CodeValue::Numeric(1),
                CodeValue::Numeric(2),
                CodeValue::Numeric(3)
            ]
        );
        assert_eq!(matrix.counts, vec![vec![1, 2], vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_label_matrix() {
        let matrix = category_matrix(&frame(), "MRACEHISP", ExtractionMode::Labels).unwrap();
        let labels: Vec<String> = matrix.codes.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["N", "U", "Y"]);
        assert_eq!(matrix.month_totals(), vec![2, 3]);
    }

    #[test]
    fn test_non_numeric_value() {
        let err = category_matrix(&frame(), "MRACEHISP", ExtractionMode::NumericCodes).unwrap_err();
        assert!(matches!(err, TransformError::NonNumericValue { .. }));
    }
}
