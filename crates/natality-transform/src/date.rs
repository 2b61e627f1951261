//! Canonical month derivation for birth records.

use natality_model::Month;
use polars::prelude::*;

use crate::data_utils::{filter_rows, text_column};
use crate::error::{Result, TransformError};

/// Name of the derived month column.
pub const DATE_COLUMN: &str = "date";

/// Result of [`normalize_dates`].
#[derive(Debug, Clone)]
pub struct DateNormalization {
    /// Rows with a valid month, with the `date` column appended.
    pub frame: DataFrame,
    /// Rows removed because the year or month did not parse.
    pub dropped: usize,
}

/// Derives `date` (`YYYY-MM-01`) from text year and month columns.
///
/// Rows whose fields do not parse, or whose month is outside 1..=12, are
/// removed and counted. Losing every row is an error.
pub fn normalize_dates(
    frame: DataFrame,
    year_column: &str,
    month_column: &str,
) -> Result<DateNormalization> {
    let months: Vec<Option<Month>> = {
        let years = text_column(&frame, year_column)?;
        let raw_months = text_column(&frame, month_column)?;
        years
            .into_iter()
            .zip(raw_months)
            .map(|(year, month)| match (year, month) {
                (Some(year), Some(month)) => Month::from_fields(year, month),
                _ => None,
            })
            .collect()
    };

    let total = months.len();
    let mask: Vec<bool> = months.iter().map(Option::is_some).collect();
    let kept: Vec<String> = months.iter().flatten().map(Month::to_string).collect();
    let dropped = total - kept.len();

    if kept.is_empty() {
        return Err(TransformError::NoValidDates { rows: total });
    }
    if dropped > 0 {
        tracing::warn!(dropped, total, "dropped rows with unusable birth year or month");
    }

    let mut filtered = if dropped > 0 {
        filter_rows(&frame, &mask)?
    } else {
        frame
    };
    filtered.with_column(Series::new(DATE_COLUMN.into(), kept))?;

    Ok(DateNormalization {
        frame: filtered,
        dropped,
    })
}

/// Parses the `date` column back into months.
pub fn month_column(frame: &DataFrame) -> Result<Vec<Month>> {
    text_column(frame, DATE_COLUMN)?
        .into_iter()
        .map(|value| {
            let value = value.unwrap_or_default();
            value.parse::<Month>().map_err(|_| TransformError::InvalidDate {
                value: value.to_string(),
            })
        })
        .collect()
}
