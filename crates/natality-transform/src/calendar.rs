//! Calendar-derived series and element-wise series arithmetic.

use natality_model::{CategoryMatrix, Month, MonthlySeries};

use crate::error::{Result, TransformError};

/// Calendar days of each month on the axis.
pub fn days_series(months: &[Month]) -> MonthlySeries {
    MonthlySeries {
        name: "days_in_month".to_string(),
        months: months.to_vec(),
        values: months.iter().map(|month| f64::from(month.days())).collect(),
    }
}

/// `numerator / denominator` month by month, scaled by `scale`.
///
/// Both series must share the same month axis.
pub fn ratio(
    numerator: &MonthlySeries,
    denominator: &MonthlySeries,
    scale: f64,
    name: &str,
) -> Result<MonthlySeries> {
    if numerator.months != denominator.months {
        return Err(TransformError::AxisMismatch {
            left: numerator.name.clone(),
            right: denominator.name.clone(),
        });
    }
    let values = numerator
        .values
        .iter()
        .zip(&denominator.values)
        .map(|(num, den)| scale * num / den)
        .collect();
    Ok(MonthlySeries::new(name, numerator.months.clone(), values)?)
}

/// Births per calendar day.
pub fn per_day(births: &MonthlySeries) -> Result<MonthlySeries> {
    ratio(births, &days_series(&births.months), 1.0, "births_per_day")
}

/// Share of the monthly total held by each code of a category matrix.
///
/// `totals` is usually the birth-count series; its axis must match the matrix.
pub fn category_shares(matrix: &CategoryMatrix, totals: &MonthlySeries) -> Result<Vec<MonthlySeries>> {
    if matrix.months != totals.months {
        return Err(TransformError::AxisMismatch {
            left: matrix.variable.clone(),
            right: totals.name.clone(),
        });
    }
    matrix
        .codes
        .iter()
        .zip(&matrix.counts)
        .map(|(code, row)| {
            let values = row
                .iter()
                .zip(&totals.values)
                .map(|(count, total)| *count as f64 / total)
                .collect();
            Ok(MonthlySeries::new(
                format!("{}_{}", matrix.variable, code),
                matrix.months.clone(),
                values,
            )?)
        })
        .collect()
}
