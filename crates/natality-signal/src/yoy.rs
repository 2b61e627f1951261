//! Year-over-year relative change.

use natality_model::MonthlySeries;

/// Months between a value and its comparison point.
pub const YEAR_LAG: usize = 12;

/// `(x[i] - x[i-12]) / x[i-12]` for every month with a year of history.
///
/// The result starts at the 13th month. A zero comparison value yields NaN.
pub fn year_over_year(series: &MonthlySeries) -> MonthlySeries {
    let (months, values) = if series.len() <= YEAR_LAG {
        (Vec::new(), Vec::new())
    } else {
        let values = (YEAR_LAG..series.len())
            .map(|idx| {
                let before = series.values[idx - YEAR_LAG];
                if before == 0.0 {
                    f64::NAN
                } else {
                    (series.values[idx] - before) / before
                }
            })
            .collect();
        (series.months[YEAR_LAG..].to_vec(), values)
    };
    MonthlySeries {
        name: format!("{}_yoy", series.name),
        months,
        values,
    }
}
