//! Census-based population series and birth rates.

use natality_model::{CensusYear, Month, MonthlySeries};

use crate::calendar::ratio;
use crate::error::{Result, TransformError};

/// Broadcasts a per-year census quantity over the months of each year.
fn broadcast(
    months: &[Month],
    census: &[CensusYear],
    name: &str,
    value: impl Fn(&CensusYear) -> f64,
) -> Result<MonthlySeries> {
    let values = months
        .iter()
        .map(|month| {
            census
                .iter()
                .find(|entry| entry.year == month.year())
                .map(&value)
                .ok_or(TransformError::MissingCensus { year: month.year() })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(MonthlySeries::new(name, months.to_vec(), values)?)
}

/// Total resident population for each month of the axis.
pub fn population_series(months: &[Month], census: &[CensusYear]) -> Result<MonthlySeries> {
    broadcast(months, census, "population", |entry| entry.total as f64)
}

/// Population aged 15–44 for each month of the axis.
pub fn fertile_series(months: &[Month], census: &[CensusYear]) -> Result<MonthlySeries> {
    broadcast(months, census, "fertile_population", CensusYear::fertile_cohort)
}

/// Births per 1000 residents.
pub fn crude_birth_rate(births: &MonthlySeries, population: &MonthlySeries) -> Result<MonthlySeries> {
    ratio(births, population, 1000.0, "births_per_1000")
}

/// Births per 1000 people of childbearing age.
pub fn fertility_rate(births: &MonthlySeries, fertile: &MonthlySeries) -> Result<MonthlySeries> {
    ratio(births, fertile, 1000.0, "births_per_1000_fertile")
}
