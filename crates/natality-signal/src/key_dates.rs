//! Placement of annotated events on the month axis.

use natality_model::{KeyDate, Month};
use serde::{Deserialize, Serialize};

/// Weeks from an event to the births it could affect.
pub const GESTATION_WEEKS: i64 = 42;

/// A flagged event located on the month axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDateMark {
    pub event: String,
    pub month: Month,
    pub index: usize,
    /// Month reached one full gestation after the event month.
    pub gestation: Month,
    /// Axis position of `gestation`, when the axis reaches it.
    pub gestation_index: Option<usize>,
}

/// Marks every flagged event whose month is on the axis.
pub fn mark_key_dates(months: &[Month], key_dates: &[KeyDate]) -> Vec<KeyDateMark> {
    key_dates
        .iter()
        .filter(|key_date| key_date.plot)
        .filter_map(|key_date| {
            let month = Month::containing(key_date.date);
            let Ok(index) = months.binary_search(&month) else {
                tracing::debug!(event = %key_date.event, %month, "key date outside the month axis");
                return None;
            };
            let gestation = month.after_weeks(GESTATION_WEEKS);
            Some(KeyDateMark {
                event: key_date.event.clone(),
                month,
                index,
                gestation,
                gestation_index: months.binary_search(&gestation).ok(),
            })
        })
        .collect()
}
