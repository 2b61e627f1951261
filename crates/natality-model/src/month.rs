//! Calendar month value type.
//!
//! Natality exports carry the birth year and month as free text
//! (`DOB_YY`, `DOB_MM`). [`Month`] is the parsed, validated form: a date
//! anchored to the first day of the month, ordered chronologically and
//! rendered as `YYYY-MM-01`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A calendar month anchored to day 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(NaiveDate);

impl Month {
    /// Builds a month from numeric parts. Returns `None` outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Parses raw year/month text fields, tolerating surrounding whitespace.
    ///
    /// Placeholders such as `"NA"` or `"99"` for the month fail to parse and
    /// yield `None`.
    pub fn from_fields(year: &str, month: &str) -> Option<Self> {
        let year = year.trim().parse::<i32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        Self::new(year, month)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(date - TimeDelta::days(i64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Number of calendar days in this month.
    pub fn days(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// The month reached `weeks` weeks after the first day of this month.
    pub fn after_weeks(&self, weeks: i64) -> Self {
        Self::containing(self.0 + TimeDelta::weeks(weeks))
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Month {
    type Err = ModelError;

    /// Accepts `YYYY-MM-DD` (snapped to the first of the month) or `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
            .map_err(|_| ModelError::InvalidMonth(s.to_string()))?;
        Ok(Self::containing(date))
    }
}

impl TryFrom<String> for Month {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_trims_and_validates() {
        assert_eq!(Month::from_fields(" 2019 ", "07"), Month::new(2019, 7));
        assert_eq!(Month::from_fields("2019", "13"), None);
        assert_eq!(Month::from_fields("2019", "0"), None);
        assert_eq!(Month::from_fields("NA", "7"), None);
        assert_eq!(Month::from_fields("2019", ""), None);
    }

    #[test]
    fn days_honour_leap_years() {
        assert_eq!(Month::new(2020, 2).unwrap().days(), 29);
        assert_eq!(Month::new(2021, 2).unwrap().days(), 28);
        assert_eq!(Month::new(1900, 2).unwrap().days(), 28);
        assert_eq!(Month::new(2000, 2).unwrap().days(), 29);
        assert_eq!(Month::new(2021, 4).unwrap().days(), 30);
        assert_eq!(Month::new(2021, 12).unwrap().days(), 31);
    }

    #[test]
    fn parses_iso_and_snaps_to_first() {
        let month: Month = "2020-03-15".parse().unwrap();
        assert_eq!(month, Month::new(2020, 3).unwrap());
        assert_eq!(month.to_string(), "2020-03-01");
        let short: Month = "2020-03".parse().unwrap();
        assert_eq!(short, month);
        assert!("March 2020".parse::<Month>().is_err());
    }

    #[test]
    fn forty_two_weeks_after_march_is_december() {
        let start = Month::new(2020, 3).unwrap();
        assert_eq!(start.after_weeks(42), Month::new(2020, 12).unwrap());
    }
}
