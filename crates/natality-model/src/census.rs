use std::ops::Range;

use serde::{Deserialize, Serialize};

pub const BRACKET_COUNT: usize = 18;

/// Age brackets in census order.
pub const AGE_BRACKETS: [&str; BRACKET_COUNT] = [
    "Under 5 years",
    "5 to 9 years",
    "10 to 14 years",
    "15 to 19 years",
    "20 to 24 years",
    "25 to 29 years",
    "30 to 34 years",
    "35 to 39 years",
    "40 to 44 years",
    "45 to 49 years",
    "50 to 54 years",
    "55 to 59 years",
    "60 to 64 years",
    "65 to 69 years",
    "70 to 74 years",
    "75 to 79 years",
    "80 to 84 years",
    "85 years and over",
];

/// Bracket indices from 15–19 through 40–44.
pub const FERTILE_BRACKETS: Range<usize> = 3..9;

/// Population estimate for one census year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusYear {
    pub year: i32,
    pub total: u64,
    pub brackets: [f64; BRACKET_COUNT],
}

impl CensusYear {
    /// Population in the childbearing-age brackets.
    pub fn fertile_cohort(&self) -> f64 {
        self.brackets[FERTILE_BRACKETS].iter().sum()
    }

    pub fn bracket(&self, label: &str) -> Option<f64> {
        AGE_BRACKETS
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(label))
            .map(|idx| self.brackets[idx])
    }
}
