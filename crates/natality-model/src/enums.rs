//! Type-safe selectors for pipeline behaviour.
//!
//! Both enums appear as strings in the pipeline configuration file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// How a variable is reduced to one value (or one row of counts) per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// The value is a literal count per record; months hold the sum.
    #[serde(rename = "sum")]
    Sum,

    /// The value is a numeric category code; months hold per-code counts.
    #[default]
    #[serde(rename = "numeric")]
    NumericCodes,

    /// The value is a raw label (e.g. `Y`/`N`/`U`); months hold per-label counts.
    #[serde(rename = "label")]
    Labels,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Sum => "sum",
            ExtractionMode::NumericCodes => "numeric",
            ExtractionMode::Labels => "label",
        }
    }

    /// Returns true for the two modes that produce a count matrix.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ExtractionMode::NumericCodes | ExtractionMode::Labels)
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(ExtractionMode::Sum),
            "numeric" | "code" | "codes" => Ok(ExtractionMode::NumericCodes),
            "label" | "labels" => Ok(ExtractionMode::Labels),
            _ => Err(ModelError::UnknownMode(s.to_string())),
        }
    }
}

/// Census export layout.
///
/// The ACS S0101 exports changed shape across releases; each profile
/// encapsulates where the total and the 18 age brackets live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CensusProfile {
    /// 2015–2016 subject tables: coded columns, decimal estimates.
    Legacy,
    /// 2017–2020 subject tables: coded columns, integral estimates.
    Subject,
    /// 2021+ grouped export: one row per age label.
    Grouped,
}

impl CensusProfile {
    /// Default profile for a census year.
    pub fn for_year(year: i32) -> Self {
        match year {
            ..=2016 => CensusProfile::Legacy,
            2017..=2020 => CensusProfile::Subject,
            _ => CensusProfile::Grouped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CensusProfile::Legacy => "legacy",
            CensusProfile::Subject => "subject",
            CensusProfile::Grouped => "grouped",
        }
    }
}

impl fmt::Display for CensusProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CensusProfile {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(CensusProfile::Legacy),
            "subject" => Ok(CensusProfile::Subject),
            "grouped" => Ok(CensusProfile::Grouped),
            _ => Err(ModelError::UnknownProfile(s.to_string())),
        }
    }
}
