//! Monthly series containers.

use serde::{Deserialize, Serialize};

use crate::code::CodeValue;
use crate::error::{ModelError, Result};
use crate::month::Month;

/// One scalar per month, months ascending.
///
/// Missing months in the source are not filled; the axis only holds the
/// months that were observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub name: String,
    pub months: Vec<Month>,
    pub values: Vec<f64>,
}

impl MonthlySeries {
    pub fn new(name: impl Into<String>, months: Vec<Month>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if months.len() != values.len() {
            return Err(ModelError::Misaligned {
                name,
                months: months.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            name,
            months,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        self.months.iter().copied().zip(self.values.iter().copied())
    }

    pub fn value_for(&self, month: Month) -> Option<f64> {
        self.months
            .binary_search(&month)
            .ok()
            .map(|idx| self.values[idx])
    }
}

/// Per-month counts for every observed category code.
///
/// `counts[code_index][month_index]`; every row spans the full month axis
/// and absent combinations hold zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatrix {
    pub variable: String,
    pub months: Vec<Month>,
    pub codes: Vec<CodeValue>,
    pub counts: Vec<Vec<u64>>,
}

impl CategoryMatrix {
    /// Counts for one code, if it was observed.
    pub fn row(&self, code: &CodeValue) -> Option<&[u64]> {
        let idx = self.codes.iter().position(|candidate| candidate == code)?;
        self.counts.get(idx).map(Vec::as_slice)
    }

    /// Sum over codes for each month.
    pub fn month_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.months.len()];
        for row in &self.counts {
            for (total, count) in totals.iter_mut().zip(row) {
                *total += count;
            }
        }
        totals
    }

    /// Sum over months for each code.
    pub fn code_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }
}
