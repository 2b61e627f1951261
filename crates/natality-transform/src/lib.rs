//! Natality record transformations.
//!
//! This crate turns the harmonized birth table into monthly series:
//!
//! - **date**: canonical `date` column from free-text year and month fields
//! - **extract**: variable selection with dictionary lookup and co-occurrence filtering
//! - **aggregate**: monthly sums and code × month count matrices
//! - **calendar**: days per month, per-day rates and category shares
//! - **population**: census broadcast and birth rates

pub mod aggregate;
pub mod calendar;
pub mod data_utils;
pub mod date;
pub mod error;
pub mod extract;
pub mod population;

pub use aggregate::{Aggregate, GroupedCounts, aggregate, category_matrix, grouped_counts, sum_series};
pub use calendar::{category_shares, days_series, per_day, ratio};
pub use date::{DATE_COLUMN, DateNormalization, month_column, normalize_dates};
pub use error::{Result, TransformError};
pub use extract::{Extraction, extract_variables};
pub use population::{crude_birth_rate, fertile_series, fertility_rate, population_series};
