//! Error types for natality transformations.

use natality_model::ModelError;
use thiserror::Error;

/// Errors raised while deriving monthly series from the unified table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A requested column is absent from the table.
    #[error("column '{column}' not found in the unified table")]
    MissingColumn { column: String },

    /// A requested variable has no dictionary entry.
    #[error("variable code '{code}' not found in the code dictionary")]
    CodeNotFound { code: String },

    /// No variable was requested.
    #[error("no variable codes requested")]
    NoCodes,

    /// Every row failed date derivation.
    #[error("no valid birth dates: all {rows} rows have an unusable year or month")]
    NoValidDates { rows: usize },

    /// A `date` value could not be read back as a month.
    #[error("invalid date value '{value}'")]
    InvalidDate { value: String },

    /// A value that should be an integer is not.
    #[error("variable '{variable}' has non-numeric value '{value}'")]
    NonNumericValue { variable: String, value: String },

    /// Two series do not share a month axis.
    #[error("series '{left}' and '{right}' are not on the same month axis")]
    AxisMismatch { left: String, right: String },

    /// No census estimate covers a month of the series.
    #[error("no census estimate for {year}")]
    MissingCensus { year: i32 },

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
