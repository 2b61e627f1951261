//! Error types for natality data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and harmonizing input tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no header.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Required column not found in a reference table.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Invalid value in a reference table field.
    #[error("invalid {field} value '{value}' in {path}")]
    InvalidValue {
        field: String,
        value: String,
        path: PathBuf,
    },

    // === Harmonization Errors ===
    /// No input tables were supplied.
    #[error("no birth tables to harmonize")]
    NoTables,

    /// Two discovered files carry the same year in their names.
    #[error("year {year} matches both {} and {}", first.display(), second.display())]
    DuplicateYear {
        year: i32,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two column names collapse to the same name once uppercased.
    #[error("column '{column}' appears more than once after uppercasing in {year} data")]
    DuplicateColumn { year: i32, column: String },

    /// The yearly schemas share no column at all.
    #[error("column intersection across years {years:?} is empty")]
    EmptyIntersection { years: Vec<i32> },

    /// A variable needed downstream is absent from one or more years.
    #[error("required variable '{code}' is missing from {years:?} data")]
    MissingRequired { code: String, years: Vec<i32> },

    // === Census Errors ===
    /// The census export does not have the layout its profile expects.
    #[error(
        "census {year} ({profile}) layout drift in {path}: expected {expected}, found {found}"
    )]
    CensusSchemaDrift {
        year: i32,
        profile: String,
        path: PathBuf,
        expected: String,
        found: String,
    },

    // === DataFrame Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::CsvParse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
