//! Natality data ingestion.
//!
//! This crate loads the yearly birth-record exports and the reference tables
//! the pipeline needs, and harmonizes the yearly exports into one frame.
//!
//! # Features
//!
//! - **CSV Loading**: Read birth exports as text-typed Polars DataFrames
//! - **Discovery**: Find yearly exports by the year in their file name
//! - **Harmonization**: Uppercase, intersect and stack yearly schemas
//! - **Census**: Parse ACS S0101 exports under year-specific layouts
//! - **Reference Tables**: Code dictionary and key-date annotations
//! - **Store**: Harmonized CSV and year × month frequency table
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use natality_ingest::{discover_birth_files, harmonize_files, write_harmonized};
//!
//! let files = discover_birth_files(Path::new("data/births"))?;
//! let required = vec!["DOB_YY".to_string(), "DOB_MM".to_string()];
//! let mut harmonized = harmonize_files(&files, &required)?;
//! write_harmonized(&mut harmonized.frame, Path::new("out/harmonized.csv"))?;
//! ```

mod census;
mod csv;
mod discovery;
mod error;
mod harmonize;
mod reference;
mod store;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{CsvHeaders, read_csv_schema, read_csv_table};

// === File Discovery ===
pub use discovery::{YearFile, discover_birth_files, list_csv_files, year_from_path};

// === Harmonization ===
pub use harmonize::{
    Harmonized, YearSchema, YearTable, check_required, common_columns, harmonize_files,
    harmonize_tables,
};

// === Census ===
pub use census::{GROUPED_ESTIMATE, GROUPED_LABEL, TOTAL_CODE, bracket_code, load_census};

// === Reference Tables ===
pub use reference::{load_code_dictionary, load_key_dates};
pub use table::{CsvRows, read_csv_rows};

// === Store ===
pub use store::{FrequencyTable, read_harmonized, write_harmonized};
