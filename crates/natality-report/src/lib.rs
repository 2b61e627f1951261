//! Output artifacts and console tables for the natality pipeline.
//!
//! - **artifacts**: JSON model-data and model-output files under an explicit
//!   output layout
//! - **tables**: comfy-table renderings of series, categories and
//!   decomposition results

mod artifacts;
mod error;
mod tables;

pub use artifacts::{
    BIRTH_SERIES_FILE, DAYS_SERIES_FILE, DECOMPOSITION_FILE, KEY_DATES_FILE, MODEL_FILE,
    ModelData, ModelOutput, OutputLayout, TIME_SERIES_FILE, read_json, read_model_data,
    write_json, write_model_data, write_model_output,
};
pub use error::{ReportError, Result};
pub use tables::{
    align_column, apply_summary_table_style, apply_table_style, baseline_table, category_table,
    code_table, dim_cell, extrema_table, header_cell, key_date_table, oscillation_table,
    series_table, trend_table,
};
