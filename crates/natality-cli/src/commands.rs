use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use natality_cli::config::PipelineConfig;
use natality_cli::pipeline::{aggregate_stage, harmonize, model_stage};
use natality_ingest::load_code_dictionary;
use natality_report::code_table;

use crate::cli::AggregateArgs;
use crate::summary::{print_aggregate_summary, print_harmonize_summary, print_model_report};

fn load_config(path: &Path) -> Result<PipelineConfig> {
    let config = PipelineConfig::load(path)?;
    info!(config = %path.display(), "loaded pipeline config");
    Ok(config)
}

pub fn run_harmonize(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let span = info_span!("harmonize", output = %config.paths.output.display());
    let start = Instant::now();
    let result = span.in_scope(|| harmonize(&config))?;
    info!(
        years = result.rows_per_year.len(),
        columns = result.columns.len(),
        rows = result.rows,
        dropped_dates = result.dropped_dates,
        duration_ms = start.elapsed().as_millis(),
        "harmonize complete"
    );
    print_harmonize_summary(&result, &config.series.year_field);
    Ok(())
}

pub fn run_aggregate(config_path: &Path, args: &AggregateArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let span = info_span!("aggregate", harmonized = %config.harmonized_path().display());
    let start = Instant::now();
    let result = span.in_scope(|| aggregate_stage(&config))?;
    info!(
        months = result.data.births.len(),
        files = result.written.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregate complete"
    );
    print_aggregate_summary(&result, args.show_series);
    Ok(())
}

pub fn run_model(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let span = info_span!("model", output = %config.paths.output.display());
    let start = Instant::now();
    let result = span.in_scope(|| model_stage(&config))?;
    info!(
        peaks = result.output.decomposition.peaks.len(),
        troughs = result.output.decomposition.troughs.len(),
        duration_ms = start.elapsed().as_millis(),
        "model complete"
    );
    print_model_report(&result);
    Ok(())
}

pub fn run_codes(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let path = &config.paths.dictionary;
    let dictionary = load_code_dictionary(path)
        .with_context(|| format!("load code dictionary {}", path.display()))?;
    println!("{}", code_table(&dictionary));
    println!("{} codes", dictionary.len());
    Ok(())
}
