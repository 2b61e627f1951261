//! Pipeline stages driven by the CLI commands.
//!
//! Each stage reads its inputs from the paths in [`PipelineConfig`] and
//! writes its artifacts for the next stage:
//!
//! 1. **Harmonize**: yearly exports → harmonized CSV + frequency table
//! 2. **Aggregate**: harmonized CSV → model-data JSON series
//! 3. **Model**: model-data JSON → decomposition and model JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use natality_ingest::{
    FrequencyTable, YearFile, discover_birth_files, harmonize_files, load_census,
    load_code_dictionary, load_key_dates, read_harmonized, write_harmonized,
};
use natality_model::{CategoryMatrix, CensusYear, CodeDictionary, MonthlySeries};
use natality_report::{
    ModelData, ModelOutput, OutputLayout, read_model_data, write_model_data, write_model_output,
};
use natality_signal::{
    DecomposedSeries, SignalError, calendar_segments, decompose, mark_key_dates, year_over_year,
};
use natality_transform::{
    Aggregate, aggregate, category_shares, crude_birth_rate, days_series, extract_variables,
    fertile_series, fertility_rate, normalize_dates, per_day, population_series, sum_series,
};

use crate::config::{PipelineConfig, TrackedConfig};

/// Outcome of the harmonize stage.
#[derive(Debug)]
pub struct HarmonizeResult {
    /// Row count per year, in stacking order.
    pub rows_per_year: Vec<(i32, usize)>,
    pub columns: Vec<String>,
    pub rows: usize,
    pub dropped_dates: usize,
    pub frequency: FrequencyTable,
    pub harmonized_path: PathBuf,
    pub frequency_path: PathBuf,
}

/// Outcome of the aggregate stage.
#[derive(Debug)]
pub struct AggregateResult {
    pub data: ModelData,
    pub dictionary: CodeDictionary,
    pub census: Vec<CensusYear>,
    pub written: Vec<PathBuf>,
}

/// Outcome of the model stage.
#[derive(Debug)]
pub struct ModelResult {
    pub output: ModelOutput,
    pub written: Vec<PathBuf>,
}

/// Yearly exports named in the config, or discovered in `paths.births_dir`.
pub fn birth_files(config: &PipelineConfig) -> Result<Vec<YearFile>> {
    if !config.births.is_empty() {
        let mut files: Vec<YearFile> = config
            .births
            .iter()
            .map(|entry| YearFile {
                year: entry.year,
                path: entry.path.clone(),
            })
            .collect();
        files.sort_by_key(|file| file.year);
        return Ok(files);
    }
    let dir = config
        .paths
        .births_dir
        .as_deref()
        .context("no birth files configured")?;
    discover_birth_files(dir).with_context(|| format!("discover births in {}", dir.display()))
}

pub fn harmonize(config: &PipelineConfig) -> Result<HarmonizeResult> {
    let files = birth_files(config)?;
    let required = config.required_columns();
    let year_field = config.series.year_field.to_uppercase();
    let month_field = config.series.month_field.to_uppercase();

    let harmonized = harmonize_files(&files, &required).context("harmonize yearly exports")?;
    let frequency = FrequencyTable::from_frame(&harmonized.frame, &year_field, &month_field)
        .context("build year × month frequency table")?;

    let normalized = normalize_dates(harmonized.frame, &year_field, &month_field)
        .context("normalize birth dates")?;
    let mut frame = normalized.frame;

    let layout = OutputLayout::new(&config.paths.output);
    layout
        .ensure_output_dirs()
        .context("create output directories")?;

    let harmonized_path = config.harmonized_path();
    write_harmonized(&mut frame, &harmonized_path)
        .with_context(|| format!("write {}", harmonized_path.display()))?;
    let frequency_path = config.frequency_path();
    frequency
        .write(&frequency_path, &year_field)
        .with_context(|| format!("write {}", frequency_path.display()))?;

    Ok(HarmonizeResult {
        rows_per_year: harmonized.rows_per_year,
        columns: harmonized.columns,
        rows: frame.height(),
        dropped_dates: normalized.dropped,
        frequency,
        harmonized_path,
        frequency_path,
    })
}

/// Monthly birth counts from the count variable.
pub fn birth_series(
    frame: &DataFrame,
    config: &PipelineConfig,
    dictionary: &CodeDictionary,
) -> Result<MonthlySeries> {
    let variable = config.series.count_variable.to_uppercase();
    let extraction = extract_variables(frame, std::slice::from_ref(&variable), dictionary)
        .with_context(|| format!("extract count variable {variable}"))?;
    if extraction.dropped > 0 {
        warn!(variable = %variable, dropped = extraction.dropped, "rows without a count value");
    }
    sum_series(&extraction.frame, &variable, "births")
        .with_context(|| format!("sum {variable} per month"))
}

/// Series and matrices for one tracked group.
fn tracked_series(
    frame: &DataFrame,
    tracked: &TrackedConfig,
    dictionary: &CodeDictionary,
    births: &MonthlySeries,
) -> Result<(Vec<MonthlySeries>, Vec<CategoryMatrix>)> {
    let group = tracked.display_name();
    let extraction = extract_variables(frame, &tracked.codes, dictionary)
        .with_context(|| format!("extract tracked group {group}"))?;
    debug!(
        group = %group,
        rows = extraction.frame.height(),
        dropped = extraction.dropped,
        "extracted tracked group"
    );

    let mut series = Vec::new();
    let mut matrices = Vec::new();
    for (code, label) in extraction.codes.iter().zip(&extraction.labels) {
        let aggregated = aggregate(&extraction.frame, code, tracked.mode)
            .with_context(|| format!("aggregate {code} ({label})"))?;
        match aggregated {
            Aggregate::Series(mut sum) => {
                sum.name = format!("{}_sum", code.to_lowercase());
                series.push(sum);
            }
            Aggregate::Matrix(matrix) => {
                if matrix.months == births.months {
                    for share in category_shares(&matrix, births)? {
                        let yoy = year_over_year(&share);
                        series.push(share);
                        series.push(yoy);
                    }
                } else {
                    warn!(
                        variable = %code,
                        months = matrix.months.len(),
                        axis = births.months.len(),
                        "category months differ from the birth axis; shares skipped"
                    );
                }
                matrices.push(matrix);
            }
        }
    }
    Ok((series, matrices))
}

pub fn aggregate_stage(config: &PipelineConfig) -> Result<AggregateResult> {
    let harmonized_path = config.harmonized_path();
    let frame = read_harmonized(&harmonized_path)
        .with_context(|| format!("read {}", harmonized_path.display()))?;
    let dictionary = load_code_dictionary(&config.paths.dictionary).with_context(|| {
        format!("load code dictionary {}", config.paths.dictionary.display())
    })?;

    let births = birth_series(&frame, config, &dictionary)?;
    let days = days_series(&births.months);
    let mut extra = vec![per_day(&births)?];

    let mut census = Vec::with_capacity(config.census.len());
    for entry in &config.census {
        let year = load_census(&entry.path, entry.year, entry.profile)
            .with_context(|| format!("load census {} ({})", entry.year, entry.path.display()))?;
        census.push(year);
    }
    if !census.is_empty() {
        let population = population_series(&births.months, &census)?;
        let fertile = fertile_series(&births.months, &census)?;
        extra.push(crude_birth_rate(&births, &population)?);
        extra.push(fertility_rate(&births, &fertile)?);
        extra.push(population);
        extra.push(fertile);
    }

    let mut categories = Vec::new();
    for tracked in &config.tracked {
        let (series, matrices) = tracked_series(&frame, tracked, &dictionary, &births)?;
        extra.extend(series);
        categories.extend(matrices);
    }

    let key_dates = match &config.paths.key_dates {
        Some(path) => {
            let dates = load_key_dates(path)
                .with_context(|| format!("load key dates {}", path.display()))?;
            mark_key_dates(&births.months, &dates)
        }
        None => Vec::new(),
    };

    let data = ModelData {
        births,
        days,
        extra,
        categories,
        key_dates,
    };
    let layout = OutputLayout::new(&config.paths.output);
    layout
        .ensure_output_dirs()
        .context("create output directories")?;
    let written = write_model_data(&layout, &data).context("write model data")?;
    info!(
        months = data.births.len(),
        series = data.extra.len(),
        categories = data.categories.len(),
        "aggregated model data"
    );

    Ok(AggregateResult {
        data,
        dictionary,
        census,
        written,
    })
}

/// Decomposes the birth series and builds the illustrative model.
pub fn model_stage(config: &PipelineConfig) -> Result<ModelResult> {
    let layout = OutputLayout::new(&config.paths.output);
    let data = read_model_data(&layout).context("read model data")?;
    let output = model_births(&data.births, config)?;

    layout
        .ensure_output_dirs()
        .context("create output directories")?;
    let written = write_model_output(&layout, &output).context("write model output")?;
    Ok(ModelResult { output, written })
}

pub fn model_births(births: &MonthlySeries, config: &PipelineConfig) -> Result<ModelOutput> {
    let segments = if config.segments.is_empty() {
        calendar_segments(&births.months).context("infer year segments of the birth series")?
    } else {
        debug!(segments = config.segments.len(), "using configured year segments");
        config.segments.clone()
    };
    let decomposition: DecomposedSeries = decompose(births, &segments, &config.decomposition)
        .context("decompose birth series")?;
    let oscillation = decomposition
        .oscillation()
        .context("characterize birth rhythm")?;

    let model = decomposition.model(&config.decomposition.model);
    let model_rhythm = match model.rhythm() {
        Ok(stats) => Some(stats),
        Err(SignalError::InsufficientSignal { kind, found }) => {
            warn!(kind, found, "model completes fewer than two cycles");
            None
        }
        Err(err) => return Err(err).context("characterize model rhythm"),
    };

    Ok(ModelOutput {
        decomposition,
        oscillation,
        model,
        model_rhythm,
    })
}
