//! JSON artifacts exchanged between the aggregation and modelling stages.
//!
//! Every series is written as a plain JSON array beside a shared
//! `time_series.json` axis, so the files can be read by any tool. Months a
//! series lacks, and non-finite values, are written as `null`.

use std::path::{Path, PathBuf};

use natality_model::{CategoryMatrix, Month, MonthlySeries};
use natality_signal::{DecomposedSeries, KeyDateMark, OscillationStats, RhythmModel};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::{ReportError, Result};

pub const TIME_SERIES_FILE: &str = "time_series.json";
pub const BIRTH_SERIES_FILE: &str = "birth_series.json";
pub const DAYS_SERIES_FILE: &str = "days_series.json";
pub const KEY_DATES_FILE: &str = "key_dates.json";
pub const DECOMPOSITION_FILE: &str = "decomposition.json";
pub const MODEL_FILE: &str = "model.json";

const SERIES_PREFIX: &str = "series_";
const CATEGORY_PREFIX: &str = "category_";

/// Output directory layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn model_data_dir(&self) -> PathBuf {
        self.root.join("model_data")
    }

    pub fn model_output_dir(&self) -> PathBuf {
        self.root.join("model_output")
    }

    /// Creates the output directories. Nothing else in this crate creates directories.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        for dir in [self.model_data_dir(), self.model_output_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| ReportError::CreateDir {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Aggregated series handed from aggregation to modelling.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    /// Monthly birth counts; its months are the shared time axis.
    pub births: MonthlySeries,
    pub days: MonthlySeries,
    /// Further named series on the same axis (rates, shares, populations).
    pub extra: Vec<MonthlySeries>,
    pub categories: Vec<CategoryMatrix>,
    pub key_dates: Vec<KeyDateMark>,
}

/// Result of the modelling stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub decomposition: DecomposedSeries,
    pub oscillation: OscillationStats,
    pub model: RhythmModel,
    /// Spacing of the periodic component, when it completes two cycles.
    pub model_rhythm: Option<OscillationStats>,
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ReportError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, text).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| ReportError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ReportError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Writes every series of `data` into the model-data directory.
pub fn write_model_data(layout: &OutputLayout, data: &ModelData) -> Result<Vec<PathBuf>> {
    let dir = layout.model_data_dir();
    let mut written = Vec::new();
    let mut emit = |name: String, write: &dyn Fn(&Path) -> Result<()>| -> Result<()> {
        let path = dir.join(name);
        write(&path)?;
        written.push(path);
        Ok(())
    };

    emit(TIME_SERIES_FILE.to_string(), &|p| write_json(p, &data.births.months))?;
    let axis = &data.births.months;
    emit(BIRTH_SERIES_FILE.to_string(), &|p| {
        write_json(p, &on_axis(axis, &data.births))
    })?;
    emit(DAYS_SERIES_FILE.to_string(), &|p| {
        write_json(p, &on_axis(axis, &data.days))
    })?;
    for series in &data.extra {
        emit(
            format!("{SERIES_PREFIX}{}.json", file_safe(&series.name)),
            &|p| write_json(p, &on_axis(axis, series)),
        )?;
    }
    for matrix in &data.categories {
        emit(
            format!("{CATEGORY_PREFIX}{}.json", file_safe(&matrix.variable)),
            &|p| write_json(p, matrix),
        )?;
    }
    emit(KEY_DATES_FILE.to_string(), &|p| write_json(p, &data.key_dates))?;

    tracing::info!(dir = %dir.display(), files = written.len(), "wrote model data");
    Ok(written)
}

fn on_axis(axis: &[Month], series: &MonthlySeries) -> Vec<Option<f64>> {
    axis.iter()
        .map(|month| series.value_for(*month).filter(|value| value.is_finite()))
        .collect()
}

fn read_values(path: &Path, axis: usize) -> Result<Vec<f64>> {
    let values: Vec<Option<f64>> = read_json(path)?;
    if values.len() != axis {
        return Err(ReportError::Misaligned {
            path: path.to_path_buf(),
            expected: axis,
            found: values.len(),
        });
    }
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

fn aligned(name: &str, months: &[Month], values: Vec<f64>) -> MonthlySeries {
    MonthlySeries {
        name: name.to_string(),
        months: months.to_vec(),
        values,
    }
}

/// Reads back what [`write_model_data`] wrote.
pub fn read_model_data(layout: &OutputLayout) -> Result<ModelData> {
    let dir = layout.model_data_dir();
    let months: Vec<Month> = read_json(&dir.join(TIME_SERIES_FILE))?;
    let births = read_values(&dir.join(BIRTH_SERIES_FILE), months.len())?;
    let days = read_values(&dir.join(DAYS_SERIES_FILE), months.len())?;

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&dir)
        .map_err(|e| ReportError::Read {
            path: dir.clone(),
            source: e,
        })?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .collect();
    entries.sort();

    let mut extra = Vec::new();
    let mut categories = Vec::new();
    for path in entries {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if let Some(name) = stem.strip_prefix(SERIES_PREFIX) {
            let values = read_values(&path, months.len())?;
            extra.push(aligned(name, &months, values));
        } else if stem.starts_with(CATEGORY_PREFIX) {
            categories.push(read_json::<CategoryMatrix>(&path)?);
        }
    }

    let key_dates_path = dir.join(KEY_DATES_FILE);
    let key_dates = if key_dates_path.exists() {
        read_json(&key_dates_path)?
    } else {
        Vec::new()
    };

    Ok(ModelData {
        births: aligned("births", &months, births),
        days: aligned("days_in_month", &months, days),
        extra,
        categories,
        key_dates,
    })
}

/// Writes the decomposition and the model into the model-output directory.
pub fn write_model_output(layout: &OutputLayout, output: &ModelOutput) -> Result<Vec<PathBuf>> {
    let dir = layout.model_output_dir();
    let decomposition = dir.join(DECOMPOSITION_FILE);
    write_json(&decomposition, output)?;
    let model = dir.join(MODEL_FILE);
    write_json(&model, &output.model)?;
    Ok(vec![decomposition, model])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_safe_names() {
        assert_eq!(file_safe("births_per_1000"), "births_per_1000");
        assert_eq!(file_safe("MAGER9 1/2"), "MAGER9_1_2");
    }

    #[test]
    fn test_short_series_padded_to_axis() {
        let axis: Vec<Month> = (1..=4).map(|m| Month::new(2020, m).unwrap()).collect();
        let yoy = MonthlySeries::new("x_yoy", axis[2..].to_vec(), vec![0.5, f64::NAN]).unwrap();
        assert_eq!(on_axis(&axis, &yoy), vec![None, None, Some(0.5), None]);
    }

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new("/tmp/out");
        assert_eq!(layout.model_data_dir(), PathBuf::from("/tmp/out/model_data"));
        assert_eq!(layout.model_output_dir(), PathBuf::from("/tmp/out/model_output"));
    }
}
