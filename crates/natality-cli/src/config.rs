//! Pipeline configuration loaded from `natality.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use natality_model::{CensusProfile, DecompositionOptions, ExtractionMode};
use natality_signal::YearSegment;

/// Default name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "natality.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    #[serde(default)]
    pub births: Vec<BirthFileConfig>,
    #[serde(default)]
    pub census: Vec<CensusFileConfig>,
    #[serde(default)]
    pub tracked: Vec<TrackedConfig>,
    #[serde(default)]
    pub series: SeriesConfig,
    #[serde(default)]
    pub decomposition: DecompositionOptions,
    /// Year boundaries on the birth axis, as `start..end` month indices.
    /// Required when the series has partial years; inferred otherwise.
    #[serde(default)]
    pub segments: Vec<YearSegment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory scanned for yearly exports when no `[[births]]` entry is given.
    pub births_dir: Option<PathBuf>,
    pub dictionary: PathBuf,
    pub key_dates: Option<PathBuf>,
    /// Root of the generated artifacts.
    pub output: PathBuf,
    /// Harmonized table; defaults to `<output>/harmonized.csv`.
    pub harmonized: Option<PathBuf>,
    /// Year × month frequency table; defaults to `<output>/frequency.csv`.
    pub frequency: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BirthFileConfig {
    pub year: i32,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CensusFileConfig {
    pub year: i32,
    pub path: PathBuf,
    /// Overrides the year-based layout selection.
    pub profile: Option<CensusProfile>,
}

/// A group of variables aggregated together.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackedConfig {
    pub codes: Vec<String>,
    #[serde(default)]
    pub mode: ExtractionMode,
    pub name: Option<String>,
}

impl TrackedConfig {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.codes.join("+"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesConfig {
    /// Variable summed into the monthly birth count.
    pub count_variable: String,
    pub year_field: String,
    pub month_field: String,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            count_variable: "DPLURAL".to_string(),
            year_field: "DOB_YY".to_string(),
            month_field: "DOB_MM".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Reads and validates a config file, resolving relative paths against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::parse(&contents)
            .with_context(|| format!("parse config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.births.is_empty() && self.paths.births_dir.is_none() {
            bail!("no birth files: add [[births]] entries or paths.births_dir");
        }
        for (idx, tracked) in self.tracked.iter().enumerate() {
            if tracked.codes.is_empty() {
                bail!("tracked group {} has no codes", idx + 1);
            }
        }
        let mut years: Vec<i32> = self.births.iter().map(|entry| entry.year).collect();
        years.sort_unstable();
        if let Some(pair) = years.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("birth year {} is listed twice", pair[0]);
        }
        if let Some(segment) = self.segments.iter().find(|segment| segment.is_empty()) {
            bail!("segment for {} is empty", segment.year);
        }
        if self.decomposition.peaks.distance == 0 {
            bail!("decomposition.peaks.distance must be at least 1");
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        let paths = &mut self.paths;
        resolve(&mut paths.dictionary);
        resolve(&mut paths.output);
        let optional = [
            &mut paths.births_dir,
            &mut paths.key_dates,
            &mut paths.harmonized,
            &mut paths.frequency,
        ];
        for path in optional.into_iter().flatten() {
            resolve(path);
        }
        for entry in &mut self.births {
            resolve(&mut entry.path);
        }
        for entry in &mut self.census {
            resolve(&mut entry.path);
        }
    }

    pub fn harmonized_path(&self) -> PathBuf {
        self.paths
            .harmonized
            .clone()
            .unwrap_or_else(|| self.paths.output.join("harmonized.csv"))
    }

    pub fn frequency_path(&self) -> PathBuf {
        self.paths
            .frequency
            .clone()
            .unwrap_or_else(|| self.paths.output.join("frequency.csv"))
    }

    /// Columns every yearly export must share.
    pub fn required_columns(&self) -> Vec<String> {
        let mut required = vec![
            self.series.year_field.to_uppercase(),
            self.series.month_field.to_uppercase(),
            self.series.count_variable.to_uppercase(),
        ];
        for code in self.tracked.iter().flat_map(|tracked| &tracked.codes) {
            let code = code.trim().to_uppercase();
            if !required.contains(&code) {
                required.push(code);
            }
        }
        required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[paths]
dictionary = "codes.csv"
output = "out"

[[births]]
year = 2016
path = "births/natality2016.csv"
"#;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::parse(MINIMAL).unwrap();
        assert_eq!(config.series, SeriesConfig::default());
        assert_eq!(config.decomposition, DecompositionOptions::default());
        assert_eq!(config.decomposition.peaks.height, 3500.0);
        assert_eq!(config.decomposition.peaks.distance, 6);
        assert!(config.tracked.is_empty());
        assert_eq!(config.harmonized_path(), PathBuf::from("out/harmonized.csv"));
    }

    #[test]
    fn test_full_config() {
        let config = PipelineConfig::parse(
            r#"
[paths]
dictionary = "codes.csv"
key_dates = "key_dates.csv"
output = "out"

[[births]]
year = 2021
path = "b2021.csv"

[[census]]
year = 2021
path = "acs2021.csv"
profile = "grouped"

[[tracked]]
codes = ["mracehisp"]
mode = "label"

[[tracked]]
codes = ["PRECARE5", "MEDUC"]
mode = "numeric"
name = "care_by_education"

[decomposition]
smooth = false

[decomposition.peaks]
height = 100.0
distance = 3
"#,
        )
        .unwrap();
        assert_eq!(config.census[0].profile, Some(CensusProfile::Grouped));
        assert_eq!(config.tracked[0].mode, ExtractionMode::Labels);
        assert_eq!(config.tracked[1].display_name(), "care_by_education");
        assert_eq!(config.tracked[0].display_name(), "mracehisp");
        assert!(!config.decomposition.smooth);
        assert_eq!(config.decomposition.peaks.distance, 3);
        assert_eq!(
            config.required_columns(),
            vec!["DOB_YY", "DOB_MM", "DPLURAL", "MRACEHISP", "PRECARE5", "MEDUC"]
        );
    }

    #[test]
    fn test_explicit_segments() {
        let text = format!(
            "{MINIMAL}\n[[segments]]\nyear = 2019\nstart = 0\nend = 6\n\n\
             [[segments]]\nyear = 2020\nstart = 6\nend = 18\n"
        );
        let config = PipelineConfig::parse(&text).unwrap();
        assert_eq!(
            config.segments,
            vec![
                YearSegment { year: 2019, start: 0, end: 6 },
                YearSegment { year: 2020, start: 6, end: 18 },
            ]
        );
        assert!(PipelineConfig::parse(MINIMAL).unwrap().segments.is_empty());

        let empty = format!("{MINIMAL}\n[[segments]]\nyear = 2019\nstart = 4\nend = 4\n");
        let err = PipelineConfig::parse(&empty).unwrap_err();
        assert!(err.to_string().contains("2019"));
    }

    #[test]
    fn test_sample_config_covers_every_census_year() {
        let config = PipelineConfig::parse(include_str!("../../../natality.toml")).unwrap();
        let years: Vec<i32> = config.census.iter().map(|entry| entry.year).collect();
        assert_eq!(years, (2015..=2021).collect::<Vec<_>>());
        assert!(config.census.iter().all(|entry| entry.profile.is_none()));

        let groups: Vec<(String, ExtractionMode)> = config
            .tracked
            .iter()
            .map(|tracked| (tracked.display_name(), tracked.mode))
            .collect();
        assert!(groups.contains(&("MAGER9".to_string(), ExtractionMode::NumericCodes)));
        assert!(groups.contains(&(
            "visits_by_education".to_string(),
            ExtractionMode::NumericCodes
        )));
        assert!(groups.contains(&("RF_INFTR".to_string(), ExtractionMode::Labels)));
        assert!(config.segments.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_years() {
        let text = format!("{MINIMAL}\n[[births]]\nyear = 2016\npath = \"other.csv\"\n");
        let err = PipelineConfig::parse(&text).unwrap_err();
        assert!(err.to_string().contains("2016"));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let text = format!("{MINIMAL}\n[[tracked]]\ncodes = [\"DPLURAL\"]\nmode = \"median\"\n");
        assert!(PipelineConfig::parse(&text).is_err());
    }

    #[test]
    fn test_requires_birth_source() {
        let err = PipelineConfig::parse("[paths]\ndictionary = \"c.csv\"\noutput = \"o\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("no birth files"));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, MINIMAL).unwrap();
        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.paths.dictionary, dir.path().join("codes.csv"));
        assert_eq!(
            config.births[0].path,
            dir.path().join("births/natality2016.csv")
        );
        assert_eq!(config.frequency_path(), dir.path().join("out/frequency.csv"));
    }
}
