//! File discovery for yearly natality exports.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// A yearly birth file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFile {
    pub year: i32,
    pub path: PathBuf,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Extracts the first four-digit run in a file stem as a year.
///
/// `natl2019us.csv` and `births_2019.csv` both yield 2019.
pub fn year_from_path(path: &Path) -> Option<i32> {
    let stem = path.file_stem()?.to_str()?;
    let bytes = stem.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end - start == 4 {
            return stem[start..end].parse().ok();
        }
        start = end;
    }
    None
}

/// Finds yearly birth files in a directory, ordered by year.
///
/// CSV files without a year in their name are skipped. Two files naming the
/// same year are an error.
pub fn discover_birth_files(dir: &Path) -> Result<Vec<YearFile>> {
    let mut found: Vec<YearFile> = list_csv_files(dir)?
        .into_iter()
        .filter_map(|path| match year_from_path(&path) {
            Some(year) => Some(YearFile { year, path }),
            None => {
                tracing::debug!(path = %path.display(), "skipping CSV without a year");
                None
            }
        })
        .collect();
    found.sort_by_key(|file| file.year);
    if let Some(pair) = found.windows(2).find(|pair| pair[0].year == pair[1].year) {
        return Err(IngestError::DuplicateYear {
            year: pair[0].year,
            first: pair[0].path.clone(),
            second: pair[1].path.clone(),
        });
    }
    Ok(found)
}
