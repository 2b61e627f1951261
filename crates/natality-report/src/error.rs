//! Error types for artifact output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifacts that must describe the same month axis disagree.
    #[error("artifact {path} has {found} values but the time axis has {expected}")]
    Misaligned {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
