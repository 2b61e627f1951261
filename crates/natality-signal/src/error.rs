//! Error types for signal analysis.

use natality_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("series is empty")]
    EmptySeries,

    /// Year segments do not partition the series.
    #[error("invalid year segments: {reason}")]
    InvalidSegments { reason: String },

    /// Too few points for a statistic.
    #[error("{what} needs at least {needed} points, found {found}")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        found: usize,
    },

    /// Too few detected extrema for spacing statistics.
    #[error("need at least 2 {kind} for spacing statistics, found {found}")]
    InsufficientSignal { kind: &'static str, found: usize },

    #[error("distribution error: {message}")]
    Distribution { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, SignalError>;
