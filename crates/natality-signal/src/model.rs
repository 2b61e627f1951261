//! Illustrative sinusoid-plus-trend model of the birth series.
//!
//! The parameters are chosen by hand to match the residual qualitatively;
//! nothing here is estimated.

use natality_model::SinusoidParams;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::peaks::{local_maxima, local_minima};
use crate::regression::LinearTrend;
use crate::rhythm::{OscillationStats, characterize};

/// The model evaluated over the series index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmModel {
    pub params: SinusoidParams,
    /// `sin(period · i + phase)`.
    pub periodic: Vec<f64>,
    /// The fitted trend line.
    pub trend: Vec<f64>,
    /// `amplitude · periodic + trend`.
    pub values: Vec<f64>,
    /// Local maxima of the periodic component.
    pub peaks: Vec<usize>,
    /// Local minima of the periodic component.
    pub troughs: Vec<usize>,
}

impl RhythmModel {
    /// Spacing statistics of the periodic component.
    pub fn rhythm(&self) -> Result<OscillationStats> {
        characterize(&self.periodic, &self.peaks, &self.troughs)
    }
}

/// `sin(period · i + phase)` for `i = 0..len`.
pub fn periodic_component(len: usize, params: &SinusoidParams) -> Vec<f64> {
    (0..len)
        .map(|idx| (params.period * idx as f64 + params.phase).sin())
        .collect()
}

pub fn build_model(len: usize, params: &SinusoidParams, trend: &LinearTrend) -> RhythmModel {
    let periodic = periodic_component(len, params);
    let line = trend.line(len);
    let values = periodic
        .iter()
        .zip(&line)
        .map(|(p, t)| params.amplitude * p + t)
        .collect();
    RhythmModel {
        params: *params,
        peaks: local_maxima(&periodic),
        troughs: local_minima(&periodic),
        periodic,
        trend: line,
        values,
    }
}
