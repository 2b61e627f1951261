//! Trend/seasonal decomposition of a monthly series.

use natality_model::{DecompositionOptions, Month, MonthlySeries, SinusoidParams};
use serde::{Deserialize, Serialize};

use crate::baseline::{Baseline, YearSegment, median_baseline};
use crate::error::{Result, SignalError};
use crate::model::{RhythmModel, build_model};
use crate::peaks::{find_peaks, find_troughs};
use crate::regression::{LinearTrend, linear_trend};
use crate::rhythm::{OscillationStats, characterize};
use crate::smooth::savgol_3_1;

/// A series split into a per-year median baseline and a seasonal residual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecomposedSeries {
    pub name: String,
    pub months: Vec<Month>,
    pub raw: Vec<f64>,
    pub baseline: Baseline,
    /// `raw - baseline`.
    pub residual: Vec<f64>,
    pub smoothed: Option<Vec<f64>>,
    pub peaks: Vec<usize>,
    pub troughs: Vec<usize>,
    /// Trend of the baseline against the month index.
    pub trend: LinearTrend,
}

impl DecomposedSeries {
    /// Amplitudes and spacings of the residual's peaks and troughs.
    pub fn oscillation(&self) -> Result<OscillationStats> {
        characterize(&self.residual, &self.peaks, &self.troughs)
    }

    /// The illustrative sinusoid model on top of the baseline trend.
    pub fn model(&self, params: &SinusoidParams) -> RhythmModel {
        build_model(self.raw.len(), params, &self.trend)
    }

    pub fn peak_months(&self) -> Vec<Month> {
        self.peaks.iter().map(|&idx| self.months[idx]).collect()
    }

    pub fn trough_months(&self) -> Vec<Month> {
        self.troughs.iter().map(|&idx| self.months[idx]).collect()
    }
}

/// Decomposes `series` over caller-supplied year segments.
pub fn decompose(
    series: &MonthlySeries,
    segments: &[YearSegment],
    options: &DecompositionOptions,
) -> Result<DecomposedSeries> {
    if series.is_empty() {
        return Err(SignalError::EmptySeries);
    }
    let baseline = median_baseline(&series.values, segments)?;
    let residual = baseline.residual(&series.values);
    let trend = linear_trend(&baseline.values)?;

    let peaks = find_peaks(&residual, &options.peaks);
    let troughs = find_troughs(&residual, &options.peaks);
    let smoothed = options.smooth.then(|| savgol_3_1(&residual));

    tracing::info!(
        series = %series.name,
        points = series.len(),
        segments = segments.len(),
        peaks = peaks.len(),
        troughs = troughs.len(),
        slope = trend.slope,
        r = trend.r,
        "decomposed series"
    );

    Ok(DecomposedSeries {
        name: series.name.clone(),
        months: series.months.clone(),
        raw: series.values.clone(),
        baseline,
        residual,
        smoothed,
        peaks,
        troughs,
        trend,
    })
}
