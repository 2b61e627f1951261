//! Tuning options for the seasonal decomposition.

use serde::{Deserialize, Serialize};

/// Thresholds for local-extremum detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakOptions {
    /// Minimum residual height of an accepted peak (troughs use the negated residual).
    pub height: f64,
    /// Minimum index distance between two accepted detections.
    pub distance: usize,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            height: 3500.0,
            distance: 6,
        }
    }
}

impl PeakOptions {
    pub fn new(height: f64, distance: usize) -> Self {
        Self { height, distance }
    }
}

/// Manually chosen parameters of the illustrative sinusoid.
///
/// These are not estimated; the model is a qualitative match to the
/// seasonal residual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinusoidParams {
    /// Angular step per month index.
    pub period: f64,
    /// Phase shift in radians.
    pub phase: f64,
    pub amplitude: f64,
}

impl Default for SinusoidParams {
    fn default() -> Self {
        Self {
            period: 0.51,
            phase: 5.0,
            amplitude: 30_000.0,
        }
    }
}

/// Options for the decomposition stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionOptions {
    pub peaks: PeakOptions,
    pub model: SinusoidParams,
    /// Whether to emit the smoothed residual.
    pub smooth: bool,
}

impl Default for DecompositionOptions {
    fn default() -> Self {
        Self {
            peaks: PeakOptions::default(),
            model: SinusoidParams::default(),
            smooth: true,
        }
    }
}
