//! Ordinary least squares against the ordinal index.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Result, SignalError};

/// Straight-line fit `y = slope · i + intercept` over `i = 0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r: f64,
    /// Two-sided p-value for a zero slope.
    pub p_value: f64,
    pub n: usize,
}

impl LinearTrend {
    pub fn at(&self, index: usize) -> f64 {
        self.slope * index as f64 + self.intercept
    }

    /// The fitted line over `0..len`.
    pub fn line(&self, len: usize) -> Vec<f64> {
        (0..len).map(|idx| self.at(idx)).collect()
    }
}

/// Fits `values` against their index.
///
/// A constant series has r = 0 and p = 1; a perfect fit has p = 0.
pub fn linear_trend(values: &[f64]) -> Result<LinearTrend> {
    let n = values.len();
    if n < 3 {
        return Err(SignalError::InsufficientData {
            what: "linear trend",
            needed: 3,
            found: n,
        });
    }

    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (idx, y) in values.iter().enumerate() {
        let dx = idx as f64 - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };

    let dof = nf - 2.0;
    let p_value = if (1.0 - r.abs()) <= f64::EPSILON {
        0.0
    } else {
        let t = r * (dof / ((1.0 - r) * (1.0 + r))).sqrt();
        let dist = StudentsT::new(0.0, 1.0, dof).map_err(|e| SignalError::Distribution {
            message: e.to_string(),
        })?;
        (2.0 * dist.sf(t.abs())).min(1.0)
    };

    Ok(LinearTrend {
        slope,
        intercept,
        r,
        p_value,
        n,
    })
}
