//! Spacing and amplitude statistics of detected extrema.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// Peak-to-trough amplitudes and spacings of a detected rhythm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillationStats {
    /// Peak-to-trough span `values[peak_i] - values[trough_i]` for the i-th
    /// peak and i-th trough. This is the full swing of the cycle, not the
    /// magnitude of the trough alone.
    pub amplitudes: Vec<f64>,
    /// Index distance between consecutive peaks.
    pub peak_spacing: Vec<usize>,
    /// Index distance between consecutive troughs.
    pub trough_spacing: Vec<usize>,
    /// Change between consecutive amplitudes.
    pub amplitude_changes: Vec<f64>,
}

/// Index differences between consecutive entries.
pub fn spacing(indices: &[usize]) -> Vec<usize> {
    indices.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Characterizes a rhythm from its extrema.
///
/// Both peaks and troughs need at least two detections.
pub fn characterize(values: &[f64], peaks: &[usize], troughs: &[usize]) -> Result<OscillationStats> {
    if peaks.len() < 2 {
        return Err(SignalError::InsufficientSignal {
            kind: "peaks",
            found: peaks.len(),
        });
    }
    if troughs.len() < 2 {
        return Err(SignalError::InsufficientSignal {
            kind: "troughs",
            found: troughs.len(),
        });
    }

    let amplitudes: Vec<f64> = peaks
        .iter()
        .zip(troughs)
        .map(|(&peak, &trough)| values[peak] - values[trough])
        .collect();
    let amplitude_changes = amplitudes.windows(2).map(|pair| pair[1] - pair[0]).collect();

    Ok(OscillationStats {
        amplitudes,
        peak_spacing: spacing(peaks),
        trough_spacing: spacing(troughs),
        amplitude_changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characterize_pairs_by_position() {
        let values = [0.0, 10.0, 0.0, -4.0, 0.0, 8.0, 0.0, -2.0, 0.0];
        let stats = characterize(&values, &[1, 5], &[3, 7]).unwrap();
        assert_eq!(stats.amplitudes, vec![14.0, 10.0]);
        assert_eq!(stats.peak_spacing, vec![4]);
        assert_eq!(stats.trough_spacing, vec![4]);
        assert_eq!(stats.amplitude_changes, vec![-4.0]);
    }

    #[test]
    fn test_amplitude_spans_peak_to_trough() {
        // Troughs above zero: the span differs from the trough magnitude.
        let values = [0.0, 9.0, 0.0, 3.0, 0.0, 7.0, 0.0, 5.0, 0.0];
        let stats = characterize(&values, &[1, 5], &[3, 7]).unwrap();
        assert_eq!(stats.amplitudes, vec![6.0, 2.0]);
    }

    #[test]
    fn test_single_peak_is_insufficient() {
        let err = characterize(&[0.0, 1.0, 0.0], &[1], &[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            SignalError::InsufficientSignal { kind: "peaks", found: 1 }
        ));
    }
}
