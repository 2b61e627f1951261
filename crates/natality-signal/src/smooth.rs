//! Savitzky–Golay smoothing with a 3-point window and a linear fit.

/// Smooths `values` with a 3-point, first-order Savitzky–Golay filter.
///
/// Interior points become the mean of their window. The two edge points are
/// taken from the straight line fitted to the first (or last) three samples.
/// Series shorter than the window are returned unchanged.
pub fn savgol_3_1(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 3 {
        return values.to_vec();
    }
    let mut out = Vec::with_capacity(n);
    out.push((5.0 * values[0] + 2.0 * values[1] - values[2]) / 6.0);
    for window in values.windows(3) {
        out.push((window[0] + window[1] + window[2]) / 3.0);
    }
    out.push((5.0 * values[n - 1] + 2.0 * values[n - 2] - values[n - 3]) / 6.0);
    out
}
