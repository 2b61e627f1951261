//! Local-extremum detection on sampled signals.
//!
//! Peaks are strict local maxima: a sample (or a flat run of equal samples)
//! higher than both neighbours. Flat runs report their midpoint, rounded
//! down. The first and last samples are never peaks.

use natality_model::PeakOptions;

/// Indices of all local maxima, ascending.
pub fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }
    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Local maxima of at least `options.height`, pruned to `options.distance`.
///
/// When two maxima are closer than the minimum distance the higher one is
/// kept; equal heights keep the later index, as scipy's `find_peaks` does.
pub fn find_peaks(values: &[f64], options: &PeakOptions) -> Vec<usize> {
    let candidates: Vec<usize> = local_maxima(values)
        .into_iter()
        .filter(|&idx| values[idx] >= options.height)
        .collect();
    select_by_distance(values, candidates, options.distance)
}

/// Peaks of the negated signal.
pub fn find_troughs(values: &[f64], options: &PeakOptions) -> Vec<usize> {
    let negated: Vec<f64> = values.iter().map(|v| -v).collect();
    find_peaks(&negated, options)
}

/// Local minima without thresholds.
pub fn local_minima(values: &[f64]) -> Vec<usize> {
    let negated: Vec<f64> = values.iter().map(|v| -v).collect();
    local_maxima(&negated)
}

fn select_by_distance(values: &[f64], peaks: Vec<usize>, distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks;
    }
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| {
        values[peaks[b]]
            .total_cmp(&values[peaks[a]])
            .then(peaks[b].cmp(&peaks[a]))
    });

    let mut keep = vec![true; peaks.len()];
    for &j in &order {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(idx, kept)| kept.then_some(idx))
        .collect()
}
