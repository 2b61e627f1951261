//! Per-year median baseline and seasonal residual.

use natality_model::Month;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// A run of series indices `start..end` attributed to one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSegment {
    pub year: i32,
    pub start: usize,
    pub end: usize,
}

impl YearSegment {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One segment per calendar year present on the month axis.
pub fn year_segments(months: &[Month]) -> Vec<YearSegment> {
    let mut segments: Vec<YearSegment> = Vec::new();
    for (idx, month) in months.iter().enumerate() {
        match segments.last_mut() {
            Some(last) if last.year == month.year() => last.end = idx + 1,
            _ => segments.push(YearSegment {
                year: month.year(),
                start: idx,
                end: idx + 1,
            }),
        }
    }
    segments
}

/// Calendar-year segments for a series of whole years.
///
/// The series must start in January and every year must span 12 months.
/// Partial years need explicit segments from the caller.
pub fn calendar_segments(months: &[Month]) -> Result<Vec<YearSegment>> {
    let Some(first) = months.first() else {
        return Err(SignalError::EmptySeries);
    };
    if first.month() != 1 {
        return Err(SignalError::InvalidSegments {
            reason: format!("series starts in {first}, not in January"),
        });
    }
    let segments = year_segments(months);
    if let Some(partial) = segments.iter().find(|segment| segment.len() != 12) {
        return Err(SignalError::InvalidSegments {
            reason: format!(
                "year {} spans {} months; supply explicit segments for partial years",
                partial.year,
                partial.len()
            ),
        });
    }
    Ok(segments)
}

/// Segments must be non-empty, contiguous and cover `0..len` exactly.
pub fn validate_segments(segments: &[YearSegment], len: usize) -> Result<()> {
    let invalid = |reason: String| -> Result<()> { Err(SignalError::InvalidSegments { reason }) };
    if segments.is_empty() {
        return invalid("no segments".to_string());
    }
    let mut cursor = 0;
    for segment in segments {
        if segment.is_empty() {
            return invalid(format!("segment for {} is empty", segment.year));
        }
        if segment.start != cursor {
            return invalid(format!(
                "segment for {} starts at {} but the previous one ends at {cursor}",
                segment.year, segment.start
            ));
        }
        if segment.end > len {
            return invalid(format!(
                "segment for {} ends at {} beyond series length {len}",
                segment.year, segment.end
            ));
        }
        cursor = segment.end;
    }
    if cursor != len {
        return invalid(format!("segments cover {cursor} of {len} points"));
    }
    Ok(())
}

/// Median with the midpoint convention for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Per-segment medians and their broadcast over the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub segments: Vec<YearSegment>,
    pub medians: Vec<f64>,
    pub values: Vec<f64>,
}

impl Baseline {
    /// `raw - baseline`, point by point.
    pub fn residual(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter().zip(&self.values).map(|(x, b)| x - b).collect()
    }
}

pub fn median_baseline(raw: &[f64], segments: &[YearSegment]) -> Result<Baseline> {
    validate_segments(segments, raw.len())?;
    let mut medians = Vec::with_capacity(segments.len());
    let mut values = Vec::with_capacity(raw.len());
    for segment in segments {
        let slice = &raw[segment.start..segment.end];
        let value = median(slice).ok_or(SignalError::EmptySeries)?;
        medians.push(value);
        values.extend(std::iter::repeat_n(value, slice.len()));
    }
    Ok(Baseline {
        segments: segments.to_vec(),
        medians,
        values,
    })
}
