//! Seasonal analysis of monthly birth series.
//!
//! - **baseline**: per-year median baseline over explicit year segments
//! - **peaks**: local maxima with height and distance constraints
//! - **regression**: OLS trend with Pearson r and two-sided p-value
//! - **model**: hand-parameterized sinusoid plus linear trend
//! - **decompose**: the full baseline / residual / extrema / trend pass

pub mod baseline;
pub mod decompose;
pub mod error;
pub mod key_dates;
pub mod model;
pub mod peaks;
pub mod regression;
pub mod rhythm;
pub mod smooth;
pub mod yoy;

pub use baseline::{
    Baseline, YearSegment, calendar_segments, median, median_baseline, validate_segments,
    year_segments,
};
pub use decompose::{DecomposedSeries, decompose};
pub use error::{Result, SignalError};
pub use key_dates::{GESTATION_WEEKS, KeyDateMark, mark_key_dates};
pub use model::{RhythmModel, build_model, periodic_component};
pub use peaks::{find_peaks, find_troughs, local_maxima, local_minima};
pub use regression::{LinearTrend, linear_trend};
pub use rhythm::{OscillationStats, characterize, spacing};
pub use smooth::savgol_3_1;
pub use yoy::{YEAR_LAG, year_over_year};
