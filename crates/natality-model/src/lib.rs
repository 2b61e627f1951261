pub mod census;
pub mod code;
pub mod dictionary;
pub mod enums;
pub mod error;
pub mod month;
pub mod options;
pub mod series;

pub use census::{AGE_BRACKETS, BRACKET_COUNT, CensusYear, FERTILE_BRACKETS};
pub use code::CodeValue;
pub use dictionary::{CodeDictionary, CodeEntry, KeyDate};
pub use enums::{CensusProfile, ExtractionMode};
pub use error::{ModelError, Result};
pub use month::Month;
pub use options::{DecompositionOptions, PeakOptions, SinusoidParams};
pub use series::{CategoryMatrix, MonthlySeries};
