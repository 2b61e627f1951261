//! Variable extraction from the unified table.

use natality_model::CodeDictionary;
use polars::prelude::*;

use crate::data_utils::{filter_rows, is_blank, text_column};
use crate::date::DATE_COLUMN;
use crate::error::{Result, TransformError};

/// The `date` column plus the requested variables, restricted to rows where
/// every requested variable is present.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub frame: DataFrame,
    /// Uppercased variable codes, in request order.
    pub codes: Vec<String>,
    /// Dictionary label of each code.
    pub labels: Vec<String>,
    /// Rows removed for a missing value in any requested variable.
    pub dropped: usize,
}

impl Extraction {
    /// Label for one of the extracted codes.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.codes
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(code))
            .map(|idx| self.labels[idx].as_str())
    }
}

/// Selects `date` and `codes` from `table`, keeping only co-occurring rows.
pub fn extract_variables(
    table: &DataFrame,
    codes: &[String],
    dictionary: &CodeDictionary,
) -> Result<Extraction> {
    if codes.is_empty() {
        return Err(TransformError::NoCodes);
    }
    let codes: Vec<String> = codes.iter().map(|code| code.trim().to_uppercase()).collect();

    let present = table.get_column_names_owned();
    for column in std::iter::once(DATE_COLUMN).chain(codes.iter().map(String::as_str)) {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(TransformError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let labels = codes
        .iter()
        .map(|code| {
            dictionary
                .label(code)
                .map(str::to_string)
                .ok_or_else(|| TransformError::CodeNotFound { code: code.clone() })
        })
        .collect::<Result<Vec<_>>>()?;

    let selection: Vec<&str> = std::iter::once(DATE_COLUMN)
        .chain(codes.iter().map(String::as_str))
        .collect();
    let selected = table.select(selection.iter().copied())?;

    let mut mask = vec![true; selected.height()];
    for name in &selection {
        for (keep, value) in mask.iter_mut().zip(text_column(&selected, name)?) {
            if is_blank(value) {
                *keep = false;
            }
        }
    }
    let kept = mask.iter().filter(|keep| **keep).count();
    let dropped = mask.len() - kept;
    let frame = if dropped > 0 {
        filter_rows(&selected, &mask)?
    } else {
        selected
    };

    tracing::debug!(codes = ?codes, rows = kept, dropped, "extracted variables");
    Ok(Extraction {
        frame,
        codes,
        labels,
        dropped,
    })
}
