//! DataFrame value access shared by the transformation stages.

use polars::prelude::*;

use crate::error::{Result, TransformError};

/// Text values of a column; a missing column is reported by name.
pub fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<Vec<Option<&'a str>>> {
    let column = df
        .column(name)
        .map_err(|_| TransformError::MissingColumn {
            column: name.to_string(),
        })?;
    Ok(column.str()?.into_iter().collect())
}

/// Null, empty and whitespace-only values all count as missing.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Keeps the rows where `mask` is true.
pub fn filter_rows(df: &DataFrame, mask: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("mask".into(), mask);
    Ok(df.filter(&mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some(" 3 ")));
    }

    #[test]
    fn test_text_column_missing() {
        let df = df! { "A" => ["x"] }.unwrap();
        assert!(matches!(
            text_column(&df, "B"),
            Err(TransformError::MissingColumn { .. })
        ));
        assert_eq!(text_column(&df, "A").unwrap(), vec![Some("x")]);
    }
}
