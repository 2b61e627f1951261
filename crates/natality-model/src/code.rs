use std::fmt;

use serde::{Deserialize, Serialize};

/// A category code observed for a natality variable.
///
/// Numeric codes order numerically and labels lexicographically, so a
/// sorted `Vec<CodeValue>` is the category axis of a count matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeValue {
    Numeric(i64),
    Label(String),
}

impl CodeValue {
    /// Parses a numeric code, ignoring surrounding whitespace.
    pub fn parse_numeric(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(CodeValue::Numeric)
    }

    pub fn label(raw: &str) -> Self {
        CodeValue::Label(raw.trim().to_string())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodeValue::Numeric(value) => Some(*value),
            CodeValue::Label(_) => None,
        }
    }
}

impl fmt::Display for CodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeValue::Numeric(value) => write!(f, "{value}"),
            CodeValue::Label(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_sort_numerically() {
        let mut codes: Vec<CodeValue> = ["10", "2", " 1 "]
            .iter()
            .filter_map(|raw| CodeValue::parse_numeric(raw))
            .collect();
        codes.sort();
        assert_eq!(
            codes,
            vec![
                CodeValue::Numeric(1),
                CodeValue::Numeric(2),
                CodeValue::Numeric(10)
            ]
        );
    }

    #[test]
    fn labels_sort_lexicographically() {
        let mut codes = vec![
            CodeValue::label("Y"),
            CodeValue::label("U"),
            CodeValue::label("N"),
        ];
        codes.sort();
        let rendered: Vec<String> = codes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["N", "U", "Y"]);
    }

    #[test]
    fn untagged_serde_keeps_numbers_numeric() {
        let json = serde_json::to_string(&vec![CodeValue::Numeric(3), CodeValue::label("Y")])
            .expect("serialize codes");
        assert_eq!(json, r#"[3,"Y"]"#);
    }
}
