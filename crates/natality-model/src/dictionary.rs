//! Reference tables: variable code dictionary and key-date annotations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A documented natality variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub label: String,
    /// Free-text validity/range descriptor from the documentation table.
    pub range: Option<String>,
}

/// Code → label lookup, keyed by uppercase code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeDictionary {
    entries: BTreeMap<String, CodeEntry>,
}

impl CodeDictionary {
    /// Builds a dictionary; later duplicates of a code are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = CodeEntry>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.entry(entry.code.trim().to_uppercase()).or_insert(entry);
        }
        Self { entries: map }
    }

    pub fn get(&self, code: &str) -> Option<&CodeEntry> {
        self.entries.get(&code.trim().to_uppercase())
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.get(code).map(|entry| entry.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeEntry> {
        self.entries.values()
    }
}

/// An annotated event (e.g. a public-health milestone) to mark on the month axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDate {
    pub event: String,
    pub date: NaiveDate,
    /// Whether the event is flagged for display.
    pub plot: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_first_wins() {
        let dictionary = CodeDictionary::from_entries([
            CodeEntry {
                code: "mager9".to_string(),
                label: "Mother's Age Recode 9".to_string(),
                range: Some("1-9".to_string()),
            },
            CodeEntry {
                code: "MAGER9".to_string(),
                label: "duplicate".to_string(),
                range: None,
            },
        ]);
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.label("MAGER9"), Some("Mother's Age Recode 9"));
        assert_eq!(dictionary.label(" Mager9 "), Some("Mother's Age Recode 9"));
        assert!(dictionary.get("DPLURAL").is_none());
    }
}
