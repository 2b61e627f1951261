//! Property tests for monthly aggregation.

use std::collections::BTreeMap;

use natality_model::{CodeDictionary, CodeEntry, ExtractionMode, Month};
use natality_transform::{
    DATE_COLUMN, category_matrix, extract_variables, normalize_dates, sum_series,
};
use polars::prelude::*;
use proptest::prelude::*;

fn dictionary() -> CodeDictionary {
    CodeDictionary::from_entries([CodeEntry {
        code: "MAGER9".to_string(),
        label: "Mother's Age Recode 9".to_string(),
        range: Some("1-9".to_string()),
    }])
}

/// (month 1..=12, optional code 1..=9) per record.
fn records() -> impl Strategy<Value = Vec<(u32, Option<u8>)>> {
    proptest::collection::vec((1u32..=12, proptest::option::of(1u8..=9)), 1..200)
}

fn birth_table(records: &[(u32, Option<u8>)]) -> DataFrame {
    let years: Vec<&str> = records.iter().map(|_| "2019").collect();
    let months: Vec<String> = records.iter().map(|(month, _)| month.to_string()).collect();
    let codes: Vec<Option<String>> = records
        .iter()
        .map(|(_, code)| code.map(|c| c.to_string()))
        .collect();
    df! {
        "DOB_YY" => years,
        "DOB_MM" => months,
        "MAGER9" => codes,
    }
    .unwrap()
}

proptest! {
    #[test]
    fn categorical_counts_sum_to_non_null_rows(records in records()) {
        prop_assume!(records.iter().any(|(_, code)| code.is_some()));

        let dated = normalize_dates(birth_table(&records), "DOB_YY", "DOB_MM").unwrap();
        let extraction =
            extract_variables(&dated.frame, &["MAGER9".to_string()], &dictionary()).unwrap();
        let matrix =
            category_matrix(&extraction.frame, "MAGER9", ExtractionMode::NumericCodes).unwrap();

        let mut expected: BTreeMap<Month, u64> = BTreeMap::new();
        for (month, code) in &records {
            if code.is_some() {
                *expected.entry(Month::new(2019, *month).unwrap()).or_insert(0) += 1;
            }
        }
        prop_assert_eq!(&matrix.months, &expected.keys().copied().collect::<Vec<_>>());
        prop_assert_eq!(matrix.month_totals(), expected.values().copied().collect::<Vec<_>>());
    }

    #[test]
    fn sum_mode_is_idempotent(records in records()) {
        let dated = normalize_dates(birth_table(&records), "DOB_YY", "DOB_MM").unwrap();
        let frame = dated.frame.select(["DOB_MM", DATE_COLUMN]).unwrap();
        let first = sum_series(&frame, "DOB_MM", "births").unwrap();

        let dates: Vec<String> = first.months.iter().map(ToString::to_string).collect();
        let values: Vec<String> = first.values.iter().map(|v| format!("{v}")).collect();
        let reaggregated = df! {
            DATE_COLUMN => dates,
            "DOB_MM" => values,
        }
        .unwrap();
        let second = sum_series(&reaggregated, "DOB_MM", "births").unwrap();

        prop_assert_eq!(first, second);
    }
}
