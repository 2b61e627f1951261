//! Tests for natality-model types.

use natality_model::{
    AGE_BRACKETS, CategoryMatrix, CensusYear, CodeValue, DecompositionOptions, Month,
    MonthlySeries,
};

fn months(n: u32) -> Vec<Month> {
    (1..=n).map(|m| Month::new(2016, m).unwrap()).collect()
}

#[test]
fn misaligned_series_is_rejected() {
    let result = MonthlySeries::new("DPLURAL", months(3), vec![1.0, 2.0]);
    assert!(result.is_err());
}

#[test]
fn series_lookup_by_month() {
    let series = MonthlySeries::new("DPLURAL", months(3), vec![5.0, 6.0, 7.0]).unwrap();
    assert_eq!(series.value_for(Month::new(2016, 2).unwrap()), Some(6.0));
    assert_eq!(series.value_for(Month::new(2017, 2).unwrap()), None);
    assert_eq!(series.iter().count(), 3);
}

#[test]
fn category_matrix_totals() {
    let matrix = CategoryMatrix {
        variable: "MAGER9".to_string(),
        months: months(2),
        codes: vec![CodeValue::Numeric(1), CodeValue::Numeric(2)],
        counts: vec![vec![3, 0], vec![4, 5]],
    };
    assert_eq!(matrix.month_totals(), vec![7, 5]);
    assert_eq!(matrix.code_totals(), vec![3, 9]);
    assert_eq!(matrix.row(&CodeValue::Numeric(2)), Some(&[4u64, 5][..]));
    assert_eq!(matrix.row(&CodeValue::Numeric(9)), None);
}

#[test]
fn census_bracket_lookup_by_label() {
    let mut brackets = [0.0; 18];
    brackets[17] = 6_000_000.0;
    let census = CensusYear {
        year: 2021,
        total: 331_893_745,
        brackets,
    };
    assert_eq!(AGE_BRACKETS.len(), 18);
    assert_eq!(census.bracket("85 years and over"), Some(6_000_000.0));
    assert_eq!(census.bracket("90 years"), None);
}

#[test]
fn decomposition_options_deserialize_with_defaults() {
    let options: DecompositionOptions =
        serde_json::from_str(r#"{"peaks": {"height": 100.0}}"#).expect("parse options");
    assert_eq!(options.peaks.height, 100.0);
    assert_eq!(options.peaks.distance, 6);
    assert_eq!(options.model.period, 0.51);
    assert!(options.smooth);
}
