//! Integration tests for model-data artifacts.

use natality_model::{CategoryMatrix, CodeValue, Month, MonthlySeries};
use natality_report::{
    BIRTH_SERIES_FILE, ModelData, OutputLayout, ReportError, TIME_SERIES_FILE, read_model_data,
    write_json, write_model_data,
};
use natality_signal::KeyDateMark;

fn months(count: u32) -> Vec<Month> {
    (1..=count).map(|m| Month::new(2018, m).unwrap()).collect()
}

fn sample() -> ModelData {
    let axis = months(4);
    ModelData {
        births: MonthlySeries::new("births", axis.clone(), vec![300.0, 280.0, 310.0, 305.0])
            .unwrap(),
        days: MonthlySeries::new("days_in_month", axis.clone(), vec![31.0, 28.0, 31.0, 30.0])
            .unwrap(),
        extra: vec![
            MonthlySeries::new("births_per_day", axis.clone(), vec![9.5, 10.0, 10.0, 10.25])
                .unwrap(),
        ],
        categories: vec![CategoryMatrix {
            variable: "DPLURAL".to_string(),
            months: axis.clone(),
            codes: vec![CodeValue::Numeric(1), CodeValue::Numeric(2)],
            counts: vec![vec![290, 270, 300, 295], vec![10, 10, 10, 10]],
        }],
        key_dates: vec![KeyDateMark {
            event: "storm".to_string(),
            month: axis[1],
            index: 1,
            gestation: Month::new(2018, 12).unwrap(),
            gestation_index: None,
        }],
    }
}

#[test]
fn model_data_survives_a_write_and_read() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    layout.ensure_output_dirs().unwrap();

    let data = sample();
    let written = write_model_data(&layout, &data).unwrap();
    assert_eq!(written.len(), 6);
    assert!(layout.model_data_dir().join("series_births_per_day.json").exists());
    assert!(layout.model_data_dir().join("category_DPLURAL.json").exists());

    let read = read_model_data(&layout).unwrap();
    assert_eq!(read, data);
}

#[test]
fn writing_without_directories_fails() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path().join("missing"));
    let err = write_model_data(&layout, &sample()).unwrap_err();
    assert!(matches!(err, ReportError::Write { .. }));
}

#[test]
fn misaligned_series_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    layout.ensure_output_dirs().unwrap();
    write_model_data(&layout, &sample()).unwrap();

    let births = layout.model_data_dir().join(BIRTH_SERIES_FILE);
    write_json(&births, &[1.0, 2.0]).unwrap();
    let err = read_model_data(&layout).unwrap_err();
    assert!(matches!(
        err,
        ReportError::Misaligned {
            expected: 4,
            found: 2,
            ..
        }
    ));
}

#[test]
fn time_axis_is_iso_dates() {
    let dir = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(dir.path());
    layout.ensure_output_dirs().unwrap();
    write_model_data(&layout, &sample()).unwrap();

    let text = std::fs::read_to_string(layout.model_data_dir().join(TIME_SERIES_FILE)).unwrap();
    assert!(text.contains("\"2018-01-01\""));
}
