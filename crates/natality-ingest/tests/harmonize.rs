//! Integration tests for yearly schema harmonization.

use std::collections::BTreeSet;
use std::path::Path;

use natality_ingest::{IngestError, YearFile, YearTable, harmonize_files, harmonize_tables};
use polars::prelude::*;
use proptest::prelude::*;
use tempfile::TempDir;

const POOL: [&str; 6] = ["MAGER9", "DPLURAL", "PRECARE5", "MEDUC", "SEX", "BMI_R"];

fn required() -> Vec<String> {
    vec!["DOB_YY".to_string(), "DOB_MM".to_string()]
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn year_table(year: i32, columns: &[(String, bool)]) -> YearTable {
    let mut frame_columns = vec![
        Column::new("dob_yy".into(), [year.to_string()]),
        Column::new("DOB_MM".into(), ["1"]),
    ];
    for (name, lower) in columns {
        let name = if *lower {
            name.to_lowercase()
        } else {
            name.clone()
        };
        frame_columns.push(Column::new(name.as_str().into(), ["1"]));
    }
    YearTable {
        year,
        frame: DataFrame::new(frame_columns).unwrap(),
    }
}

fn column_subset() -> impl Strategy<Value = Vec<(String, bool)>> {
    proptest::sample::subsequence(POOL.to_vec(), 0..=POOL.len()).prop_flat_map(|names| {
        let len = names.len();
        proptest::collection::vec(any::<bool>(), len).prop_map(move |cases| {
            names
                .iter()
                .zip(cases)
                .map(|(name, lower)| (name.to_string(), lower))
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn harmonized_columns_are_the_exact_intersection(
        subsets in proptest::collection::vec(column_subset(), 1..5)
    ) {
        let mut expected: Option<BTreeSet<String>> = None;
        let mut tables = Vec::new();
        for (offset, subset) in subsets.iter().enumerate() {
            let mut names: BTreeSet<String> =
                subset.iter().map(|(name, _)| name.to_uppercase()).collect();
            names.insert("DOB_YY".to_string());
            names.insert("DOB_MM".to_string());
            expected = Some(match expected {
                Some(acc) => acc.intersection(&names).cloned().collect(),
                None => names,
            });
            tables.push(year_table(2015 + offset as i32, subset));
        }

        let harmonized = harmonize_tables(tables, &required()).unwrap();
        let actual: BTreeSet<String> = harmonized
            .frame
            .get_column_names_owned()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        prop_assert_eq!(&actual, expected.as_ref().unwrap());
        prop_assert_eq!(harmonized.frame.height(), subsets.len());
    }
}

#[test]
fn harmonize_files_validates_headers_before_loading() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        YearFile {
            year: 2015,
            path: write(dir.path(), "natl2015.csv", "dob_yy,dob_mm,mager9\n2015,1,3\n"),
        },
        YearFile {
            year: 2016,
            path: write(dir.path(), "natl2016.csv", "DOB_YY,DOB_MM\n2016,2\n"),
        },
    ];

    let err = harmonize_files(
        &files,
        &["DOB_YY".to_string(), "DOB_MM".to_string(), "MAGER9".to_string()],
    )
    .unwrap_err();
    match err {
        IngestError::MissingRequired { code, years } => {
            assert_eq!(code, "MAGER9");
            assert_eq!(years, vec![2016]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn harmonize_files_stacks_descending_years() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        YearFile {
            year: 2015,
            path: write(
                dir.path(),
                "natl2015.csv",
                "dob_yy,dob_mm,mager9,only2015\n2015,1,3,x\n2015,2,4,y\n",
            ),
        },
        YearFile {
            year: 2016,
            path: write(dir.path(), "natl2016.csv", "DOB_YY,DOB_MM,MAGER9\n2016,5,2\n"),
        },
    ];

    let harmonized = harmonize_files(&files, &required()).unwrap();
    assert_eq!(harmonized.columns, vec!["DOB_MM", "DOB_YY", "MAGER9"]);
    assert_eq!(harmonized.rows_per_year, vec![(2016, 1), (2015, 2)]);

    let years: Vec<Option<&str>> = harmonized
        .frame
        .column("DOB_YY")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(years, vec![Some("2016"), Some("2015"), Some("2015")]);
}

#[test]
fn harmonize_files_reports_missing_file() {
    let files = vec![YearFile {
        year: 2015,
        path: Path::new("/nonexistent/natl2015.csv").to_path_buf(),
    }];
    let err = harmonize_files(&files, &required()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn harmonize_files_rejects_case_colliding_headers() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        YearFile {
            year: 2015,
            path: write(dir.path(), "natl2015.csv", "DOB_YY,DOB_MM,mager9\n2015,1,3\n"),
        },
        YearFile {
            year: 2016,
            path: write(
                dir.path(),
                "natl2016.csv",
                "dob_yy,dob_mm,Mager9,MAGER9\n2016,1,3,3\n",
            ),
        },
    ];

    let err = harmonize_files(&files, &required()).unwrap_err();
    match err {
        IngestError::DuplicateColumn { year, column } => {
            assert_eq!(year, 2016);
            assert_eq!(column, "MAGER9");
        }
        other => panic!("unexpected error: {other}"),
    }
}
