//! Snapshot test for the frequency table artifact.

use natality_ingest::FrequencyTable;
use polars::prelude::*;

#[test]
fn frequency_table_csv_is_stable() {
    let frame = df! {
        "DOB_YY" => ["2016", "2015", "2016", "2016", "2015"],
        "DOB_MM" => ["1", "12", "1", "7", "NA"],
    }
    .unwrap();

    let table = FrequencyTable::from_frame(&frame, "DOB_YY", "DOB_MM").unwrap();
    assert_eq!(table.skipped, 1);

    let text = table.to_csv_string("DOB_YY").unwrap();
    insta::assert_snapshot!(text, @r"
    DOB_YY,1,2,3,4,5,6,7,8,9,10,11,12
    2015,0,0,0,0,0,0,0,0,0,0,0,1
    2016,2,0,0,0,0,0,1,0,0,0,0,0
    ");
}
