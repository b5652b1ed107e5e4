//! Loading launch records from real files in every supported format.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanArray, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::{Builder, NamedTempFile};

use launch_dash::data::columns::ColumnMapping;
use launch_dash::data::loader::{load, load_file};
use launch_dash::data::model::Outcome;
use launch_dash::error::DataLoadError;

const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,3,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
3,4,VAFB SLC-4E,1,9600.0,F9 B4 B1041.1,B4
";

fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_launch_csv() {
    let file = temp_with(".csv", CSV);
    let ds = load(file.path()).unwrap();

    assert_eq!(ds.len(), 4);
    assert_eq!(ds.min_payload(), Some(0.0));
    assert_eq!(ds.max_payload(), Some(9600.0));
    assert_eq!(ds.site_names(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);

    let first = &ds.records()[0];
    assert_eq!(first.flight_number, Some(1));
    assert_eq!(first.outcome, Outcome::Failure);
    assert_eq!(first.booster_category, "v1.0");
}

#[test]
fn missing_required_column_is_fatal() {
    let file = temp_with(
        ".csv",
        "Launch Site,Payload Mass (kg),Booster Version Category\nA,1.0,FT\n",
    );
    match load(file.path()) {
        Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, "class"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn flight_number_column_is_optional() {
    let file = temp_with(
        ".csv",
        "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,100,FT\n",
    );
    let ds = load(file.path()).unwrap();
    assert_eq!(ds.records()[0].flight_number, None);
}

#[test]
fn bad_outcome_reports_row_and_column() {
    let file = temp_with(
        ".csv",
        "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,100,FT\nB,3,200,FT\n",
    );
    match load(file.path()) {
        Err(DataLoadError::InvalidValue { row, column, value, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "class");
            assert_eq!(value, "3");
        }
        other => panic!("expected invalid value, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load(Path::new("/definitely/not/here/launches.csv")).unwrap_err();
    assert!(matches!(err, DataLoadError::Io { .. }));
}

#[test]
fn custom_column_mapping() {
    let file = temp_with(
        ".csv",
        "site,ok,kg,family\nLC-1,1,300,Block\nLC-1,0,400,Block\n",
    );
    let mapping = ColumnMapping {
        site: "site".into(),
        outcome: "ok".into(),
        payload_mass_kg: "kg".into(),
        booster_category: "family".into(),
        flight_number: None,
    };
    let ds = load_file(file.path(), &mapping).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.site_names(), ["LC-1"]);
}

#[test]
fn column_mapping_from_json_file() {
    let file = temp_with(".json", r#"{ "site": "Site", "flight_number": null }"#);
    let mapping = ColumnMapping::from_json_file(file.path()).unwrap();
    assert_eq!(mapping.site, "Site");
    assert_eq!(mapping.outcome, "class");
    assert_eq!(mapping.flight_number, None);
}

#[test]
fn loads_records_oriented_json() {
    let file = temp_with(
        ".json",
        r#"[
            {"Flight Number": 1, "Launch Site": "A", "class": 1,
             "Payload Mass (kg)": 500.0, "Booster Version Category": "v1"},
            {"Launch Site": "B", "class": 0,
             "Payload Mass (kg)": "800", "Booster Version Category": "v2"}
        ]"#,
    );
    let ds = load(file.path()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records()[0].flight_number, Some(1));
    assert_eq!(ds.records()[1].flight_number, None);
    assert_eq!(ds.records()[1].payload_mass_kg, 800.0);
}

#[test]
fn empty_table_loads_alike_from_csv_and_json() {
    let csv = temp_with(
        ".csv",
        "Launch Site,class,Payload Mass (kg),Booster Version Category\n",
    );
    let json = temp_with(".json", "[]");

    for file in [&csv, &json] {
        let ds = load(file.path()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.min_payload(), None);
        assert!(ds.site_names().is_empty());
    }
}

#[test]
fn json_must_be_an_array() {
    let file = temp_with(".json", r#"{"Launch Site": "A"}"#);
    assert!(matches!(load(file.path()), Err(DataLoadError::JsonLayout)));
}

#[test]
fn json_missing_key_everywhere_is_a_missing_column() {
    let file = temp_with(
        ".json",
        r#"[{"Launch Site": "A", "class": 1, "Payload Mass (kg)": 1.0}]"#,
    );
    match load(file.path()) {
        Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, "Booster Version Category"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn loads_parquet_with_mixed_physical_types() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int32, true),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int32, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from(vec![Some(10), None])),
            Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
            Arc::new(Int32Array::from(vec![1, 0])),
            Arc::new(Float64Array::from(vec![3500.5, 9600.0])),
            Arc::new(StringArray::from(vec!["FT", "B4"])),
        ],
    )
    .unwrap();

    let file = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load(file.path()).unwrap();
    assert_eq!(ds.len(), 2);
    let first = &ds.records()[0];
    assert_eq!(first.site, "KSC LC-39A");
    assert_eq!(first.payload_mass_kg, 3500.5);
    assert_eq!(first.outcome, Outcome::Success);
    assert_eq!(first.flight_number, Some(10));
    assert_eq!(ds.records()[1].flight_number, None);
}

#[test]
fn parquet_missing_column_is_fatal() {
    let schema = Arc::new(Schema::new(vec![Field::new(
        "Launch Site",
        DataType::Utf8,
        false,
    )]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(StringArray::from(vec!["A"]))],
    )
    .unwrap();

    let file = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    assert!(matches!(
        load(file.path()),
        Err(DataLoadError::MissingColumn(col)) if col == "class"
    ));
}

#[test]
fn parquet_boolean_class_column() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Boolean, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["KSC LC-39A", "VAFB SLC-4E"])),
            Arc::new(BooleanArray::from(vec![true, false])),
            Arc::new(Float64Array::from(vec![3500.0, 9600.0])),
            Arc::new(StringArray::from(vec!["FT", "B4"])),
        ],
    )
    .unwrap();

    let file = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load(file.path()).unwrap();
    assert_eq!(ds.records()[0].outcome, Outcome::Success);
    assert_eq!(ds.records()[1].outcome, Outcome::Failure);
}
