//! Integration tests for the output writers.

use std::path::Path;
use std::time::Duration;

use dq_core::{BatchResult, BatchStats};
use dq_ingest::CustomerTable;
use dq_model::{FieldGroup, FieldReport, FieldStatus, GroupOutcome, OverallStatus, RecordOutcome};
use dq_output::{RunReport, result_columns, write_augmented_csv, write_json_report};

const INPUT_COLUMNS: [&str; 10] = [
    "ID",
    "FIRST_NAME",
    "LAST_NAME",
    "STREET",
    "HOUSE_NUMBER",
    "POSTAL_CODE",
    "POSTAL_CITY",
    "EMAIL",
    "PHONE_NUMBER",
    "SEGMENT",
];

fn table(rows: &[[&str; 10]]) -> CustomerTable {
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| (!cell.is_empty()).then(|| (*cell).to_string()))
                .collect()
        })
        .collect();
    CustomerTable::from_rows(
        Path::new("customers.csv"),
        INPUT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows,
        "ID",
    )
    .unwrap()
}

fn valid_outcome(id: &str, row_index: usize) -> RecordOutcome {
    let groups = FieldGroup::ALL
        .iter()
        .map(|&group| GroupOutcome {
            group,
            fields: group
                .fields()
                .iter()
                .map(|&field| FieldReport::new(field, Some("value")))
                .collect(),
            valid: true,
            valid_after_correction: None,
            status: FieldStatus::Valid,
        })
        .collect();
    RecordOutcome {
        record_id: id.to_string(),
        row_index,
        groups,
        overall: OverallStatus::Valid,
        error: None,
    }
}

#[test]
fn test_result_header() {
    insta::assert_snapshot!(result_columns().join("\n"), @r"
    FIRST_NAME_DETECTED_ERRORS
    FIRST_NAME_CORRECTED
    FIRST_NAME_CORRECTED_ERRORS
    FIRST_NAME_UNCORRECTED_ERRORS
    FIRST_NAME_VALID
    FIRST_NAME_VALID_AFTER_CORRECTION
    FIRST_NAME_STATUS
    LAST_NAME_DETECTED_ERRORS
    LAST_NAME_CORRECTED
    LAST_NAME_CORRECTED_ERRORS
    LAST_NAME_UNCORRECTED_ERRORS
    LAST_NAME_VALID
    LAST_NAME_VALID_AFTER_CORRECTION
    LAST_NAME_STATUS
    STREET_DETECTED_ERRORS
    STREET_CORRECTED
    STREET_CORRECTED_ERRORS
    STREET_UNCORRECTED_ERRORS
    HOUSE_NUMBER_DETECTED_ERRORS
    HOUSE_NUMBER_CORRECTED
    HOUSE_NUMBER_CORRECTED_ERRORS
    HOUSE_NUMBER_UNCORRECTED_ERRORS
    POSTAL_CODE_DETECTED_ERRORS
    POSTAL_CODE_CORRECTED
    POSTAL_CODE_CORRECTED_ERRORS
    POSTAL_CODE_UNCORRECTED_ERRORS
    POSTAL_CITY_DETECTED_ERRORS
    POSTAL_CITY_CORRECTED
    POSTAL_CITY_CORRECTED_ERRORS
    POSTAL_CITY_UNCORRECTED_ERRORS
    ADDRESS_VALID
    ADDRESS_VALID_AFTER_CORRECTION
    ADDRESS_STATUS
    EMAIL_DETECTED_ERRORS
    EMAIL_CORRECTED
    EMAIL_CORRECTED_ERRORS
    EMAIL_UNCORRECTED_ERRORS
    EMAIL_VALID
    EMAIL_VALID_AFTER_CORRECTION
    EMAIL_STATUS
    PHONE_NUMBER_DETECTED_ERRORS
    PHONE_NUMBER_CORRECTED
    PHONE_NUMBER_CORRECTED_ERRORS
    PHONE_NUMBER_UNCORRECTED_ERRORS
    PHONE_NUMBER_VALID
    PHONE_NUMBER_VALID_AFTER_CORRECTION
    PHONE_NUMBER_STATUS
    OVERALL_STATUS
    PROCESSING_ERROR
    ");
}

#[test]
fn test_augmented_csv_keeps_input_columns() {
    let table = table(&[
        [
            "1",
            "Ana",
            "Novak",
            "Glavna ulica",
            "12",
            "1000",
            "Ljubljana",
            "ana.novak@gmail.com",
            "0038641123456",
            "retail",
        ],
        ["", "Bor", "", "", "", "", "", "", "", "b2b"],
    ]);
    let outcomes = vec![
        valid_outcome("1", 0),
        RecordOutcome::failed("", 1, "record at row 1 has no identifier"),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers_checked.csv");
    write_augmented_csv(&path, &table, &outcomes).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(&header[..INPUT_COLUMNS.len()], INPUT_COLUMNS);
    assert_eq!(header.len(), INPUT_COLUMNS.len() + result_columns().len());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    let column = |name: &str| header.iter().position(|c| c == name).unwrap();

    assert_eq!(&rows[0][column("SEGMENT")], "retail");
    assert_eq!(&rows[0][column("FIRST_NAME_STATUS")], "VALID");
    assert_eq!(&rows[0][column("FIRST_NAME_VALID")], "true");
    assert_eq!(&rows[0][column("FIRST_NAME_VALID_AFTER_CORRECTION")], "");
    assert_eq!(&rows[0][column("OVERALL_STATUS")], "VALID");
    assert_eq!(&rows[0][column("PROCESSING_ERROR")], "");

    assert_eq!(&rows[1][column("FIRST_NAME")], "Bor");
    assert_eq!(&rows[1][column("ADDRESS_STATUS")], "");
    assert_eq!(&rows[1][column("OVERALL_STATUS")], "ERROR");
    assert_eq!(
        &rows[1][column("PROCESSING_ERROR")],
        "record at row 1 has no identifier"
    );
}

#[test]
fn test_row_count_mismatch_is_rejected() {
    let table = table(&[["1", "Ana", "", "", "", "", "", "", "", ""]]);
    let dir = tempfile::tempdir().unwrap();
    let error = write_augmented_csv(&dir.path().join("out.csv"), &table, &[]).unwrap_err();
    assert_eq!(error.to_string(), "1 input rows but 0 outcomes");
}

#[test]
fn test_json_report_counts() {
    let outcomes = vec![
        valid_outcome("1", 0),
        RecordOutcome::failed("", 1, "record at row 1 has no identifier"),
    ];
    let result = BatchResult {
        stats: BatchStats::from_outcomes(&outcomes),
        outcomes,
        duration: Duration::from_millis(12),
    };
    let report = RunReport::new(Path::new("customers.csv"), &result);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_json_report(&path, &report).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["record_count"], 2);
    assert_eq!(json["failed_records"], 1);
    assert_eq!(json["duration_ms"], 12);
    assert_eq!(json["overall"]["VALID"], 1);
    assert_eq!(json["overall"]["ERROR"], 1);
    assert_eq!(json["groups"]["ADDRESS"]["VALID"], 1);
    assert!(json["generated_at"].is_string());
}
