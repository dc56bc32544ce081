//! Result columns appended to every input row.

use std::iter;

use dq_model::{FieldGroup, FieldReport, RecordOutcome};

/// Per-field columns, suffixed to the field's input column name.
const FIELD_SUFFIXES: [&str; 4] = [
    "DETECTED_ERRORS",
    "CORRECTED",
    "CORRECTED_ERRORS",
    "UNCORRECTED_ERRORS",
];

/// Per-group columns, suffixed to the group's column prefix.
const GROUP_SUFFIXES: [&str; 3] = ["VALID", "VALID_AFTER_CORRECTION", "STATUS"];

pub const OVERALL_STATUS_COLUMN: &str = "OVERALL_STATUS";
pub const PROCESSING_ERROR_COLUMN: &str = "PROCESSING_ERROR";

/// Names of the result columns, in output order.
///
/// Each group contributes its fields' detection columns followed by its
/// own status triple; the address group lists four sub-fields under one
/// `ADDRESS_*` triple.
pub fn result_columns() -> Vec<String> {
    let mut columns = Vec::new();
    for group in FieldGroup::ALL {
        for field in group.fields() {
            columns.extend(
                FIELD_SUFFIXES
                    .iter()
                    .map(|suffix| format!("{}_{suffix}", field.column())),
            );
        }
        columns.extend(
            GROUP_SUFFIXES
                .iter()
                .map(|suffix| format!("{}_{suffix}", group.column_prefix())),
        );
    }
    columns.push(OVERALL_STATUS_COLUMN.to_string());
    columns.push(PROCESSING_ERROR_COLUMN.to_string());
    columns
}

/// Cells matching [`result_columns`] for one record.
///
/// Stages that did not run leave their cells empty, as does every field
/// of a failed record.
pub fn result_cells(outcome: &RecordOutcome) -> Vec<String> {
    let mut cells = Vec::new();
    for group in FieldGroup::ALL {
        let unit = outcome.group(group);
        for &field in group.fields() {
            match unit.and_then(|unit| unit.field(field)) {
                Some(report) => push_field_cells(&mut cells, report),
                None => cells.extend(iter::repeat_n(String::new(), FIELD_SUFFIXES.len())),
            }
        }
        match unit {
            Some(unit) => {
                cells.push(bool_cell(Some(unit.valid)));
                cells.push(bool_cell(unit.valid_after_correction));
                cells.push(unit.status.as_str().to_string());
            }
            None => cells.extend(iter::repeat_n(String::new(), GROUP_SUFFIXES.len())),
        }
    }
    cells.push(outcome.overall.as_str().to_string());
    cells.push(outcome.error.clone().unwrap_or_default());
    cells
}

fn push_field_cells(cells: &mut Vec<String>, report: &FieldReport) {
    let correction = &report.correction;
    cells.push(report.detected.to_string());
    cells.push(correction.corrected_value.clone().unwrap_or_default());
    cells.push(correction.corrected.to_string());
    cells.push(correction.uncorrected.to_string());
}

fn bool_cell(value: Option<bool>) -> String {
    value.map(|flag| flag.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use dq_model::{
        CodeSet, CorrectionResult, ErrorCode, Field, FieldStatus, GroupOutcome, OverallStatus,
    };

    use super::*;

    fn valid_group(group: FieldGroup) -> GroupOutcome {
        GroupOutcome {
            group,
            fields: group
                .fields()
                .iter()
                .map(|&field| FieldReport::new(field, Some("x")))
                .collect(),
            valid: true,
            valid_after_correction: None,
            status: FieldStatus::Valid,
        }
    }

    #[test]
    fn test_cells_line_up_with_columns() {
        let outcome = RecordOutcome {
            record_id: "1".to_string(),
            row_index: 0,
            groups: FieldGroup::ALL.iter().map(|&g| valid_group(g)).collect(),
            overall: OverallStatus::Valid,
            error: None,
        };
        assert_eq!(result_cells(&outcome).len(), result_columns().len());

        let failed = RecordOutcome::failed("", 3, "record at row 3 has no identifier");
        let cells = result_cells(&failed);
        assert_eq!(cells.len(), result_columns().len());
        assert_eq!(cells[cells.len() - 2], "ERROR");
        assert!(cells[..cells.len() - 2].iter().all(String::is_empty));
    }

    #[test]
    fn test_corrected_email_cells() {
        let detected: CodeSet = [ErrorCode::EmailWhitespace, ErrorCode::EmailUncommonDomain]
            .into_iter()
            .collect();
        let mut report = FieldReport::new(Field::Email, Some(" ana@gmial.com"));
        report.detected = detected.clone();
        report.correction = CorrectionResult {
            corrected_value: Some("ana@gmail.com".to_string()),
            corrected: detected,
            uncorrected: CodeSet::new(),
        };
        let mut groups: Vec<GroupOutcome> =
            FieldGroup::ALL.iter().map(|&g| valid_group(g)).collect();
        groups[3] = GroupOutcome {
            group: FieldGroup::Email,
            fields: vec![report],
            valid: false,
            valid_after_correction: Some(true),
            status: FieldStatus::Corrected,
        };
        let outcome = RecordOutcome {
            record_id: "7".to_string(),
            row_index: 6,
            groups,
            overall: OverallStatus::Corrected,
            error: None,
        };

        let columns = result_columns();
        let cells = result_cells(&outcome);
        let cell = |name: &str| {
            let index = columns.iter().position(|c| c == name).expect("column");
            cells[index].as_str()
        };
        assert_eq!(cell("EMAIL_DETECTED_ERRORS"), "2102;2110");
        assert_eq!(cell("EMAIL_CORRECTED"), "ana@gmail.com");
        assert_eq!(cell("EMAIL_UNCORRECTED_ERRORS"), "");
        assert_eq!(cell("EMAIL_VALID"), "false");
        assert_eq!(cell("EMAIL_VALID_AFTER_CORRECTION"), "true");
        assert_eq!(cell("EMAIL_STATUS"), "CORRECTED");
        assert_eq!(cell("ADDRESS_VALID_AFTER_CORRECTION"), "");
        assert_eq!(cell("OVERALL_STATUS"), "CORRECTED");
    }
}
