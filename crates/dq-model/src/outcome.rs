//! Per-field, per-group and per-record pipeline outcomes.

use serde::{Deserialize, Serialize};

use crate::code_set::CodeSet;
use crate::correction::CorrectionResult;
use crate::field::{Field, FieldGroup};
use crate::status::{FieldStatus, OverallStatus};

/// Detection and correction of one field.
///
/// When the original value validates, detection is not run and both
/// `detected` and `correction` stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReport {
    pub field: Field,
    pub original: Option<String>,
    pub detected: CodeSet,
    pub correction: CorrectionResult,
}

impl FieldReport {
    pub fn new(field: Field, original: Option<&str>) -> Self {
        Self {
            field,
            original: original.map(str::to_string),
            detected: CodeSet::new(),
            correction: CorrectionResult::default(),
        }
    }

    /// The value the re-validation stage sees: the corrected value, or the
    /// original when nothing was written back.
    pub fn effective_value(&self) -> Option<&str> {
        self.correction
            .corrected_value
            .as_deref()
            .or(self.original.as_deref())
    }
}

/// Outcome of one status group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOutcome {
    pub group: FieldGroup,
    pub fields: Vec<FieldReport>,
    /// Validation of the original value(s).
    pub valid: bool,
    /// Validation after correction; `None` when that stage was not reached.
    pub valid_after_correction: Option<bool>,
    pub status: FieldStatus,
}

impl GroupOutcome {
    pub fn field(&self, field: Field) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.field == field)
    }

    /// Union of the detected codes of every field in the group.
    pub fn detected(&self) -> CodeSet {
        let mut codes = CodeSet::new();
        for report in &self.fields {
            codes.extend(&report.detected);
        }
        codes
    }
}

/// Outcome of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub record_id: String,
    pub row_index: usize,
    pub groups: Vec<GroupOutcome>,
    pub overall: OverallStatus,
    /// Processing error of a degraded record.
    pub error: Option<String>,
}

impl RecordOutcome {
    /// A degraded outcome for a record whose processing failed.
    pub fn failed(
        record_id: impl Into<String>,
        row_index: usize,
        error: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            row_index,
            groups: Vec::new(),
            overall: OverallStatus::Error,
            error: Some(error.into()),
        }
    }

    pub fn group(&self, group: FieldGroup) -> Option<&GroupOutcome> {
        self.groups.iter().find(|outcome| outcome.group == group)
    }

    pub fn status(&self, group: FieldGroup) -> Option<FieldStatus> {
        self.group(group).map(|outcome| outcome.status)
    }

    pub fn field(&self, field: Field) -> Option<&FieldReport> {
        self.group(field.group())
            .and_then(|outcome| outcome.field(field))
    }

    pub fn is_failed(&self) -> bool {
        self.overall == OverallStatus::Error
    }
}
