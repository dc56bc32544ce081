use dq_model::{FieldStatus, GroupOutcome, OverallStatus};

/// Overall status of a record from its group statuses.
///
/// Precedence: every group valid, then any group invalid after
/// correction, then any corrected, then any with open codes. A record
/// matching none of these (valid groups mixed with undetected errors) is
/// partially valid.
pub fn overall_status(groups: &[GroupOutcome]) -> OverallStatus {
    let any = |status: FieldStatus| groups.iter().any(|g| g.status == status);

    if groups.iter().all(|g| g.status == FieldStatus::Valid) {
        OverallStatus::Valid
    } else if any(FieldStatus::InvalidAfterCorrection) {
        OverallStatus::Invalid
    } else if any(FieldStatus::Corrected) {
        OverallStatus::Corrected
    } else if any(FieldStatus::UncorrectedErrors) {
        OverallStatus::Uncorrected
    } else {
        OverallStatus::PartiallyValid
    }
}
