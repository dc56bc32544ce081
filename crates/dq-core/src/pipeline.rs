//! Field pipelines.
//!
//! Every status group runs the same stages in a fixed order:
//!
//! 1. **Validate** the original value(s); a valid unit stops here.
//! 2. **Detect** error codes; nothing detected means an undetected error.
//! 3. **Correct** the detected codes; a code left open stops here.
//! 4. **Re-validate** the corrected value(s).
//!
//! A single field and the address group differ only in how the stages
//! reduce over their fields.

use dq_model::{CodeSet, CustomerRecord, Field, FieldGroup, FieldReport, FieldStatus, GroupOutcome};
use dq_rules::{correct, detect};
use dq_validate::AddressParts;
use tracing::trace;

use crate::context::PipelineContext;

/// Stage results that decide a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageFlags {
    pub valid: bool,
    pub detected: bool,
    pub uncorrected: bool,
}

/// The five-state resolution.
///
/// `revalidate` runs only when every detected code was corrected. Returns
/// the status and the re-validation result, if it ran.
pub fn resolve_status(
    flags: StageFlags,
    revalidate: impl FnOnce() -> bool,
) -> (FieldStatus, Option<bool>) {
    if flags.valid {
        return (FieldStatus::Valid, None);
    }
    if !flags.detected {
        return (FieldStatus::UndetectedErrors, None);
    }
    if flags.uncorrected {
        return (FieldStatus::UncorrectedErrors, None);
    }
    if revalidate() {
        (FieldStatus::Corrected, Some(true))
    } else {
        (FieldStatus::InvalidAfterCorrection, Some(false))
    }
}

/// Detect and correct one field.
pub fn inspect_field(field: Field, value: Option<&str>, ctx: &PipelineContext<'_>) -> FieldReport {
    let mut report = FieldReport::new(field, value);
    report.detected = detect(field, value, &ctx.rules);
    report.correction = correct(field, value, &report.detected, &ctx.rules);
    report
}

/// Run a stand-alone field (names, email, phone) through the pipeline.
pub fn run_field(field: Field, value: Option<&str>, ctx: &PipelineContext<'_>) -> GroupOutcome {
    let validate = |v: Option<&str>| ctx.validators.field(field, v).unwrap_or(false);

    let valid = validate(value);
    let report = if valid {
        FieldReport::new(field, value)
    } else {
        inspect_field(field, value, ctx)
    };

    let flags = StageFlags {
        valid,
        detected: !report.detected.is_empty(),
        uncorrected: report.correction.has_uncorrected(),
    };
    let (status, valid_after_correction) =
        resolve_status(flags, || validate(report.effective_value()));
    trace!(field = %field, %status, detected = %report.detected, "field resolved");

    GroupOutcome {
        group: field.group(),
        fields: vec![report],
        valid,
        valid_after_correction,
        status,
    }
}

/// Run the four address sub-fields as one unit.
///
/// Detection and correction run per sub-field; validation sees the
/// composite address. The unit has detected codes when any sub-field has,
/// and open codes when any sub-field has.
pub fn run_address(record: &CustomerRecord, ctx: &PipelineContext<'_>) -> GroupOutcome {
    let fields = FieldGroup::Address.fields();
    let valid = ctx
        .validators
        .address(AddressParts::from_fn(|field| record.value(field)));

    let reports: Vec<FieldReport> = fields
        .iter()
        .map(|&field| {
            let value = record.value(field);
            if valid {
                FieldReport::new(field, value)
            } else {
                inspect_field(field, value, ctx)
            }
        })
        .collect();

    let flags = StageFlags {
        valid,
        detected: reports.iter().any(|r| !r.detected.is_empty()),
        uncorrected: reports.iter().any(|r| r.correction.has_uncorrected()),
    };
    let (status, valid_after_correction) = resolve_status(flags, || {
        ctx.validators.address(AddressParts::from_fn(|field| {
            reports
                .iter()
                .find(|r| r.field == field)
                .and_then(FieldReport::effective_value)
        }))
    });
    if tracing::enabled!(tracing::Level::TRACE) {
        let mut detected = CodeSet::new();
        for report in &reports {
            detected.extend(&report.detected);
        }
        trace!(group = %FieldGroup::Address, %status, %detected, "address resolved");
    }

    GroupOutcome {
        group: FieldGroup::Address,
        fields: reports,
        valid,
        valid_after_correction,
        status,
    }
}

/// Run one status group of a record.
pub fn run_group(
    group: FieldGroup,
    record: &CustomerRecord,
    ctx: &PipelineContext<'_>,
) -> GroupOutcome {
    match group {
        FieldGroup::Address => run_address(record, ctx),
        FieldGroup::FirstName => run_field(Field::FirstName, record.first_name.as_deref(), ctx),
        FieldGroup::LastName => run_field(Field::LastName, record.last_name.as_deref(), ctx),
        FieldGroup::Email => run_field(Field::Email, record.email.as_deref(), ctx),
        FieldGroup::Phone => run_field(Field::Phone, record.phone.as_deref(), ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(valid: bool, detected: bool, uncorrected: bool) -> StageFlags {
        StageFlags {
            valid,
            detected,
            uncorrected,
        }
    }

    #[test]
    fn test_valid_wins_over_everything() {
        let (status, after) = resolve_status(flags(true, true, true), || {
            panic!("re-validation must not run for a valid value")
        });
        assert_eq!(status, FieldStatus::Valid);
        assert_eq!(after, None);
    }

    #[test]
    fn test_five_states() {
        assert_eq!(
            resolve_status(flags(false, false, false), || true),
            (FieldStatus::UndetectedErrors, None)
        );
        assert_eq!(
            resolve_status(flags(false, true, true), || true),
            (FieldStatus::UncorrectedErrors, None)
        );
        assert_eq!(
            resolve_status(flags(false, true, false), || true),
            (FieldStatus::Corrected, Some(true))
        );
        assert_eq!(
            resolve_status(flags(false, true, false), || false),
            (FieldStatus::InvalidAfterCorrection, Some(false))
        );
    }
}
