//! Master orchestration over a record set.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use dq_model::{
    CustomerRecord, ErrorCode, FieldGroup, FieldStatus, OverallStatus, PipelineOptions,
    RecordOutcome,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};

use crate::context::PipelineContext;
use crate::error::{PipelineError, Result};
use crate::pipeline::run_group;
use crate::status::overall_status;

/// Run every status group of one record.
pub fn process_record(record: &CustomerRecord, ctx: &PipelineContext<'_>) -> Result<RecordOutcome> {
    if record.id.trim().is_empty() {
        return Err(PipelineError::MissingIdentifier {
            row_index: record.row_index,
        });
    }
    let groups: Vec<_> = FieldGroup::ALL
        .iter()
        .map(|&group| run_group(group, record, ctx))
        .collect();
    let overall = overall_status(&groups);
    trace!(record_id = %record.id, %overall, "record processed");
    Ok(RecordOutcome {
        record_id: record.id.clone(),
        row_index: record.row_index,
        groups,
        overall,
        error: None,
    })
}

/// Process a record, turning errors and panics into a degraded outcome.
pub fn process_record_isolated(
    record: &CustomerRecord,
    ctx: &PipelineContext<'_>,
) -> RecordOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| process_record(record, ctx)))
        .unwrap_or_else(|payload| {
            Err(PipelineError::Panicked {
                record_id: record.id.clone(),
                message: panic_message(payload.as_ref()),
            })
        });
    match result {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!(record_id = %record.id, row = record.row_index, %error, "record failed");
            RecordOutcome::failed(record.id.clone(), record.row_index, error.to_string())
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Outcomes of a whole run, in input order.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub outcomes: Vec<RecordOutcome>,
    pub stats: BatchStats,
    pub duration: Duration,
}

impl BatchResult {
    pub fn failed_count(&self) -> usize {
        self.stats.overall_count(OverallStatus::Error)
    }
}

/// Run the pipeline over every record.
///
/// Records are independent; with `options.parallel` they are processed on
/// the rayon pool. Output order always follows input order.
pub fn run_batch(
    records: &[CustomerRecord],
    ctx: &PipelineContext<'_>,
    options: &PipelineOptions,
) -> BatchResult {
    let span = info_span!("run", records = records.len(), parallel = options.parallel);
    let _guard = span.enter();
    let start = Instant::now();

    let outcomes: Vec<RecordOutcome> = if options.parallel {
        records
            .par_iter()
            .map(|record| process_record_isolated(record, ctx))
            .collect()
    } else {
        records
            .iter()
            .map(|record| process_record_isolated(record, ctx))
            .collect()
    };
    debug!("records processed, aggregating");

    let stats = BatchStats::from_outcomes(&outcomes);
    let duration = start.elapsed();
    info!(
        record_count = stats.record_count,
        failed = stats.overall_count(OverallStatus::Error),
        duration_ms = duration.as_millis(),
        "batch complete"
    );
    BatchResult {
        outcomes,
        stats,
        duration,
    }
}

/// How often a code was detected, corrected and left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CodeCounts {
    pub detected: usize,
    pub corrected: usize,
    pub uncorrected: usize,
}

/// Aggregate counts of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub record_count: usize,
    pub overall: BTreeMap<OverallStatus, usize>,
    pub groups: BTreeMap<FieldGroup, BTreeMap<FieldStatus, usize>>,
    pub codes: BTreeMap<ErrorCode, CodeCounts>,
}

impl BatchStats {
    pub fn from_outcomes(outcomes: &[RecordOutcome]) -> Self {
        let mut stats = Self {
            record_count: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            *stats.overall.entry(outcome.overall).or_default() += 1;
            for group in &outcome.groups {
                *stats
                    .groups
                    .entry(group.group)
                    .or_default()
                    .entry(group.status)
                    .or_default() += 1;
                for report in &group.fields {
                    for code in report.detected.iter() {
                        stats.codes.entry(code).or_default().detected += 1;
                    }
                    for code in report.correction.corrected.iter() {
                        stats.codes.entry(code).or_default().corrected += 1;
                    }
                    for code in report.correction.uncorrected.iter() {
                        stats.codes.entry(code).or_default().uncorrected += 1;
                    }
                }
            }
        }
        stats
    }

    pub fn overall_count(&self, status: OverallStatus) -> usize {
        self.overall.get(&status).copied().unwrap_or_default()
    }

    pub fn group_count(&self, group: FieldGroup, status: FieldStatus) -> usize {
        self.groups
            .get(&group)
            .and_then(|counts| counts.get(&status))
            .copied()
            .unwrap_or_default()
    }

    /// Codes by detection count, most frequent first.
    pub fn top_codes(&self, limit: usize) -> Vec<(ErrorCode, CodeCounts)> {
        let mut codes: Vec<_> = self
            .codes
            .iter()
            .map(|(&code, &counts)| (code, counts))
            .collect();
        codes.sort_by(|a, b| b.1.detected.cmp(&a.1.detected).then(a.0.cmp(&b.0)));
        codes.truncate(limit);
        codes
    }
}
