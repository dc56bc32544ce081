use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span, trace, warn};

use dq_cli::logging::{redact_optional, redact_value};
use dq_cli::paths::{default_output_path, resolve_reference_dir};
use dq_core::{PipelineContext, run_batch};
use dq_ingest::read_customer_table;
use dq_model::{ErrorCode, Field, PipelineOptions, RecordOutcome};
use dq_output::{RunReport, write_augmented_csv, write_json_report};
use dq_rules::{RuleContext, correct, detect};
use dq_standards::csv::rules::parse_rules_csv;
use dq_standards::{DoctorReport, ReferenceRegistry, RuleConfig, VerifySummary};

use crate::cli::{CheckArgs, DoctorArgs, ReferenceArgs, RulesArgs, RunArgs};
use crate::summary::{apply_table_style, flag_cell};
use crate::types::RunResult;

fn load_reference(dir: Option<&Path>) -> Result<(ReferenceRegistry, VerifySummary)> {
    let dir = resolve_reference_dir(dir);
    debug!(reference_dir = %dir.display(), "loading reference data");
    ReferenceRegistry::verify_and_load(&dir)
        .with_context(|| format!("load reference data from {}", dir.display()))
}

/// Rules from `--rules`, when given. They are not hash-checked.
fn load_rules_override(path: Option<&Path>) -> Result<Option<RuleConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let rules = parse_rules_csv(path).with_context(|| format!("load rules {}", path.display()))?;
    if !rules.unknown_codes().is_empty() {
        warn!(
            path = %path.display(),
            unknown = rules.unknown_codes().len(),
            "rule file lists codes outside the catalog"
        );
    }
    info!(path = %path.display(), rules = rules.len(), "rule configuration override loaded");
    Ok(Some(rules))
}

fn load_setup(args: &ReferenceArgs) -> Result<(ReferenceRegistry, Option<RuleConfig>)> {
    let (registry, _) = load_reference(args.reference_dir.as_deref())?;
    let rules = load_rules_override(args.rules.as_deref())?;
    Ok((registry, rules))
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();

    let mut options = PipelineOptions::default()
        .with_id_column(args.id_column.clone())
        .with_min_name_frequency(args.min_name_frequency);
    if args.sequential {
        options = options.sequential();
    }

    // Setup failures abort before any record is processed.
    let (registry, override_rules) = load_setup(&args.reference)?;
    let rules = override_rules.as_ref().unwrap_or(&registry.rules);
    info!(
        detect = rules.detect_enabled_count(),
        correct = rules.correct_enabled_count(),
        "rule configuration"
    );

    let table = read_customer_table(&args.input, &options.id_column)
        .with_context(|| format!("read customer table {}", args.input.display()))?;
    let records = table.records();
    info!(records = records.len(), "customer table loaded");

    let ctx = PipelineContext::with_rules(&registry, rules, &options);
    let batch = run_batch(&records, &ctx, &options);
    if tracing::enabled!(tracing::Level::TRACE) {
        trace_corrections(&batch.outcomes);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_augmented_csv(&output, &table, &batch.outcomes)
        .with_context(|| format!("write augmented table {}", output.display()))?;

    if let Some(path) = &args.report {
        let report = RunReport::new(&args.input, &batch);
        write_json_report(path, &report)
            .with_context(|| format!("write run report {}", path.display()))?;
    }

    Ok(RunResult {
        input: args.input.clone(),
        output,
        report: args.report.clone(),
        batch,
    })
}

fn trace_corrections(outcomes: &[RecordOutcome]) {
    for outcome in outcomes {
        for group in &outcome.groups {
            for report in &group.fields {
                let Some(corrected) = report.correction.corrected_value.as_deref() else {
                    continue;
                };
                trace!(
                    record_id = %outcome.record_id,
                    field = %report.field,
                    original = redact_optional(report.original.as_deref()),
                    corrected = redact_value(corrected),
                    "value corrected"
                );
            }
        }
    }
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let field = Field::from(args.field);
    let (registry, override_rules) = load_setup(&args.reference)?;
    let rules = override_rules.as_ref().unwrap_or(&registry.rules);
    let ctx = RuleContext::new(rules, &registry.email_domains);

    debug!(field = %field, value = redact_value(&args.value), "checking value");
    let value = Some(args.value.as_str());
    let detected = detect(field, value, &ctx);
    let correction = correct(field, value, &detected, &ctx);

    let corrected_value = correction.corrected_value.as_deref().unwrap_or("-");
    let mut table = Table::new();
    table.set_header(vec![
        "Field",
        "Detected",
        "Corrected",
        "Uncorrected",
        "Corrected value",
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        field.label().to_string(),
        detected.to_string(),
        correction.corrected.to_string(),
        correction.uncorrected.to_string(),
        corrected_value.to_string(),
    ]);
    println!("{table}");

    if !detected.is_empty() {
        let mut codes = Table::new();
        codes.set_header(vec!["Code", "Message"]);
        apply_table_style(&mut codes);
        for code in detected.iter() {
            codes.add_row(vec![code.as_str(), rules.message(code)]);
        }
        println!("{codes}");
    }
    Ok(())
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let (registry, override_rules) = load_setup(&args.reference)?;
    let rules = override_rules.as_ref().unwrap_or(&registry.rules);
    let field = args.field.map(Field::from);

    let mut table = Table::new();
    table.set_header(vec![
        "Code", "Field", "Category", "Detect", "Correct", "Fixable", "Message",
    ]);
    apply_table_style(&mut table);
    for &code in ErrorCode::ALL {
        if field.is_some_and(|field| code.field() != field) {
            continue;
        }
        table.add_row(vec![
            comfy_table::Cell::new(code.as_str()),
            comfy_table::Cell::new(code.field().label()),
            comfy_table::Cell::new(code.category().label()),
            flag_cell(rules.should_detect(code)),
            flag_cell(rules.should_correct(code)),
            flag_cell(code.is_fixable()),
            comfy_table::Cell::new(rules.message(code)),
        ]);
    }
    println!("{table}");
    if !rules.unknown_codes().is_empty() {
        eprintln!(
            "Ignored unknown codes: {}",
            rules.unknown_codes().join(", ")
        );
    }
    Ok(())
}

pub fn run_doctor(args: &DoctorArgs) -> Result<()> {
    let (registry, summary) = load_reference(args.reference_dir.as_deref())?;
    let report = DoctorReport::from_verify_summary(
        &summary,
        registry.files.clone(),
        registry.rules.unknown_codes().to_vec(),
    );
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
        println!("{json}");
        return Ok(());
    }

    println!("Reference: {}", summary.reference_dir.display());
    println!(
        "Pins: address registry {}, names {}",
        report.pins.address_registry, report.pins.names
    );
    let mut files = Table::new();
    files.set_header(vec!["Path", "Role", "Kind", "SHA-256"]);
    apply_table_style(&mut files);
    for file in &report.files {
        files.add_row(vec![
            file.path.as_str(),
            file.role.as_str(),
            file.kind.as_str(),
            file.sha256.get(..12).unwrap_or(file.sha256.as_str()),
        ]);
    }
    println!("{files}");

    let mut counts = Table::new();
    counts.set_header(vec!["Set", "Entries"]);
    apply_table_style(&mut counts);
    counts.add_row(vec!["Rules".to_string(), report.counts.rules.to_string()]);
    counts.add_row(vec!["Addresses".to_string(), report.counts.addresses.to_string()]);
    counts.add_row(vec![
        "First names".to_string(),
        report.counts.first_names.to_string(),
    ]);
    counts.add_row(vec!["Surnames".to_string(), report.counts.surnames.to_string()]);
    counts.add_row(vec![
        "Email domains".to_string(),
        report.counts.email_domains.to_string(),
    ]);
    println!("{counts}");
    if !report.unknown_rule_codes.is_empty() {
        eprintln!(
            "Ignored unknown codes: {}",
            report.unknown_rule_codes.join(", ")
        );
    }
    Ok(())
}
