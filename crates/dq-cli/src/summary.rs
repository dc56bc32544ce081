use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dq_core::BatchStats;
use dq_model::{FieldGroup, FieldStatus, OverallStatus};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult, top_codes: usize) {
    let stats = &result.batch.stats;
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    println!(
        "Records: {} in {} ms",
        stats.record_count,
        result.batch.duration.as_millis()
    );
    println!("{}", group_table(stats));
    println!("{}", overall_table(stats));
    if let Some(table) = code_table(stats, top_codes) {
        println!();
        println!("Top error codes:");
        println!("{table}");
    }
    print_failed_records(result);
}

fn group_table(stats: &BatchStats) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Field")];
    header.extend(
        FieldStatus::ALL
            .iter()
            .map(|status| header_cell(status.as_str())),
    );
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 1..=FieldStatus::ALL.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in FieldGroup::ALL {
        let mut row = vec![
            Cell::new(group.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        row.extend(
            FieldStatus::ALL
                .iter()
                .map(|&status| {
                    count_cell(stats.group_count(group, status), field_status_color(status))
                }),
        );
        table.add_row(row);
    }
    table
}

fn overall_table(stats: &BatchStats) -> Table {
    let mut table = Table::new();
    let mut header: Vec<Cell> = OverallStatus::ALL
        .iter()
        .map(|status| header_cell(status.as_str()))
        .collect();
    header.push(header_cell("TOTAL"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 0..=OverallStatus::ALL.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut row: Vec<Cell> = OverallStatus::ALL
        .iter()
        .map(|&status| count_cell(stats.overall_count(status), overall_status_color(status)))
        .collect();
    row.push(
        Cell::new(stats.record_count)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    );
    table.add_row(row);
    table
}

fn code_table(stats: &BatchStats, limit: usize) -> Option<Table> {
    let codes = stats.top_codes(limit);
    if codes.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Field"),
        header_cell("Detected"),
        header_cell("Corrected"),
        header_cell("Uncorrected"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (code, counts) in codes {
        table.add_row(vec![
            Cell::new(code.as_str()).add_attribute(Attribute::Bold),
            Cell::new(code.field().label()),
            Cell::new(counts.detected),
            count_cell(counts.corrected, Color::Green),
            count_cell(counts.uncorrected, Color::Yellow),
            Cell::new(code.message()),
        ]);
    }
    Some(table)
}

fn print_failed_records(result: &RunResult) {
    let failed: Vec<_> = result
        .batch
        .outcomes
        .iter()
        .filter(|outcome| outcome.is_failed())
        .collect();
    if failed.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for outcome in failed {
        eprintln!(
            "- row {}: {}",
            outcome.row_index + 1,
            outcome.error.as_deref().unwrap_or("processing failed")
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn field_status_color(status: FieldStatus) -> Color {
    match status {
        FieldStatus::Valid | FieldStatus::Corrected => Color::Green,
        FieldStatus::UncorrectedErrors | FieldStatus::UndetectedErrors => Color::Yellow,
        FieldStatus::InvalidAfterCorrection => Color::Red,
    }
}

fn overall_status_color(status: OverallStatus) -> Color {
    match status {
        OverallStatus::Valid | OverallStatus::Corrected => Color::Green,
        OverallStatus::Uncorrected | OverallStatus::PartiallyValid => Color::Yellow,
        OverallStatus::Invalid | OverallStatus::Error => Color::Red,
    }
}

/// A yes/no cell.
pub fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
