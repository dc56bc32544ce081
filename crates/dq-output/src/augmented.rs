//! The input table augmented with pipeline results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dq_ingest::CustomerTable;
use dq_model::RecordOutcome;
use tracing::info;

use crate::columns::{result_cells, result_columns};
use crate::error::{OutputError, Result};

/// Write the augmented table to `path`.
///
/// `outcomes` must be in input order, one per row.
pub fn write_augmented_csv(
    path: &Path,
    table: &CustomerTable,
    outcomes: &[RecordOutcome],
) -> Result<()> {
    if table.len() != outcomes.len() {
        return Err(OutputError::RowCountMismatch {
            rows: table.len(),
            outcomes: outcomes.len(),
        });
    }
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_augmented(BufWriter::new(file), table, outcomes).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = outcomes.len(), "augmented table written");
    Ok(())
}

/// Write the augmented table to any writer. Extra outcomes or rows are
/// ignored.
pub fn write_augmented<W: Write>(
    writer: W,
    table: &CustomerTable,
    outcomes: &[RecordOutcome],
) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = table.columns.clone();
    header.extend(result_columns());
    writer.write_record(&header)?;

    for (row, outcome) in table.rows.iter().zip(outcomes) {
        let results = result_cells(outcome);
        let input = row.iter().map(|cell| cell.as_deref().unwrap_or_default());
        writer.write_record(input.chain(results.iter().map(String::as_str)))?;
    }
    writer.flush()?;
    Ok(())
}
