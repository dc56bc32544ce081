//! The input customer table.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use dq_model::{CustomerRecord, Field};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::{ColumnLayout, header_key, normalize_header};
use crate::reader::{column_values, read_csv_frame};

/// Input rows with their original columns, kept for the augmented output.
#[derive(Debug, Clone)]
pub struct CustomerTable {
    pub path: PathBuf,
    /// Header names in input order, BOM and surrounding whitespace removed.
    pub columns: Vec<String>,
    /// Row-major cell values. `None` is an empty cell.
    pub rows: Vec<Vec<Option<String>>>,
    pub layout: ColumnLayout,
}

impl CustomerTable {
    /// Build a table from already split cells.
    pub fn from_rows(
        path: &Path,
        columns: Vec<String>,
        rows: Vec<Vec<Option<String>>>,
        id_column: &str,
    ) -> Result<Self> {
        let columns: Vec<String> = columns.iter().map(|c| normalize_header(c)).collect();

        let mut seen = BTreeSet::new();
        for (position, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(IngestError::EmptyColumnName {
                    path: path.to_path_buf(),
                    position,
                });
            }
            if !seen.insert(header_key(column)) {
                return Err(IngestError::DuplicateColumn {
                    path: path.to_path_buf(),
                    column: column.clone(),
                });
            }
        }

        let layout = ColumnLayout::resolve(&columns, id_column, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
            layout,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// The checked fields of one row. Values are not trimmed.
    pub fn record(&self, row: usize) -> CustomerRecord {
        let id = self
            .cell(row, self.layout.id)
            .map(str::trim)
            .unwrap_or_default();
        let mut record = CustomerRecord::new(id, row);
        for field in Field::ALL {
            record.set(
                field,
                self.cell(row, self.layout.field(field)).map(str::to_string),
            );
        }
        record
    }

    pub fn records(&self) -> Vec<CustomerRecord> {
        (0..self.len()).map(|row| self.record(row)).collect()
    }
}

/// Read the input customer CSV.
pub fn read_customer_table(path: &Path, id_column: &str) -> Result<CustomerTable> {
    let df = read_csv_frame(path)?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        for (row, value) in column_values(column)?.into_iter().enumerate() {
            rows[row].push(value);
        }
    }

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "customer table loaded"
    );
    CustomerTable::from_rows(path, columns, rows, id_column)
}
