#![deny(unsafe_code)]

pub mod addresses;
pub mod names;
pub mod rules;

use std::path::Path;

use crate::error::StandardsError;

/// Column lookup over a CSV header row.
///
/// Matching ignores case, surrounding whitespace and a UTF-8 BOM, and
/// accepts a list of alias names per column.
pub(crate) struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    pub(crate) fn new(headers: &csv::StringRecord) -> Self {
        Self {
            names: headers
                .iter()
                .map(|h| h.trim_start_matches('\u{feff}').trim().to_ascii_uppercase())
                .collect(),
        }
    }

    pub(crate) fn position(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| {
            let alias = alias.to_ascii_uppercase();
            self.names.iter().position(|name| *name == alias)
        })
    }

    pub(crate) fn require(&self, path: &Path, aliases: &[&str]) -> Result<usize, StandardsError> {
        self.position(aliases)
            .ok_or_else(|| StandardsError::MissingColumn {
                path: path.to_path_buf(),
                column: aliases.join("|"),
            })
    }
}

pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, StandardsError> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            StandardsError::io(path, e)
        }
    })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

/// Trimmed, non-empty cell.
pub(crate) fn cell(row: &csv::StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn line_of(row: &csv::StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or_default()
}
