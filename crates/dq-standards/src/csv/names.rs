#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use crate::csv::{HeaderIndex, cell, line_of, open_reader};
use crate::error::StandardsError;
use crate::normalize::canonical_key;

/// Parse a `NAME,FREQUENCY` table into canonical name → frequency.
///
/// A missing frequency counts as 1. Names that collapse to the same
/// canonical key have their frequencies summed.
pub fn parse_name_frequency_csv(path: &Path) -> Result<BTreeMap<String, u64>, StandardsError> {
    let mut reader = open_reader(path)?;
    let headers = HeaderIndex::new(reader.headers().map_err(|e| StandardsError::csv(path, e))?);

    let name_i = headers.require(path, &["NAME", "IME", "PRIIMEK"])?;
    let frequency_i = headers.position(&["FREQUENCY", "COUNT", "FREKVENCA"]);

    let mut table: BTreeMap<String, u64> = BTreeMap::new();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::csv(path, e))?;
        let Some(name) = cell(&row, name_i) else {
            continue;
        };

        let frequency: u64 = match frequency_i.and_then(|i| cell(&row, i)) {
            Some(raw) => raw.parse().map_err(|e| StandardsError::InvalidValue {
                path: path.to_path_buf(),
                line: line_of(&row),
                message: format!("frequency for {name:?} is not a count: {e}"),
            })?,
            None => 1,
        };

        *table.entry(canonical_key(name)).or_default() += frequency;
    }

    Ok(table)
}
