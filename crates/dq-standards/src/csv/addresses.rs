#![deny(unsafe_code)]

use std::path::Path;

use crate::csv::{HeaderIndex, cell, line_of, open_reader};
use crate::error::StandardsError;
use crate::normalize::address_key;

const STREET: &[&str] = &["STREET_NAME", "STREET", "ULICA_NAZIV"];
const HOUSE_NUMBER: &[&str] = &["HOUSE_NUMBER", "HS_STEVILKA"];
const HOUSE_NUMBER_SUFFIX: &[&str] = &["HOUSE_NUMBER_SUFFIX", "HS_DODATEK"];
const POSTAL_CODE: &[&str] = &["POSTAL_CODE", "PT_ID"];
const POSTAL_NAME: &[&str] = &["POSTAL_NAME", "POSTAL_CITY", "PT_NAZIV"];

/// Parse an address registry extract into canonical address keys.
///
/// Rows without a street or postal code cannot form a key and are an
/// error; the house number and suffix are optional.
pub fn parse_address_registry_csv(path: &Path) -> Result<Vec<String>, StandardsError> {
    let mut reader = open_reader(path)?;
    let headers = HeaderIndex::new(reader.headers().map_err(|e| StandardsError::csv(path, e))?);

    let street_i = headers.require(path, STREET)?;
    let number_i = headers.require(path, HOUSE_NUMBER)?;
    let suffix_i = headers.position(HOUSE_NUMBER_SUFFIX);
    let postal_i = headers.require(path, POSTAL_CODE)?;
    let name_i = headers.require(path, POSTAL_NAME)?;

    let mut keys = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::csv(path, e))?;
        let missing = |column: &str| StandardsError::InvalidValue {
            path: path.to_path_buf(),
            line: line_of(&row),
            message: format!("missing {column}"),
        };

        let street = cell(&row, street_i).ok_or_else(|| missing("street name"))?;
        let postal_code = cell(&row, postal_i).ok_or_else(|| missing("postal code"))?;
        let house_number = match (cell(&row, number_i), suffix_i.and_then(|i| cell(&row, i))) {
            (Some(number), Some(suffix)) => Some(format!("{number}{suffix}")),
            (Some(number), None) => Some(number.to_string()),
            (None, _) => None,
        };

        keys.push(address_key(
            Some(street),
            house_number.as_deref(),
            Some(postal_code),
            cell(&row, name_i),
        ));
    }

    Ok(keys)
}
