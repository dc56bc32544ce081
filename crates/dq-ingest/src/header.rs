//! Header normalization and column resolution.

use std::path::Path;

use dq_model::Field;

use crate::error::{IngestError, Result};

/// Normalizes a header cell: strips a BOM, trims and collapses whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Comparison key of a header: uppercase with spaces and hyphens as `_`.
pub fn header_key(raw: &str) -> String {
    normalize_header(raw)
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Accepted header names of a field, canonical name first.
pub fn field_aliases(field: Field) -> &'static [&'static str] {
    match field {
        Field::FirstName => &["FIRST_NAME", "FIRSTNAME", "NAME", "IME"],
        Field::LastName => &["LAST_NAME", "LASTNAME", "SURNAME", "PRIIMEK"],
        Field::Street => &["STREET", "STREET_NAME", "ULICA"],
        Field::HouseNumber => &[
            "HOUSE_NUMBER",
            "HOUSENUMBER",
            "HS_STEVILKA",
            "HISNA_STEVILKA",
        ],
        Field::PostalCode => &["POSTAL_CODE", "POSTCODE", "ZIP", "POSTNA_STEVILKA"],
        Field::City => &["POSTAL_CITY", "CITY", "POSTA", "KRAJ"],
        Field::Email => &["EMAIL", "E_MAIL", "EMAIL_ADDRESS"],
        Field::Phone => &["PHONE_NUMBER", "PHONE", "TELEFON", "TEL"],
    }
}

/// Positions of the identifier and the checked fields in the input header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub id: usize,
    /// Indexed by field declaration order.
    fields: [usize; Field::ALL.len()],
}

impl ColumnLayout {
    /// Resolve every checked field and the identifier column.
    ///
    /// Matching is case-insensitive and accepts the aliases of
    /// [`field_aliases`]. Every field must be present.
    pub fn resolve(columns: &[String], id_column: &str, path: &Path) -> Result<Self> {
        let keys: Vec<String> = columns.iter().map(|c| header_key(c)).collect();
        let find = |aliases: &[&str]| -> Option<usize> {
            aliases
                .iter()
                .find_map(|alias| keys.iter().position(|key| key == alias))
        };

        let id_key = header_key(id_column);
        let id = find(&[id_key.as_str()]).ok_or_else(|| IngestError::MissingColumn {
            column: id_column.to_string(),
            path: path.to_path_buf(),
        })?;

        let mut fields = [0; Field::ALL.len()];
        for field in Field::ALL {
            fields[field as usize] = find(field_aliases(field)).ok_or_else(|| {
                IngestError::MissingColumn {
                    column: field.column().to_string(),
                    path: path.to_path_buf(),
                }
            })?;
        }

        Ok(Self { id, fields })
    }

    pub fn field(&self, field: Field) -> usize {
        self.fields[field as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff} First   Name "), "First Name");
        assert_eq!(header_key("first name"), "FIRST_NAME");
        assert_eq!(header_key("e-mail"), "E_MAIL");
    }

    #[test]
    fn test_resolve_with_aliases() {
        let cols = columns(&[
            "id", "Ime", "Priimek", "Ulica", "hs_stevilka", "postal code", "Posta", "e-mail",
            "Telefon",
        ]);
        let layout = ColumnLayout::resolve(&cols, "ID", Path::new("in.csv")).unwrap();
        assert_eq!(layout.id, 0);
        assert_eq!(layout.field(Field::FirstName), 1);
        assert_eq!(layout.field(Field::City), 6);
        assert_eq!(layout.field(Field::Phone), 8);
    }

    #[test]
    fn test_missing_field_column() {
        let cols = columns(&["ID", "FIRST_NAME"]);
        let err = ColumnLayout::resolve(&cols, "ID", Path::new("in.csv")).unwrap_err();
        assert!(
            matches!(err, IngestError::MissingColumn { ref column, .. } if column == "LAST_NAME")
        );
    }
}
