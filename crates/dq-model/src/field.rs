//! Customer record fields and the groups they are reported in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One checked field of a customer record.
///
/// The declaration order is the order fields appear in output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    FirstName,
    LastName,
    Street,
    HouseNumber,
    PostalCode,
    City,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::Street,
        Field::HouseNumber,
        Field::PostalCode,
        Field::City,
        Field::Email,
        Field::Phone,
    ];

    /// Input column name for this field.
    pub const fn column(self) -> &'static str {
        match self {
            Field::FirstName => "FIRST_NAME",
            Field::LastName => "LAST_NAME",
            Field::Street => "STREET",
            Field::HouseNumber => "HOUSE_NUMBER",
            Field::PostalCode => "POSTAL_CODE",
            Field::City => "POSTAL_CITY",
            Field::Email => "EMAIL",
            Field::Phone => "PHONE_NUMBER",
        }
    }

    /// Two-digit prefix shared by every error code of this field.
    pub const fn code_prefix(self) -> &'static str {
        match self {
            Field::FirstName => "11",
            Field::LastName => "12",
            Field::Email => "21",
            Field::Phone => "31",
            Field::Street => "41",
            Field::HouseNumber => "42",
            Field::PostalCode => "43",
            Field::City => "44",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Street => "Street",
            Field::HouseNumber => "House number",
            Field::PostalCode => "Postal code",
            Field::City => "City",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    /// The status group this field is resolved in.
    pub const fn group(self) -> FieldGroup {
        match self {
            Field::FirstName => FieldGroup::FirstName,
            Field::LastName => FieldGroup::LastName,
            Field::Street | Field::HouseNumber | Field::PostalCode | Field::City => {
                FieldGroup::Address
            }
            Field::Email => FieldGroup::Email,
            Field::Phone => FieldGroup::Phone,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    /// Accepts column names and kebab-case names (`house-number`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        match normalized.as_str() {
            "FIRST_NAME" | "NAME" => Ok(Field::FirstName),
            "LAST_NAME" | "SURNAME" => Ok(Field::LastName),
            "STREET" => Ok(Field::Street),
            "HOUSE_NUMBER" => Ok(Field::HouseNumber),
            "POSTAL_CODE" => Ok(Field::PostalCode),
            "POSTAL_CITY" | "CITY" => Ok(Field::City),
            "EMAIL" => Ok(Field::Email),
            "PHONE_NUMBER" | "PHONE" => Ok(Field::Phone),
            _ => Err(ModelError::UnknownField(s.to_string())),
        }
    }
}

/// A unit that receives one status: a single field, or the four
/// address sub-fields resolved together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldGroup {
    FirstName,
    LastName,
    Address,
    Email,
    Phone,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 5] = [
        FieldGroup::FirstName,
        FieldGroup::LastName,
        FieldGroup::Address,
        FieldGroup::Email,
        FieldGroup::Phone,
    ];

    /// Fields resolved under this group, in output order.
    pub const fn fields(self) -> &'static [Field] {
        match self {
            FieldGroup::FirstName => &[Field::FirstName],
            FieldGroup::LastName => &[Field::LastName],
            FieldGroup::Address => &[
                Field::Street,
                Field::HouseNumber,
                Field::PostalCode,
                Field::City,
            ],
            FieldGroup::Email => &[Field::Email],
            FieldGroup::Phone => &[Field::Phone],
        }
    }

    /// Prefix of the group-level output columns (`<PREFIX>_STATUS`).
    pub const fn column_prefix(self) -> &'static str {
        match self {
            FieldGroup::FirstName => "FIRST_NAME",
            FieldGroup::LastName => "LAST_NAME",
            FieldGroup::Address => "ADDRESS",
            FieldGroup::Email => "EMAIL",
            FieldGroup::Phone => "PHONE_NUMBER",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldGroup::FirstName => "First name",
            FieldGroup::LastName => "Last name",
            FieldGroup::Address => "Address",
            FieldGroup::Email => "Email",
            FieldGroup::Phone => "Phone",
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_str() {
        assert_eq!("house-number".parse::<Field>().unwrap(), Field::HouseNumber);
        assert_eq!("POSTAL_CITY".parse::<Field>().unwrap(), Field::City);
        assert_eq!("phone".parse::<Field>().unwrap(), Field::Phone);
        assert!("fax".parse::<Field>().is_err());
    }

    #[test]
    fn test_groups_cover_every_field_once() {
        let mut seen: Vec<Field> = FieldGroup::ALL
            .iter()
            .flat_map(|group| group.fields().iter().copied())
            .collect();
        seen.sort();
        assert_eq!(seen, Field::ALL.to_vec());
        for field in Field::ALL {
            assert!(field.group().fields().contains(&field));
        }
    }
}
