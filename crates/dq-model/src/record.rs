use serde::{Deserialize, Serialize};

use crate::field::Field;

/// One input row reduced to the checked fields.
///
/// Values are kept exactly as read; placeholder coercion happens inside
/// the detectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    /// Zero-based position in the input table.
    pub row_index: usize,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerRecord {
    pub fn new(id: impl Into<String>, row_index: usize) -> Self {
        Self {
            id: id.into(),
            row_index,
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Street => self.street.as_deref(),
            Field::HouseNumber => self.house_number.as_deref(),
            Field::PostalCode => self.postal_code.as_deref(),
            Field::City => self.city.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Street => &mut self.street,
            Field::HouseNumber => &mut self.house_number,
            Field::PostalCode => &mut self.postal_code,
            Field::City => &mut self.city,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        };
        *slot = value;
    }

    /// Builder-style setter used by tests and fixtures.
    #[must_use]
    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, Some(value.to_string()));
        self
    }
}
