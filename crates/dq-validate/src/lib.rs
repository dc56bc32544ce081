//! Field validators.
//!
//! Validation is the ground-truth check of the pipeline. It knows nothing
//! about detected codes: a value is valid when it is a member of the
//! matching reference set (or, for phones, matches the national format).

#![deny(unsafe_code)]

pub mod syntax;

use dq_model::{Field, PipelineOptions};
use dq_standards::{AddressRegistry, DomainAllowList, NameFrequencyTable, ReferenceRegistry};

use crate::syntax::{email_parts, is_canonical_phone};

/// The four address sub-fields, in key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressParts<'a> {
    pub street: Option<&'a str>,
    pub house_number: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub city: Option<&'a str>,
}

impl<'a> AddressParts<'a> {
    /// Collect the parts from a field lookup.
    pub fn from_fn(mut value: impl FnMut(Field) -> Option<&'a str>) -> Self {
        Self {
            street: value(Field::Street),
            house_number: value(Field::HouseNumber),
            postal_code: value(Field::PostalCode),
            city: value(Field::City),
        }
    }
}

/// Validators over shared, read-only reference sets.
#[derive(Debug, Clone, Copy)]
pub struct Validators<'a> {
    addresses: &'a AddressRegistry,
    first_names: &'a NameFrequencyTable,
    surnames: &'a NameFrequencyTable,
    email_domains: &'a DomainAllowList,
    min_name_frequency: u64,
}

impl<'a> Validators<'a> {
    pub fn new(
        addresses: &'a AddressRegistry,
        first_names: &'a NameFrequencyTable,
        surnames: &'a NameFrequencyTable,
        email_domains: &'a DomainAllowList,
    ) -> Self {
        Self {
            addresses,
            first_names,
            surnames,
            email_domains,
            min_name_frequency: 1,
        }
    }

    pub fn from_registry(registry: &'a ReferenceRegistry, options: &PipelineOptions) -> Self {
        Self::new(
            &registry.addresses,
            &registry.first_names,
            &registry.surnames,
            &registry.email_domains,
        )
        .with_min_name_frequency(options.min_name_frequency)
    }

    #[must_use]
    pub fn with_min_name_frequency(mut self, min_frequency: u64) -> Self {
        self.min_name_frequency = min_frequency;
        self
    }

    pub fn first_name(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.first_names.is_known(v, self.min_name_frequency))
    }

    pub fn last_name(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.surnames.is_known(v, self.min_name_frequency))
    }

    /// Syntactically valid and on the domain allow-list.
    pub fn email(&self, value: Option<&str>) -> bool {
        value
            .and_then(email_parts)
            .is_some_and(|(_, domain)| self.email_domains.contains(domain))
    }

    pub fn phone(&self, value: Option<&str>) -> bool {
        value.is_some_and(is_canonical_phone)
    }

    /// The composite address is a registry member.
    pub fn address(&self, parts: AddressParts<'_>) -> bool {
        self.addresses.contains(
            parts.street,
            parts.house_number,
            parts.postal_code,
            parts.city,
        )
    }

    /// Validate a stand-alone field.
    ///
    /// Address sub-fields are only validated together, so they yield `None`.
    pub fn field(&self, field: Field, value: Option<&str>) -> Option<bool> {
        match field {
            Field::FirstName => Some(self.first_name(value)),
            Field::LastName => Some(self.last_name(value)),
            Field::Email => Some(self.email(value)),
            Field::Phone => Some(self.phone(value)),
            Field::Street | Field::HouseNumber | Field::PostalCode | Field::City => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use dq_standards::normalize::address_key;

    use super::*;

    struct Fixture {
        addresses: AddressRegistry,
        first_names: NameFrequencyTable,
        surnames: NameFrequencyTable,
        domains: DomainAllowList,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                addresses: AddressRegistry::from_keys([
                    address_key(
                        Some("Glavna ulica"),
                        Some("7"),
                        Some("1000"),
                        Some("Ljubljana"),
                    ),
                    address_key(Some("Lava"), None, Some("3000"), Some("Celje")),
                ]),
                first_names: NameFrequencyTable::from_entries([("Ana", 120), ("Žiga", 3)]),
                surnames: NameFrequencyTable::from_entries([("Novak", 900)]),
                domains: DomainAllowList::from_domains(["gmail.com", "siol.net"]),
            }
        }

        fn validators(&self) -> Validators<'_> {
            Validators::new(
                &self.addresses,
                &self.first_names,
                &self.surnames,
                &self.domains,
            )
        }
    }

    #[test]
    fn test_names_use_canonical_keys() {
        let fixture = Fixture::new();
        let v = fixture.validators();
        assert!(v.first_name(Some("Ana")));
        assert!(v.first_name(Some("  ANA ")));
        assert!(!v.first_name(Some("Ana3")));
        assert!(!v.first_name(None));
        assert!(v.last_name(Some("novak")));
        assert!(!v.last_name(Some("Ana")));
    }

    #[test]
    fn test_min_name_frequency() {
        let fixture = Fixture::new();
        let v = fixture.validators().with_min_name_frequency(5);
        assert!(v.first_name(Some("Ana")));
        assert!(!v.first_name(Some("Žiga")));
    }

    #[test]
    fn test_email_needs_syntax_and_allowed_domain() {
        let fixture = Fixture::new();
        let v = fixture.validators();
        assert!(v.email(Some("ana@gmail.com")));
        assert!(v.email(Some("ana@GMAIL.com")));
        assert!(!v.email(Some("ana@firma.si")));
        assert!(!v.email(Some("ana@@gmail.com")));
        assert!(!v.email(None));
    }

    #[test]
    fn test_address_is_validated_as_a_whole() {
        let fixture = Fixture::new();
        let v = fixture.validators();
        let parts = AddressParts {
            street: Some(" glavna  ulica "),
            house_number: Some("7"),
            postal_code: Some("1000"),
            city: Some("LJUBLJANA"),
        };
        assert!(v.address(parts));
        assert!(!v.address(AddressParts {
            house_number: Some("8"),
            ..parts
        }));
        assert!(v.address(AddressParts {
            street: Some("Lava"),
            house_number: Some("BŠ"),
            postal_code: Some("3000"),
            city: Some("Celje"),
        }));
        assert_eq!(v.field(Field::Street, Some("Lava")), None);
        assert_eq!(v.field(Field::Phone, Some("0038641123456")), Some(true));
    }
}
