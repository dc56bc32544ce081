#![deny(unsafe_code)]

//! Immutable reference sets used by the validators.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use crate::error::StandardsError;
use crate::normalize::{address_key, canonical_key};

/// Canonical keys of every known address.
#[derive(Debug, Clone, Default)]
pub struct AddressRegistry {
    keys: HashSet<String>,
}

impl AddressRegistry {
    pub fn from_keys(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Membership of an already canonical key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn contains(
        &self,
        street: Option<&str>,
        house_number: Option<&str>,
        postal_code: Option<&str>,
        city: Option<&str>,
    ) -> bool {
        self.contains_key(&address_key(street, house_number, postal_code, city))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Known first names or surnames with their frequencies.
#[derive(Debug, Clone, Default)]
pub struct NameFrequencyTable {
    frequencies: BTreeMap<String, u64>,
}

impl NameFrequencyTable {
    /// Build from raw names; keys are canonicalized here.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let mut frequencies: BTreeMap<String, u64> = BTreeMap::new();
        for (name, frequency) in entries {
            *frequencies.entry(canonical_key(name)).or_default() += frequency;
        }
        Self { frequencies }
    }

    pub(crate) fn from_canonical(frequencies: BTreeMap<String, u64>) -> Self {
        Self { frequencies }
    }

    pub fn frequency(&self, name: &str) -> u64 {
        self.frequencies
            .get(&canonical_key(name))
            .copied()
            .unwrap_or_default()
    }

    /// True when the name is known with at least `min_frequency` bearers.
    pub fn is_known(&self, name: &str, min_frequency: u64) -> bool {
        let frequency = self.frequency(name);
        frequency > 0 && frequency >= min_frequency
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Email domains accepted as valid.
#[derive(Debug, Clone, Default)]
pub struct DomainAllowList {
    domains: BTreeSet<String>,
}

impl DomainAllowList {
    pub fn from_domains<'a>(domains: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.trim().to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Load a text file with one domain per line. `#` starts a comment.
    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        let list = Self::from_domains(
            contents
                .lines()
                .map(|line| line.split('#').next().unwrap_or_default()),
        );
        if list.is_empty() {
            return Err(StandardsError::EmptyReference {
                path: path.to_path_buf(),
            });
        }
        Ok(list)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(&domain.trim().to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
