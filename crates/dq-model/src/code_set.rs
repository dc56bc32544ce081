//! Sorted sets of error codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::codes::ErrorCode;
use crate::error::ModelError;

/// Separator used when a code set is written to a single cell.
pub const CODE_SEPARATOR: char = ';';

/// An ordered set of error codes.
///
/// Iteration and serialization are always in ascending code order, so two
/// runs over the same input produce byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeSet(BTreeSet<ErrorCode>);

impl CodeSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert a code. Returns `true` if it was not present yet.
    pub fn insert(&mut self, code: ErrorCode) -> bool {
        self.0.insert(code)
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.0.contains(&code)
    }

    /// True if any of `codes` is present.
    pub fn contains_any(&self, codes: &[ErrorCode]) -> bool {
        codes.iter().any(|code| self.0.contains(code))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.0.iter().copied()
    }

    pub fn union(&self, other: &CodeSet) -> CodeSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn difference(&self, other: &CodeSet) -> CodeSet {
        Self(self.0.difference(&other.0).copied().collect())
    }

    pub fn is_disjoint(&self, other: &CodeSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn extend(&mut self, other: &CodeSet) {
        self.0.extend(other.iter());
    }

    /// Sorted code tokens.
    pub fn tokens(&self) -> Vec<&'static str> {
        self.iter().map(ErrorCode::as_str).collect()
    }

    /// Parse a `;`-separated cell as written by [`fmt::Display`].
    pub fn parse_cell(cell: &str) -> Result<CodeSet, ModelError> {
        let mut set = CodeSet::new();
        for token in cell.split(CODE_SEPARATOR) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            set.insert(token.parse()?);
        }
        Ok(set)
    }
}

impl fmt::Display for CodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, code) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, "{CODE_SEPARATOR}")?;
            }
            f.write_str(code.as_str())?;
        }
        Ok(())
    }
}

impl FromIterator<ErrorCode> for CodeSet {
    fn from_iter<I: IntoIterator<Item = ErrorCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CodeSet {
    type Item = ErrorCode;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, ErrorCode>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
