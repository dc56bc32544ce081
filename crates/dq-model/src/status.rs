//! Terminal statuses of the field pipeline and of whole records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Terminal state of one field (or the address group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldStatus {
    /// The original value passed validation.
    Valid,
    /// Invalid, but no rule detected anything.
    UndetectedErrors,
    /// At least one detected code could not be corrected.
    UncorrectedErrors,
    /// Every detected code was corrected and the result validates.
    Corrected,
    /// Every detected code was corrected but the result still fails validation.
    InvalidAfterCorrection,
}

impl FieldStatus {
    pub const ALL: [FieldStatus; 5] = [
        FieldStatus::Valid,
        FieldStatus::UndetectedErrors,
        FieldStatus::UncorrectedErrors,
        FieldStatus::Corrected,
        FieldStatus::InvalidAfterCorrection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Valid => "VALID",
            FieldStatus::UndetectedErrors => "UNDETECTED_ERRORS",
            FieldStatus::UncorrectedErrors => "UNCORRECTED_ERRORS",
            FieldStatus::Corrected => "CORRECTED",
            FieldStatus::InvalidAfterCorrection => "INVALID_AFTER_CORRECTION",
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

/// Status of a whole record, derived from its field statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Valid,
    Invalid,
    Corrected,
    Uncorrected,
    PartiallyValid,
    /// Processing of the record failed; its fields were not evaluated.
    Error,
}

impl OverallStatus {
    pub const ALL: [OverallStatus; 6] = [
        OverallStatus::Valid,
        OverallStatus::Invalid,
        OverallStatus::Corrected,
        OverallStatus::Uncorrected,
        OverallStatus::PartiallyValid,
        OverallStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Valid => "VALID",
            OverallStatus::Invalid => "INVALID",
            OverallStatus::Corrected => "CORRECTED",
            OverallStatus::Uncorrected => "UNCORRECTED",
            OverallStatus::PartiallyValid => "PARTIALLY_VALID",
            OverallStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_status_parses_its_own_tokens() {
        for status in FieldStatus::ALL {
            assert_eq!(status.as_str().parse::<FieldStatus>().unwrap(), status);
        }
        assert!("BROKEN".parse::<FieldStatus>().is_err());
    }
}
