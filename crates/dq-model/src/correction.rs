use serde::{Deserialize, Serialize};

use crate::code_set::CodeSet;

/// Result of running a field corrector over one value.
///
/// `corrected` and `uncorrected` partition the detected codes.
/// `corrected_value` is `Some` only when the final value is a string that
/// differs from the original input; a cleared value is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub corrected_value: Option<String>,
    pub corrected: CodeSet,
    pub uncorrected: CodeSet,
}

impl CorrectionResult {
    /// A result that corrects nothing and leaves every detected code open.
    pub fn untouched(detected: &CodeSet) -> Self {
        Self {
            corrected_value: None,
            corrected: CodeSet::new(),
            uncorrected: detected.clone(),
        }
    }

    /// True when `corrected` and `uncorrected` are disjoint and together
    /// equal `detected`.
    pub fn is_partition_of(&self, detected: &CodeSet) -> bool {
        self.corrected.is_disjoint(&self.uncorrected)
            && &self.corrected.union(&self.uncorrected) == detected
    }

    pub fn has_uncorrected(&self) -> bool {
        !self.uncorrected.is_empty()
    }
}
