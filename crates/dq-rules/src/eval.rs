//! Ordered rule evaluation.
//!
//! Detection walks a field's rules in catalog order and accrues detected
//! codes; a rule may be skipped when one of its skip codes was detected
//! earlier in the same walk. Correction walks the same order over the
//! detected set and rewrites a working value.

use dq_model::{CodeSet, CorrectionResult, ErrorCode};
use dq_standards::RuleConfig;

/// Accumulates detected codes for one value.
pub struct Detector<'a> {
    config: &'a RuleConfig,
    codes: CodeSet,
}

impl<'a> Detector<'a> {
    pub fn new(config: &'a RuleConfig) -> Self {
        Self {
            config,
            codes: CodeSet::new(),
        }
    }

    /// Evaluate one rule.
    ///
    /// The predicate runs only when the rule is enabled for detection and
    /// none of `skip` was detected yet. It receives the codes detected so
    /// far. Returns whether the code was added.
    pub fn rule(
        &mut self,
        code: ErrorCode,
        skip: &[ErrorCode],
        predicate: impl FnOnce(&CodeSet) -> bool,
    ) -> bool {
        if !self.config.should_detect(code) || self.codes.contains_any(skip) {
            return false;
        }
        if predicate(&self.codes) {
            self.codes.insert(code);
            return true;
        }
        false
    }

    pub fn has(&self, code: ErrorCode) -> bool {
        self.codes.contains(code)
    }

    pub fn finish(self) -> CodeSet {
        self.codes
    }
}

/// The detection result for an absent value: the missing code alone.
pub fn missing_only(config: &RuleConfig, code: ErrorCode) -> CodeSet {
    let mut detector = Detector::new(config);
    detector.rule(code, &[], |_| true);
    detector.finish()
}

/// Applies corrections for one value and tracks which codes they fixed.
pub struct Corrector<'a> {
    config: &'a RuleConfig,
    detected: &'a CodeSet,
    value: Option<String>,
    corrected: CodeSet,
}

impl<'a> Corrector<'a> {
    pub fn new(config: &'a RuleConfig, detected: &'a CodeSet, value: Option<&str>) -> Self {
        Self {
            config,
            detected,
            value: value.map(str::to_string),
            corrected: CodeSet::new(),
        }
    }

    /// Whether a correction for `code` may run at all.
    fn enabled(&self, code: ErrorCode, skip: &[ErrorCode]) -> bool {
        self.detected.contains(code)
            && self.config.should_correct(code)
            && !self.detected.contains_any(skip)
    }

    pub fn detected(&self, code: ErrorCode) -> bool {
        self.detected.contains(code)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Rewrite the working value with `transform`.
    ///
    /// The code counts as corrected only if the value actually changed.
    /// A transform that would leave nothing is discarded; only the
    /// clearing rules empty a value.
    pub fn apply(
        &mut self,
        code: ErrorCode,
        skip: &[ErrorCode],
        transform: impl FnOnce(&str) -> String,
    ) {
        if !self.enabled(code, skip) {
            return;
        }
        let Some(before) = self.value.as_deref() else {
            return;
        };
        let after = transform(before);
        if after.trim().is_empty() {
            return;
        }
        if after != before {
            self.value = Some(after);
            self.corrected.insert(code);
        }
    }

    /// Clear the working value. Always recorded as corrected.
    pub fn clear(&mut self, code: ErrorCode) {
        if self.enabled(code, &[]) {
            self.value = None;
            self.corrected.insert(code);
        }
    }

    /// Partition the detected codes and report the net value change.
    ///
    /// A final value equal to `original` is reported as `None`.
    pub fn finish(self, original: Option<&str>) -> CorrectionResult {
        let uncorrected = self.detected.difference(&self.corrected);
        let corrected_value = self.value.filter(|v| Some(v.as_str()) != original);
        CorrectionResult {
            corrected_value,
            corrected: self.corrected,
            uncorrected,
        }
    }
}
