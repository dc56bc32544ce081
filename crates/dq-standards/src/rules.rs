#![deny(unsafe_code)]

//! Per-code detect/correct switches.

use std::collections::BTreeMap;

use dq_model::ErrorCode;
use serde::Serialize;

/// Detect and correct switches of one error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSetting {
    pub detect: bool,
    pub correct: bool,
    /// Message from the rule file; falls back to the catalog message.
    pub message: Option<String>,
}

impl RuleSetting {
    pub const fn enabled() -> Self {
        Self {
            detect: true,
            correct: true,
            message: None,
        }
    }
}

/// Rule configuration keyed by error code.
///
/// A code absent from the map behaves as disabled for detection and
/// correction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleConfig {
    settings: BTreeMap<ErrorCode, RuleSetting>,
    /// Codes in the source file that are not part of the catalog.
    unknown_codes: Vec<String>,
}

impl RuleConfig {
    /// Every catalog rule enabled for detection and correction.
    pub fn all_enabled() -> Self {
        ErrorCode::ALL
            .iter()
            .map(|code| (*code, RuleSetting::enabled()))
            .collect()
    }

    /// Every catalog rule enabled for detection, none for correction.
    pub fn detect_only() -> Self {
        let mut config = Self::all_enabled();
        for setting in config.settings.values_mut() {
            setting.correct = false;
        }
        config
    }

    /// Replace the switches of one code.
    pub fn with_rule(mut self, code: ErrorCode, detect: bool, correct: bool) -> Self {
        let message = self.settings.remove(&code).and_then(|s| s.message);
        self.settings.insert(
            code,
            RuleSetting {
                detect,
                correct,
                message,
            },
        );
        self
    }

    pub fn insert(&mut self, code: ErrorCode, setting: RuleSetting) -> Option<RuleSetting> {
        self.settings.insert(code, setting)
    }

    pub(crate) fn push_unknown(&mut self, code: String) {
        self.unknown_codes.push(code);
    }

    pub fn should_detect(&self, code: ErrorCode) -> bool {
        self.settings.get(&code).is_some_and(|s| s.detect)
    }

    pub fn should_correct(&self, code: ErrorCode) -> bool {
        self.settings.get(&code).is_some_and(|s| s.correct)
    }

    pub fn setting(&self, code: ErrorCode) -> Option<&RuleSetting> {
        self.settings.get(&code)
    }

    /// Message for a code: the configured one, else the catalog text.
    pub fn message(&self, code: ErrorCode) -> &str {
        self.settings
            .get(&code)
            .and_then(|s| s.message.as_deref())
            .unwrap_or_else(|| code.message())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorCode, &RuleSetting)> {
        self.settings.iter().map(|(code, setting)| (*code, setting))
    }

    pub fn unknown_codes(&self) -> &[String] {
        &self.unknown_codes
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn detect_enabled_count(&self) -> usize {
        self.settings.values().filter(|s| s.detect).count()
    }

    pub fn correct_enabled_count(&self) -> usize {
        self.settings.values().filter(|s| s.correct).count()
    }
}

impl FromIterator<(ErrorCode, RuleSetting)> for RuleConfig {
    fn from_iter<I: IntoIterator<Item = (ErrorCode, RuleSetting)>>(iter: I) -> Self {
        Self {
            settings: iter.into_iter().collect(),
            unknown_codes: Vec::new(),
        }
    }
}

/// Parse a boolean switch cell. Accepts English and Slovenian spellings.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "da" => Some(true),
        "false" | "0" | "no" | "n" | "ne" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_code_is_disabled() {
        let config = RuleConfig::default();
        assert!(!config.should_detect(ErrorCode::EmailMissing));
        assert!(!config.should_correct(ErrorCode::EmailMissing));
    }

    #[test]
    fn test_with_rule_overrides_one_code() {
        let config = RuleConfig::all_enabled().with_rule(ErrorCode::CityFormatting, true, false);
        assert!(config.should_detect(ErrorCode::CityFormatting));
        assert!(!config.should_correct(ErrorCode::CityFormatting));
        assert!(config.should_correct(ErrorCode::CityWhitespace));
        assert_eq!(config.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("DA"), Some(true));
        assert_eq!(parse_flag(" no "), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
