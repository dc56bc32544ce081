//! First name and surname rules (`11xx`, `12xx`).
//!
//! Both fields share one rule shape; [`NameCodes`] maps each rule to the
//! field's code.

use std::sync::LazyLock;

use dq_model::{CodeSet, CorrectionResult, ErrorCode};
use regex::Regex;

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{
    collapse_whitespace, dedupe_consecutive, has_consecutive_duplicates, has_irregular_whitespace,
    present, title_case_words,
};

/// Characters that join two names in one field.
const NAME_SEPARATORS: &[char] = &[',', '/', '&', '+', ';'];

/// Conjunctions that join two names when they stand alone between words.
const CONJUNCTIONS: &[&str] = &["in", "ali", "and", "und"];

/// A single initial (`J`, `J.`) or run of initials (`J.K.`).
static INITIALS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\p{L}\.)+$|^\p{L}$").expect("Invalid initials regex")
});

/// Codes of one name-like field.
#[derive(Debug, Clone, Copy)]
pub struct NameCodes {
    pub missing: ErrorCode,
    pub whitespace: ErrorCode,
    pub invalid_characters: ErrorCode,
    pub initials_only: ErrorCode,
    pub two_names: ErrorCode,
    pub duplicate_words: ErrorCode,
    pub formatting: ErrorCode,
}

impl NameCodes {
    pub const FIRST_NAME: NameCodes = NameCodes {
        missing: ErrorCode::FirstNameMissing,
        whitespace: ErrorCode::FirstNameWhitespace,
        invalid_characters: ErrorCode::FirstNameInvalidCharacters,
        initials_only: ErrorCode::FirstNameInitialsOnly,
        two_names: ErrorCode::FirstNameTwoNames,
        duplicate_words: ErrorCode::FirstNameDuplicateWords,
        formatting: ErrorCode::FirstNameFormatting,
    };

    pub const LAST_NAME: NameCodes = NameCodes {
        missing: ErrorCode::LastNameMissing,
        whitespace: ErrorCode::LastNameWhitespace,
        invalid_characters: ErrorCode::LastNameInvalidCharacters,
        initials_only: ErrorCode::LastNameInitialsOnly,
        two_names: ErrorCode::LastNameTwoNames,
        duplicate_words: ErrorCode::LastNameDuplicateWords,
        formatting: ErrorCode::LastNameFormatting,
    };
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_alphabetic()
        || ch.is_whitespace()
        || matches!(ch, '-' | '\'' | '.')
        || NAME_SEPARATORS.contains(&ch)
}

fn is_conjunction(word: &str) -> bool {
    CONJUNCTIONS.iter().any(|c| word.eq_ignore_ascii_case(c))
}

fn is_initials_only(value: &str) -> bool {
    let mut tokens = value.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|token| INITIALS_TOKEN.is_match(token))
}

fn has_two_names(value: &str) -> bool {
    if value.contains(NAME_SEPARATORS) {
        return true;
    }
    let words: Vec<&str> = value.split_whitespace().collect();
    words.len() >= 3 && words[1..words.len() - 1].iter().any(|w| is_conjunction(w))
}

fn format_name(value: &str) -> String {
    title_case_words(value, is_conjunction)
}

fn remove_invalid_characters(value: &str) -> String {
    let kept: String = value.chars().filter(|c| is_allowed_char(*c)).collect();
    collapse_whitespace(&kept)
}

pub fn detect(value: Option<&str>, codes: NameCodes, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, codes.missing);
    };

    let mut d = Detector::new(ctx.rules);
    d.rule(codes.whitespace, &[], |_| has_irregular_whitespace(value));
    d.rule(codes.invalid_characters, &[], |_| {
        !value.chars().all(is_allowed_char)
    });
    d.rule(codes.initials_only, &[codes.invalid_characters], |_| {
        is_initials_only(value)
    });
    d.rule(codes.two_names, &[], |_| has_two_names(value));
    d.rule(codes.duplicate_words, &[], |_| {
        has_consecutive_duplicates(value)
    });
    d.rule(codes.formatting, &[codes.initials_only], |_| {
        format_name(value) != value
    });
    d.finish()
}

pub fn correct(
    value: Option<&str>,
    detected: &CodeSet,
    codes: NameCodes,
    ctx: &RuleContext<'_>,
) -> CorrectionResult {
    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(codes.missing);
    c.apply(codes.whitespace, &[], collapse_whitespace);
    c.apply(codes.invalid_characters, &[], remove_invalid_characters);
    c.apply(codes.duplicate_words, &[], dedupe_consecutive);
    c.apply(codes.formatting, &[codes.initials_only], format_name);
    c.finish(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::with_context;

    fn codes_of(value: &str, codes: NameCodes) -> String {
        with_context(|ctx| detect(Some(value), codes, ctx).to_string())
    }

    #[test]
    fn test_detect_name_rules() {
        let first = NameCodes::FIRST_NAME;
        assert_eq!(codes_of("Ana", first), "");
        assert_eq!(codes_of("  ana ", first), "1102;1107");
        assert_eq!(codes_of("Ana3", first), "1103");
        assert_eq!(codes_of("J. K.", first), "1104");
        assert_eq!(codes_of("Janez in Marija", first), "1105");
        assert_eq!(codes_of("Janez & Marija", first), "1105");
        assert_eq!(codes_of("Ana Ana", first), "1106");
        assert_eq!(codes_of("ana-marija", first), "1107");
        assert_eq!(codes_of("NOVAK", NameCodes::LAST_NAME), "1207");
    }

    #[test]
    fn test_compound_names_are_not_two_names() {
        let first = NameCodes::FIRST_NAME;
        assert_eq!(codes_of("Ana Marija", first), "");
        assert_eq!(codes_of("Ana-Marija", first), "");
        assert_eq!(codes_of("Novak Horvat", NameCodes::LAST_NAME), "");
    }

    #[test]
    fn test_correct_name() {
        with_context(|ctx| {
            let codes = NameCodes::FIRST_NAME;
            let detected = detect(Some("  ana  ANA "), codes, ctx);
            assert_eq!(detected.to_string(), "1102;1106;1107");
            let result = correct(Some("  ana  ANA "), &detected, codes, ctx);
            assert_eq!(result.corrected_value.as_deref(), Some("Ana"));
            assert!(result.uncorrected.is_empty());
        });
    }

    #[test]
    fn test_two_names_stay_uncorrected() {
        with_context(|ctx| {
            let codes = NameCodes::FIRST_NAME;
            let detected = detect(Some("janez in marija"), codes, ctx);
            assert_eq!(detected.to_string(), "1105;1107");
            let result = correct(Some("janez in marija"), &detected, codes, ctx);
            assert_eq!(result.corrected_value.as_deref(), Some("Janez in Marija"));
            assert_eq!(result.uncorrected.to_string(), "1105");
        });
    }

    #[test]
    fn test_name_without_letters_stays_uncorrected() {
        with_context(|ctx| {
            let codes = NameCodes::FIRST_NAME;
            let detected = detect(Some("3"), codes, ctx);
            assert_eq!(detected.to_string(), "1103");
            let result = correct(Some("3"), &detected, codes, ctx);
            assert_eq!(result.corrected_value, None);
            assert_eq!(result.uncorrected.to_string(), "1103");
        });
    }

    #[test]
    fn test_missing_short_circuits() {
        with_context(|ctx| {
            let codes = NameCodes::LAST_NAME;
            let detected = detect(Some(" x "), codes, ctx);
            assert_eq!(detected.to_string(), "1201");
            let result = correct(Some(" x "), &detected, codes, ctx);
            assert_eq!(result.corrected_value, None);
            assert_eq!(result.corrected.to_string(), "1201");
        });
    }
}
