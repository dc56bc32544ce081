//! Street rules (`41xx`).
//!
//! The structural rules (`4107` onwards) look at the street as the
//! earlier corrections leave it: collapsed, without a `BŠ` token or
//! invalid characters, with abbreviations expanded.

use std::sync::LazyLock;

use dq_model::{CodeSet, CorrectionResult, ErrorCode};
use dq_standards::normalize::{contains_house_number_placeholder, strip_house_number_placeholder};
use regex::{Captures, Regex};

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{
    collapse_whitespace, dedupe_consecutive, has_consecutive_duplicates, has_irregular_whitespace,
    needs_sentence_case, present, sentence_case,
};

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("c", "cesta"),
    ("ul", "ulica"),
    ("nab", "nabrežje"),
    ("nas", "naselje"),
];

static ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[^\p{L}])(c|ul|nab|nas)\.\s*").expect("Invalid street abbreviation regex")
});

static MISSING_SPACE_AFTER_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([\p{L}\d])").expect("Invalid period spacing regex"));

static HOUSE_NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,4}[a-zA-Z]{0,2}$").expect("Invalid house number regex"));

static GLUED_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{L}+)\d+$").expect("Invalid glued digits regex"));

fn is_allowed_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '.' | ',' | '-' | '\'' | '(' | ')')
}

fn has_invalid_characters(value: &str) -> bool {
    !value.chars().all(is_allowed_char)
}

/// Drop invalid characters. A `BŠ` token the removal itself forms
/// (`b#š`) goes too.
fn remove_invalid_characters(value: &str) -> String {
    let kept: String = value.chars().filter(|c| is_allowed_char(*c)).collect();
    let kept = collapse_whitespace(&kept);
    if !contains_house_number_placeholder(value) && contains_house_number_placeholder(&kept) {
        strip_house_number_placeholder(&kept)
    } else {
        kept
    }
}

fn expand_abbreviations(value: &str) -> String {
    let mut current = value.to_string();
    // Each pass consumes one period, so the loop ends.
    while ABBREVIATION.is_match(&current) {
        current = ABBREVIATION
            .replace(&current, |caps: &Captures<'_>| {
                let short = &caps[2];
                let full = ABBREVIATIONS
                    .iter()
                    .find(|(abbr, _)| short.eq_ignore_ascii_case(abbr))
                    .map_or(short, |(_, full)| *full);
                let full = if short.starts_with(char::is_uppercase) {
                    sentence_case(full)
                } else {
                    full.to_string()
                };
                format!("{}{full} ", &caps[1])
            })
            .into_owned();
    }
    collapse_whitespace(&current)
}

fn insert_space_after_period(value: &str) -> String {
    MISSING_SPACE_AFTER_PERIOD
        .replace_all(value, ". $1")
        .into_owned()
}

fn starts_with_digit(value: &str) -> bool {
    value.starts_with(|c: char| c.is_ascii_digit()) && !is_only_digits(value)
}

fn is_only_digits(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace())
}

fn has_glued_digits(value: &str) -> bool {
    value
        .split_whitespace()
        .next_back()
        .is_some_and(|last| GLUED_DIGITS.is_match(last))
}

fn strip_glued_digits(value: &str) -> String {
    let mut words: Vec<&str> = value.split_whitespace().collect();
    if let Some(last) = words.pop() {
        match GLUED_DIGITS.captures(last).and_then(|caps| caps.get(1)) {
            Some(word) => words.push(word.as_str()),
            None => words.push(last),
        }
    }
    words.join(" ")
}

fn ends_with_house_number(words: &[&str]) -> bool {
    match words.split_last() {
        Some((last, rest)) => {
            HOUSE_NUMBER_TOKEN.is_match(last)
                && rest.iter().any(|w| w.chars().any(char::is_alphabetic))
        }
        None => false,
    }
}

fn remove_house_number(value: &str) -> String {
    let mut words: Vec<&str> = value.split_whitespace().collect();
    while ends_with_house_number(&words) {
        words.pop();
    }
    words.join(" ")
}

/// The street after the cleanup corrections, used by the structural rules.
fn cleaned(value: &str) -> String {
    let value = strip_house_number_placeholder(value);
    let value = expand_abbreviations(&remove_invalid_characters(&value));
    insert_space_after_period(&value)
}

const ONLY_DIGITS_SKIP: &[ErrorCode] = &[ErrorCode::StreetOnlyDigits];
const GLUED_DIGITS_SKIP: &[ErrorCode] = &[
    ErrorCode::StreetStartsWithDigit,
    ErrorCode::StreetOnlyDigits,
];

pub fn detect(value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, ErrorCode::StreetMissing);
    };
    let cleaned = cleaned(value);
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let mut d = Detector::new(ctx.rules);
    d.rule(ErrorCode::StreetWhitespace, &[], |_| {
        has_irregular_whitespace(value)
    });
    d.rule(ErrorCode::StreetHouseNumberPlaceholder, &[], |_| {
        contains_house_number_placeholder(value)
    });
    d.rule(ErrorCode::StreetInvalidCharacters, &[], |codes| {
        if codes.contains(ErrorCode::StreetHouseNumberPlaceholder) {
            has_invalid_characters(&strip_house_number_placeholder(value))
        } else {
            has_invalid_characters(value)
        }
    });
    d.rule(ErrorCode::StreetInvalidAbbreviation, &[], |_| {
        ABBREVIATION.is_match(value)
    });
    d.rule(ErrorCode::StreetNoSpaceAfterPeriod, &[], |_| {
        let stripped = strip_house_number_placeholder(value);
        MISSING_SPACE_AFTER_PERIOD.is_match(&expand_abbreviations(&stripped))
    });
    d.rule(ErrorCode::StreetStartsWithDigit, &[], |_| {
        starts_with_digit(&cleaned)
    });
    d.rule(ErrorCode::StreetOnlyDigits, &[], |_| {
        is_only_digits(&cleaned)
    });
    d.rule(ErrorCode::StreetTrailingDigit, GLUED_DIGITS_SKIP, |_| {
        has_glued_digits(&cleaned)
    });
    d.rule(
        ErrorCode::StreetContainsHouseNumber,
        ONLY_DIGITS_SKIP,
        |_| ends_with_house_number(&words),
    );
    d.rule(ErrorCode::StreetDuplicateWords, &[], |_| {
        has_consecutive_duplicates(&cleaned)
    });
    d.rule(ErrorCode::StreetFormatting, ONLY_DIGITS_SKIP, |_| {
        needs_sentence_case(&cleaned)
    });
    d.finish()
}

pub fn correct(value: Option<&str>, detected: &CodeSet, ctx: &RuleContext<'_>) -> CorrectionResult {
    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(ErrorCode::StreetMissing);
    c.apply(ErrorCode::StreetWhitespace, &[], collapse_whitespace);
    c.apply(
        ErrorCode::StreetHouseNumberPlaceholder,
        &[],
        strip_house_number_placeholder,
    );
    c.apply(
        ErrorCode::StreetInvalidCharacters,
        &[],
        remove_invalid_characters,
    );
    c.apply(
        ErrorCode::StreetInvalidAbbreviation,
        &[],
        expand_abbreviations,
    );
    c.apply(
        ErrorCode::StreetNoSpaceAfterPeriod,
        &[],
        insert_space_after_period,
    );
    c.apply(
        ErrorCode::StreetTrailingDigit,
        GLUED_DIGITS_SKIP,
        strip_glued_digits,
    );
    c.apply(
        ErrorCode::StreetContainsHouseNumber,
        ONLY_DIGITS_SKIP,
        remove_house_number,
    );
    c.apply(ErrorCode::StreetDuplicateWords, &[], dedupe_consecutive);
    c.apply(ErrorCode::StreetFormatting, ONLY_DIGITS_SKIP, sentence_case);
    c.finish(value)
}
