//! Phone number rules (`31xx`).
//!
//! Numbers are judged on their digit projection: the digits, preceded by
//! a `+` when the value starts with one. The projection is split into a
//! recognized prefix and the national significant number (NSN), which
//! must have exactly eight digits.

use std::sync::LazyLock;

use dq_model::{CodeSet, CorrectionResult, ErrorCode};
use regex::Regex;

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{has_whitespace, present, remove_whitespace};

/// Canonical international prefix for Slovenia.
pub const CANONICAL_PREFIX: &str = "00386";

/// Digits in a Slovenian national significant number.
pub const NSN_DIGITS: usize = 8;

/// A value with this many digits holds more than one number.
const MULTIPLE_NUMBER_DIGITS: usize = 16;

/// Parts with at least this many digits count as a separate number.
const NUMBER_PART_DIGITS: usize = 6;

static NUMBER_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[,;/]|\b(?:ali|in|or)\b").expect("Invalid phone split regex")
});

/// Prefix and national number of a digit projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneShape {
    /// `+386`, `00386`, `386`, `0`, `+` (foreign) or empty.
    pub prefix: &'static str,
    pub nsn: String,
    /// `+00…`, or a country code followed by a trunk `0`.
    pub malformed_prefix: bool,
}

impl PhoneShape {
    pub fn parse(projection: &str) -> Self {
        let mut malformed_prefix = false;
        let projection = match projection.strip_prefix("+00") {
            Some(rest) => {
                malformed_prefix = true;
                format!("00{rest}")
            }
            None => projection.to_string(),
        };

        let (prefix, rest) = if let Some(rest) = projection.strip_prefix("+386") {
            ("+386", rest)
        } else if let Some(rest) = projection.strip_prefix("00386") {
            ("00386", rest)
        } else if projection.starts_with("386") && projection.len() >= 3 + NSN_DIGITS {
            ("386", &projection[3..])
        } else if let Some(rest) = projection.strip_prefix('0') {
            ("0", rest)
        } else if let Some(rest) = projection.strip_prefix('+') {
            ("+", rest)
        } else {
            ("", projection.as_str())
        };

        let nsn = if matches!(prefix, "+386" | "00386" | "386") && rest.starts_with('0') {
            malformed_prefix = true;
            rest.trim_start_matches('0')
        } else {
            rest
        };

        Self {
            prefix,
            nsn: nsn.to_string(),
            malformed_prefix,
        }
    }

    /// The projection with the prefix malformation removed.
    pub fn repaired(&self) -> String {
        format!("{}{}", self.prefix, self.nsn)
    }

    pub fn canonical(&self) -> String {
        format!("{CANONICAL_PREFIX}{}", self.nsn)
    }
}

/// Digits, with a leading `+` kept.
pub fn projection(value: &str) -> String {
    let trimmed = value.trim_start();
    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));
    out
}

fn is_pure(value: &str) -> bool {
    projection(value) == value
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

fn has_multiple_numbers(value: &str) -> bool {
    if value.matches('+').count() >= 2 || digit_count(value) >= MULTIPLE_NUMBER_DIGITS {
        return true;
    }
    NUMBER_SPLIT
        .split(value)
        .filter(|part| digit_count(part) >= NUMBER_PART_DIGITS)
        .count()
        >= 2
}

fn has_non_digit_characters(value: &str, multiple: bool) -> bool {
    value.trim_start().chars().enumerate().any(|(idx, c)| {
        let allowed = c.is_ascii_digit()
            || c.is_whitespace()
            || (c == '+' && idx == 0)
            || (multiple && (matches!(c, ',' | ';' | '/' | '+') || c.is_alphabetic()));
        !allowed
    })
}

fn keep_digits(value: &str) -> String {
    let trimmed = value.trim_start();
    let mut out = String::with_capacity(trimmed.len());
    for (idx, c) in trimmed.chars().enumerate() {
        if c.is_ascii_digit() || c.is_whitespace() || (c == '+' && idx == 0) {
            out.push(c);
        }
    }
    out
}

fn repair_prefix(value: &str) -> String {
    if is_pure(value) {
        PhoneShape::parse(value).repaired()
    } else {
        value.to_string()
    }
}

fn canonicalize(value: &str) -> String {
    if !is_pure(value) {
        return value.to_string();
    }
    let shape = PhoneShape::parse(value);
    if shape.nsn.len() == NSN_DIGITS {
        shape.canonical()
    } else {
        value.to_string()
    }
}

const SHAPE_SKIP: &[ErrorCode] = &[ErrorCode::PhoneMultipleNumbers];
const CANONICAL_SKIP: &[ErrorCode] = &[
    ErrorCode::PhoneMultipleNumbers,
    ErrorCode::PhoneTooFewDigits,
    ErrorCode::PhoneTooManyDigits,
];

pub fn detect(value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, ErrorCode::PhoneMissing);
    };
    let shape = PhoneShape::parse(&projection(value));

    let mut d = Detector::new(ctx.rules);
    d.rule(ErrorCode::PhoneWhitespace, &[], |_| has_whitespace(value));
    d.rule(ErrorCode::PhoneMultipleNumbers, &[], |_| {
        has_multiple_numbers(value)
    });
    d.rule(ErrorCode::PhoneNonDigitCharacters, &[], |codes| {
        has_non_digit_characters(value, codes.contains(ErrorCode::PhoneMultipleNumbers))
    });
    d.rule(ErrorCode::PhoneMalformedPrefix, SHAPE_SKIP, |_| {
        shape.malformed_prefix
    });
    d.rule(ErrorCode::PhoneTooFewDigits, SHAPE_SKIP, |_| {
        shape.nsn.len() < NSN_DIGITS
    });
    d.rule(ErrorCode::PhoneTooManyDigits, SHAPE_SKIP, |_| {
        shape.nsn.len() > NSN_DIGITS
    });
    d.rule(ErrorCode::PhoneNonCanonicalPrefix, CANONICAL_SKIP, |_| {
        shape.nsn.len() == NSN_DIGITS && shape.repaired() != shape.canonical()
    });
    d.finish()
}

pub fn correct(value: Option<&str>, detected: &CodeSet, ctx: &RuleContext<'_>) -> CorrectionResult {
    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(ErrorCode::PhoneMissing);
    c.apply(ErrorCode::PhoneWhitespace, &[], remove_whitespace);
    c.apply(ErrorCode::PhoneNonDigitCharacters, &[], keep_digits);
    c.apply(ErrorCode::PhoneMalformedPrefix, SHAPE_SKIP, repair_prefix);
    c.apply(
        ErrorCode::PhoneNonCanonicalPrefix,
        CANONICAL_SKIP,
        canonicalize,
    );
    c.finish(value)
}
