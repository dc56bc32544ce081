//! Postal code rules (`43xx`).

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use dq_model::{CodeSet, CorrectionResult, ErrorCode};
use regex::Regex;

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{has_whitespace, present, remove_whitespace};

/// Slovenian postal codes.
pub const POSTAL_RANGE: RangeInclusive<u32> = 1000..=9265;

const POSTAL_DIGITS: usize = 4;

static COUNTRY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SI\s*-?\s*").expect("Invalid country prefix regex"));

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn has_non_digit(value: &str) -> bool {
    value
        .chars()
        .any(|c| !c.is_ascii_digit() && !c.is_whitespace())
}

fn keep_digits(value: &str) -> String {
    COUNTRY_PREFIX
        .replace(value, "")
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

fn out_of_range(value: &str) -> bool {
    digits(value)
        .parse::<u32>()
        .is_ok_and(|code| !POSTAL_RANGE.contains(&code))
}

const RANGE_SKIP: &[ErrorCode] = &[ErrorCode::PostalCodeTooShort, ErrorCode::PostalCodeTooLong];

pub fn detect(value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, ErrorCode::PostalCodeMissing);
    };
    let digit_count = digits(value).len();

    let mut d = Detector::new(ctx.rules);
    d.rule(ErrorCode::PostalCodeWhitespace, &[], |_| {
        has_whitespace(value)
    });
    d.rule(ErrorCode::PostalCodeNonDigit, &[], |_| has_non_digit(value));
    d.rule(ErrorCode::PostalCodeTooShort, &[], |_| {
        digit_count < POSTAL_DIGITS
    });
    d.rule(ErrorCode::PostalCodeTooLong, &[], |_| {
        digit_count > POSTAL_DIGITS
    });
    d.rule(ErrorCode::PostalCodeOutOfRange, RANGE_SKIP, |_| {
        out_of_range(value)
    });
    d.finish()
}

pub fn correct(value: Option<&str>, detected: &CodeSet, ctx: &RuleContext<'_>) -> CorrectionResult {
    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(ErrorCode::PostalCodeMissing);
    c.apply(ErrorCode::PostalCodeWhitespace, &[], remove_whitespace);
    c.apply(ErrorCode::PostalCodeNonDigit, &[], keep_digits);
    c.finish(value)
}
