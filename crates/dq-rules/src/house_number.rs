//! House number rules (`42xx`).

use std::sync::LazyLock;

use dq_model::{CodeSet, CorrectionResult, ErrorCode};
use dq_standards::normalize::{
    contains_house_number_placeholder, is_house_number_placeholder, strip_house_number_placeholder,
};
use regex::Regex;

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{collapse_whitespace, has_irregular_whitespace, present};

/// Longest first numeric group of a plausible house number.
const MAX_DIGITS: usize = 3;

static LEADING_ZERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\D*)0+(\d)").expect("Invalid leading zero regex"));

static DIGIT_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit group regex"));

static ROMAN_NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:X{1,3}(?:IX|IV|V?I{0,3})|IX|IV|V?I{1,3}|V)$")
        .expect("Invalid roman numeral regex")
});

static SPACED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)[\s\-]+([a-zA-Z]{1,2})\s*$").expect("Invalid spaced suffix regex")
});

static HOUSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[a-zA-Z]{0,2}$").expect("Invalid house number regex"));

fn trim_trailing_periods(value: &str) -> String {
    value
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

fn strip_leading_zeros(value: &str) -> String {
    LEADING_ZERO.replace(value, "${1}${2}").into_owned()
}

fn first_group_len(value: &str) -> usize {
    DIGIT_GROUP
        .find(value)
        .map_or(0, |group| group.as_str().trim_start_matches('0').len())
}

fn has_roman_numeral(value: &str) -> bool {
    value
        .split(|c: char| c.is_whitespace() || matches!(c, '/' | '-' | ',' | '.'))
        .any(|token| ROMAN_NUMERAL.is_match(token))
}

fn reflow_suffix(value: &str) -> String {
    SPACED_SUFFIX.replace(value, "${1}${2}").into_owned()
}

const PLACEHOLDER_SKIP: &[ErrorCode] = &[ErrorCode::HouseNumberPlaceholderOnly];
const SPACING_SKIP: &[ErrorCode] = &[
    ErrorCode::HouseNumberPlaceholderOnly,
    ErrorCode::HouseNumberTrailingPeriod,
    ErrorCode::HouseNumberRomanNumeral,
    ErrorCode::HouseNumberMultipleGroups,
];
const STRUCTURE_SKIP: &[ErrorCode] = &[
    ErrorCode::HouseNumberPlaceholderOnly,
    ErrorCode::HouseNumberRomanNumeral,
    ErrorCode::HouseNumberMultipleGroups,
    ErrorCode::HouseNumberExcessDigits,
    ErrorCode::HouseNumberInvalidSpacing,
];

pub fn detect(value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, ErrorCode::HouseNumberMissing);
    };
    // Everything after the placeholder rules reads the number without its
    // `BŠ` token.
    let base = strip_house_number_placeholder(value);

    let mut d = Detector::new(ctx.rules);
    d.rule(ErrorCode::HouseNumberWhitespace, &[], |_| {
        has_irregular_whitespace(value)
    });
    d.rule(ErrorCode::HouseNumberPlaceholderOnly, &[], |_| {
        is_house_number_placeholder(value)
    });
    d.rule(
        ErrorCode::HouseNumberPlaceholderWithDigits,
        PLACEHOLDER_SKIP,
        |_| contains_house_number_placeholder(value) && value.chars().any(|c| c.is_ascii_digit()),
    );
    d.rule(ErrorCode::HouseNumberLeadingZero, PLACEHOLDER_SKIP, |_| {
        LEADING_ZERO.is_match(&base)
    });
    // A trailing `b.š.` counts only when 4204 will strip it.
    d.rule(
        ErrorCode::HouseNumberTrailingPeriod,
        PLACEHOLDER_SKIP,
        |codes| {
            if codes.contains(ErrorCode::HouseNumberPlaceholderWithDigits) {
                base.ends_with('.')
            } else {
                collapse_whitespace(value).ends_with('.')
            }
        },
    );
    d.rule(ErrorCode::HouseNumberRomanNumeral, PLACEHOLDER_SKIP, |_| {
        has_roman_numeral(&base)
    });
    d.rule(
        ErrorCode::HouseNumberMultipleGroups,
        PLACEHOLDER_SKIP,
        |_| DIGIT_GROUP.find_iter(&base).count() > 1,
    );
    d.rule(ErrorCode::HouseNumberExcessDigits, PLACEHOLDER_SKIP, |_| {
        first_group_len(&base) > MAX_DIGITS
    });
    d.rule(ErrorCode::HouseNumberInvalidSpacing, SPACING_SKIP, |_| {
        SPACED_SUFFIX.is_match(&base)
    });
    d.rule(ErrorCode::HouseNumberStructure, STRUCTURE_SKIP, |_| {
        !HOUSE_NUMBER.is_match(&trim_trailing_periods(&base))
    });
    d.finish()
}

pub fn correct(value: Option<&str>, detected: &CodeSet, ctx: &RuleContext<'_>) -> CorrectionResult {
    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(ErrorCode::HouseNumberMissing);
    c.apply(ErrorCode::HouseNumberWhitespace, &[], collapse_whitespace);
    c.clear(ErrorCode::HouseNumberPlaceholderOnly);
    c.apply(
        ErrorCode::HouseNumberPlaceholderWithDigits,
        PLACEHOLDER_SKIP,
        strip_house_number_placeholder,
    );
    c.apply(
        ErrorCode::HouseNumberLeadingZero,
        PLACEHOLDER_SKIP,
        strip_leading_zeros,
    );
    c.apply(
        ErrorCode::HouseNumberTrailingPeriod,
        PLACEHOLDER_SKIP,
        trim_trailing_periods,
    );
    c.apply(
        ErrorCode::HouseNumberInvalidSpacing,
        SPACING_SKIP,
        reflow_suffix,
    );
    c.finish(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::with_context;

    fn codes_of(value: &str) -> String {
        with_context(|ctx| detect(Some(value), ctx).to_string())
    }

    fn corrected(value: &str) -> (Option<String>, String) {
        with_context(|ctx| {
            let detected = detect(Some(value), ctx);
            let result = correct(Some(value), &detected, ctx);
            assert!(result.is_partition_of(&detected));
            (result.corrected_value, result.uncorrected.to_string())
        })
    }

    #[test]
    fn test_detect_house_number_rules() {
        assert_eq!(codes_of("12a"), "");
        assert_eq!(codes_of(" 12 "), "4202");
        assert_eq!(codes_of("BŠ"), "4203");
        assert_eq!(codes_of("12 BŠ"), "4204");
        assert_eq!(codes_of("007"), "4205");
        assert_eq!(codes_of("12."), "4206");
        assert_eq!(codes_of("12/II"), "4207");
        assert_eq!(codes_of("12/3"), "4208");
        assert_eq!(codes_of("12345"), "4209");
        assert_eq!(codes_of("5 a"), "4210");
        assert_eq!(codes_of("a12"), "4211");
    }

    #[test]
    fn test_leading_zero_is_stripped() {
        assert_eq!(corrected("007"), (Some("7".to_string()), String::new()));
        assert_eq!(corrected("0"), (None, String::new()));
    }

    #[test]
    fn test_corrections() {
        assert_eq!(
            corrected("12 b.š."),
            (Some("12".to_string()), String::new())
        );
        assert_eq!(corrected("12a."), (Some("12a".to_string()), String::new()));
        assert_eq!(corrected("5 a"), (Some("5a".to_string()), String::new()));
        assert_eq!(corrected("5-b"), (Some("5b".to_string()), String::new()));
        assert_eq!(corrected("12/3"), (None, "4208".to_string()));
    }

    #[test]
    fn test_trailing_periods_are_trimmed_in_one_pass() {
        assert_eq!(corrected("12.. ."), (Some("12".to_string()), String::new()));
        assert_eq!(codes_of("12"), "");
    }

    #[test]
    fn test_placeholder_period_without_digits() {
        with_context(|ctx| {
            let value = "IV bš.";
            let detected = detect(Some(value), ctx);
            assert!(detected.contains(ErrorCode::HouseNumberTrailingPeriod));
            let result = correct(Some(value), &detected, ctx);
            let fixed = result.corrected_value.expect("period trimmed");
            assert!(!detect(Some(&fixed), ctx).contains(ErrorCode::HouseNumberTrailingPeriod));
        });
    }

    #[test]
    fn test_period_only_stays_uncorrected() {
        let (value, uncorrected) = corrected(". .");
        assert_eq!(value, None);
        assert!(uncorrected.contains("4206"));
    }

    #[test]
    fn test_placeholder_alone_is_cleared() {
        with_context(|ctx| {
            let detected = detect(Some("b/š"), ctx);
            assert_eq!(detected.to_string(), "4203");
            let result = correct(Some("b/š"), &detected, ctx);
            assert_eq!(result.corrected_value, None);
            assert_eq!(result.corrected.to_string(), "4203");
        });
    }
}
