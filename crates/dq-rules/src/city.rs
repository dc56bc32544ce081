//! City rules (`44xx`).

use dq_model::{CodeSet, CorrectionResult, ErrorCode};

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{
    collapse_whitespace, dedupe_consecutive, has_consecutive_duplicates, has_irregular_whitespace,
    needs_sentence_case, present, sentence_case,
};

/// Abbreviations that are part of official place names (`Sv. Ana`).
const ALLOWED_ABBREVIATIONS: &[&str] = &["sv.", "slov.", "sp.", "zg.", "št."];

/// Abbreviated city names and their full form.
const CITY_ABBREVIATIONS: &[(&str, &str)] = &[
    ("lj.", "Ljubljana"),
    ("mb.", "Maribor"),
    ("ms.", "Murska Sobota"),
    ("nm.", "Novo mesto"),
    ("ce.", "Celje"),
    ("kr.", "Kranj"),
    ("kp.", "Koper"),
];

fn is_allowed_abbreviation(token: &str) -> bool {
    let lowered = token.to_lowercase();
    ALLOWED_ABBREVIATIONS.contains(&lowered.as_str())
}

fn expansion(token: &str) -> Option<&'static str> {
    let lowered = token.to_lowercase();
    CITY_ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == lowered)
        .map(|(_, full)| *full)
}

fn is_abbreviation(token: &str) -> bool {
    is_allowed_abbreviation(token) || expansion(token).is_some()
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_whitespace() || ch.is_ascii_digit() || matches!(ch, '-' | '\'')
}

fn has_invalid_characters(value: &str) -> bool {
    value
        .split_whitespace()
        .filter(|token| !is_abbreviation(token))
        .any(|token| !token.chars().all(is_allowed_char))
}

fn remove_invalid_characters(value: &str) -> String {
    let tokens: Vec<String> = value
        .split_whitespace()
        .map(|token| {
            if is_abbreviation(token) {
                token.to_string()
            } else {
                token.chars().filter(|c| is_allowed_char(*c)).collect()
            }
        })
        .collect();
    collapse_whitespace(&tokens.join(" "))
}

fn remove_digits(value: &str) -> String {
    let kept: String = value.chars().filter(|c| !c.is_ascii_digit()).collect();
    collapse_whitespace(&kept)
}

fn has_city_abbreviation(value: &str) -> bool {
    value
        .split_whitespace()
        .any(|token| expansion(token).is_some())
}

fn expand_abbreviations(value: &str) -> String {
    value
        .split_whitespace()
        .map(|token| expansion(token).unwrap_or(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The city after the cleanup corrections, used by the later rules.
fn cleaned(value: &str) -> String {
    expand_abbreviations(&remove_invalid_characters(&remove_digits(value)))
}

pub fn detect(value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, ErrorCode::CityMissing);
    };
    let cleaned = cleaned(value);

    let mut d = Detector::new(ctx.rules);
    d.rule(ErrorCode::CityWhitespace, &[], |_| {
        has_irregular_whitespace(value)
    });
    d.rule(ErrorCode::CityContainsDigits, &[], |_| {
        value.chars().any(|c| c.is_ascii_digit())
    });
    d.rule(ErrorCode::CityInvalidCharacters, &[], |_| {
        has_invalid_characters(value)
    });
    d.rule(ErrorCode::CityInvalidAbbreviation, &[], |_| {
        has_city_abbreviation(value)
    });
    d.rule(ErrorCode::CityDuplicateWords, &[], |_| {
        has_consecutive_duplicates(&cleaned)
    });
    d.rule(ErrorCode::CityFormatting, &[], |_| {
        needs_sentence_case(&cleaned)
    });
    d.finish()
}

pub fn correct(value: Option<&str>, detected: &CodeSet, ctx: &RuleContext<'_>) -> CorrectionResult {
    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(ErrorCode::CityMissing);
    c.apply(ErrorCode::CityWhitespace, &[], collapse_whitespace);
    c.apply(ErrorCode::CityContainsDigits, &[], remove_digits);
    c.apply(
        ErrorCode::CityInvalidCharacters,
        &[],
        remove_invalid_characters,
    );
    c.apply(
        ErrorCode::CityInvalidAbbreviation,
        &[],
        expand_abbreviations,
    );
    c.apply(ErrorCode::CityDuplicateWords, &[], dedupe_consecutive);
    c.apply(ErrorCode::CityFormatting, &[], sentence_case);
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
    fn test_detect_city_rules() {
        assert_eq!(codes_of("Ljubljana"), "");
        assert_eq!(codes_of("Novo mesto"), "");
        assert_eq!(codes_of("Sv. Ana"), "");
        assert_eq!(codes_of(" Celje"), "4402");
        assert_eq!(codes_of("1000 Ljubljana"), "4403");
        assert_eq!(codes_of("Celje!"), "4404");
        assert_eq!(codes_of("Lj."), "4405");
        assert_eq!(codes_of("Ljubljana Ljubljana"), "4406");
        assert_eq!(codes_of("MARIBOR"), "4407");
    }

    #[test]
    fn test_duplicate_city_is_collapsed() {
        assert_eq!(
            corrected("Ljubljana Ljubljana"),
            (Some("Ljubljana".to_string()), String::new())
        );
    }

    #[test]
    fn test_corrections() {
        assert_eq!(
            corrected("1000 Ljubljana"),
            (Some("Ljubljana".to_string()), String::new())
        );
        assert_eq!(
            corrected("lj."),
            (Some("Ljubljana".to_string()), String::new())
        );
        assert_eq!(
            corrected("Celje!"),
            (Some("Celje".to_string()), String::new())
        );
        assert_eq!(
            corrected("MARIBOR"),
            (Some("Maribor".to_string()), String::new())
        );
        assert_eq!(
            corrected("lJUBLJANA"),
            (Some("Ljubljana".to_string()), String::new())
        );
        assert_eq!(codes_of("Ljubljana"), "");
        assert_eq!(
            corrected("zg. kungota"),
            (Some("Zg. kungota".to_string()), String::new())
        );
    }
}
