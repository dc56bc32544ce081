//! Email rules (`21xx`).

use dq_model::{CodeSet, CorrectionResult, ErrorCode};

use crate::context::RuleContext;
use crate::eval::{Corrector, Detector, missing_only};
use crate::text::{fold_diacritics, has_whitespace, present, remove_whitespace};

/// Characters that separate two addresses written into one field.
const EMAIL_SEPARATORS: &[char] = &[',', ';', '/'];

/// Misspelled domains with a single obvious correction.
const DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("gmal.com", "gmail.com"),
    ("gamil.com", "gmail.com"),
    ("gmaill.com", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("gmail.con", "gmail.com"),
    ("gmail.cm", "gmail.com"),
    ("gmail.si", "gmail.com"),
    ("hotmial.com", "hotmail.com"),
    ("hotmal.com", "hotmail.com"),
    ("hotmail.co", "hotmail.com"),
    ("outlok.com", "outlook.com"),
    ("outloo.com", "outlook.com"),
    ("yaho.com", "yahoo.com"),
    ("yahooo.com", "yahoo.com"),
    ("siol.com", "siol.net"),
    ("siol.si", "siol.net"),
    ("siol.ne", "siol.net"),
    ("t2.net", "t-2.net"),
    ("t-2.com", "t-2.net"),
    ("amis.si", "amis.net"),
];

const STRUCTURE_SKIP: &[ErrorCode] = &[
    ErrorCode::EmailPossiblyTwoEmails,
    ErrorCode::EmailMissingAt,
    ErrorCode::EmailMultipleAt,
];

const UNCOMMON_DOMAIN_SKIP: &[ErrorCode] = &[
    ErrorCode::EmailPossiblyTwoEmails,
    ErrorCode::EmailMissingAt,
    ErrorCode::EmailMultipleAt,
    ErrorCode::EmailMalformedDomainPart,
    ErrorCode::EmailInvalidDomainShape,
];

pub(crate) fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '%' | '+' | '-' | '@')
}

fn address_parts(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| EMAIL_SEPARATORS.contains(&c) || c.is_whitespace())
        .filter(|part| !part.is_empty())
}

fn possibly_two_emails(value: &str) -> bool {
    let addresses = address_parts(value).filter(|part| part.contains('@'));
    addresses.count() >= 2
}

/// Whitespace fix for a field holding several addresses: keep them apart
/// with `;` instead of gluing them together.
fn join_addresses(value: &str) -> String {
    address_parts(value).collect::<Vec<_>>().join(";")
}

fn has_invalid_characters(value: &str, keep_separators: bool) -> bool {
    value.chars().any(|c| {
        !(c.is_whitespace()
            || is_allowed_char(c)
            || (keep_separators && EMAIL_SEPARATORS.contains(&c)))
    })
}

fn strip_invalid_characters(value: &str, keep_separators: bool) -> String {
    fold_diacritics(value)
        .chars()
        .filter(|c| {
            c.is_whitespace()
                || is_allowed_char(*c)
                || (keep_separators && EMAIL_SEPARATORS.contains(c))
        })
        .collect()
}

/// Local and domain part of a value with exactly one `@`.
pub(crate) fn split_address(value: &str) -> Option<(&str, &str)> {
    let (local, domain) = value.split_once('@')?;
    (!domain.contains('@')).then_some((local, domain))
}

fn collapse_dots(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '.' && out.ends_with('.') {
            continue;
        }
        out.push(ch);
    }
    out
}

pub(crate) fn is_malformed_local(local: &str) -> bool {
    local.is_empty() || local.starts_with('.') || local.ends_with('.') || local.contains("..")
}

pub(crate) fn is_malformed_domain(domain: &str) -> bool {
    domain.is_empty()
        || domain.starts_with(['.', '-'])
        || domain.ends_with(['.', '-'])
        || domain.contains("..")
}

fn repair_local(local: &str) -> String {
    collapse_dots(local).trim_matches('.').to_string()
}

fn repair_domain(domain: &str) -> String {
    collapse_dots(domain).trim_matches(['.', '-']).to_string()
}

/// A domain has a dot and a 2-24 letter top-level label.
pub(crate) fn has_valid_domain_shape(domain: &str) -> bool {
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    (2..=24).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Rewrite one part of a single-`@` address; other values pass through.
fn map_part(
    value: &str,
    local_fn: impl Fn(&str) -> String,
    domain_fn: impl Fn(&str) -> String,
) -> String {
    match split_address(value) {
        Some((local, domain)) => {
            let local = local_fn(local);
            let domain = domain_fn(domain);
            if local.is_empty() || domain.is_empty() {
                value.to_string()
            } else {
                format!("{local}@{domain}")
            }
        }
        None => value.to_string(),
    }
}

fn fix_domain_typo(domain: &str, ctx: &RuleContext<'_>) -> String {
    let lowered = domain.to_ascii_lowercase();
    DOMAIN_TYPOS
        .iter()
        .find(|(typo, fixed)| *typo == lowered && ctx.email_domains.contains(fixed))
        .map_or_else(|| domain.to_string(), |(_, fixed)| (*fixed).to_string())
}

pub fn detect(value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    let Some(value) = present(value) else {
        return missing_only(ctx.rules, ErrorCode::EmailMissing);
    };
    let compact = remove_whitespace(value);

    let mut d = Detector::new(ctx.rules);
    d.rule(ErrorCode::EmailWhitespace, &[], |_| has_whitespace(value));
    d.rule(ErrorCode::EmailPossiblyTwoEmails, &[], |_| {
        possibly_two_emails(value)
    });
    d.rule(ErrorCode::EmailInvalidCharacters, &[], |codes| {
        has_invalid_characters(value, codes.contains(ErrorCode::EmailPossiblyTwoEmails))
    });
    d.rule(
        ErrorCode::EmailMissingAt,
        &[ErrorCode::EmailPossiblyTwoEmails],
        |_| !compact.contains('@'),
    );
    d.rule(
        ErrorCode::EmailMultipleAt,
        &[ErrorCode::EmailPossiblyTwoEmails, ErrorCode::EmailMissingAt],
        |_| compact.matches('@').count() > 1,
    );

    // Every rule below runs on a value with exactly one `@`.
    if let Some((local, domain)) = split_address(&compact) {
        d.rule(ErrorCode::EmailMalformedLocalPart, STRUCTURE_SKIP, |_| {
            is_malformed_local(local)
        });
        d.rule(ErrorCode::EmailMalformedDomainPart, STRUCTURE_SKIP, |_| {
            is_malformed_domain(domain)
        });
        // Shape and commonness are judged on the domain as the earlier
        // corrections would leave it.
        let repaired = repair_domain(&strip_invalid_characters(domain, false));
        d.rule(ErrorCode::EmailInvalidDomainShape, STRUCTURE_SKIP, |_| {
            !has_valid_domain_shape(&repaired)
        });
        d.rule(ErrorCode::EmailUncommonDomain, UNCOMMON_DOMAIN_SKIP, |_| {
            !ctx.email_domains.contains(&repaired)
        });
    }
    d.finish()
}

pub fn correct(value: Option<&str>, detected: &CodeSet, ctx: &RuleContext<'_>) -> CorrectionResult {
    let keep_separators = detected.contains(ErrorCode::EmailPossiblyTwoEmails);

    let mut c = Corrector::new(ctx.rules, detected, value);
    c.clear(ErrorCode::EmailMissing);
    if keep_separators {
        c.apply(ErrorCode::EmailWhitespace, &[], join_addresses);
    } else {
        c.apply(ErrorCode::EmailWhitespace, &[], remove_whitespace);
    }
    c.apply(ErrorCode::EmailInvalidCharacters, &[], |v| {
        strip_invalid_characters(v, keep_separators)
    });
    c.apply(ErrorCode::EmailMalformedLocalPart, STRUCTURE_SKIP, |v| {
        map_part(v, repair_local, str::to_string)
    });
    c.apply(ErrorCode::EmailMalformedDomainPart, STRUCTURE_SKIP, |v| {
        map_part(v, str::to_string, repair_domain)
    });
    c.apply(ErrorCode::EmailUncommonDomain, UNCOMMON_DOMAIN_SKIP, |v| {
        map_part(v, str::to_string, |domain| fix_domain_typo(domain, ctx))
    });
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
    fn test_detect_email_rules() {
        assert_eq!(codes_of("ana.novak@gmail.com"), "");
        assert_eq!(codes_of("ana novak@gmail.com"), "2102");
        assert_eq!(codes_of("ana@gmail.com; eva@siol.net"), "2102;2103");
        assert_eq!(codes_of("žiga@gmail.com"), "2104");
        assert_eq!(codes_of("ana.gmail.com"), "2105");
        assert_eq!(codes_of("ana@@gmail.com"), "2106");
        assert_eq!(codes_of(".ana@gmail.com"), "2107");
        assert_eq!(codes_of("ana@gmail..com"), "2108");
        assert_eq!(codes_of("ana@localhost"), "2109");
        assert_eq!(codes_of("ana@gmial.com"), "2110");
        assert_eq!(codes_of("eva@firma.si"), "2110");
    }

    #[test]
    fn test_double_at_stays_uncorrected() {
        let (value, uncorrected) = corrected("ana@@gmail.com");
        assert_eq!(value, None);
        assert_eq!(uncorrected, "2106");
    }

    #[test]
    fn test_corrections() {
        assert_eq!(
            corrected(" Maja Kralj@outlook.com"),
            (Some("MajaKralj@outlook.com".to_string()), String::new())
        );
        assert_eq!(
            corrected("žiga.zupančič@gmail.com"),
            (Some("ziga.zupancic@gmail.com".to_string()), String::new())
        );
        assert_eq!(
            corrected("ana..novak.@gmail.com"),
            (Some("ana.novak@gmail.com".to_string()), String::new())
        );
        assert_eq!(
            corrected("ana@gmail.com."),
            (Some("ana@gmail.com".to_string()), String::new())
        );
        assert_eq!(
            corrected("marko@GMIAL.com"),
            (Some("marko@gmail.com".to_string()), String::new())
        );
        assert_eq!(corrected("eva@firma.si"), (None, "2110".to_string()));
    }

    #[test]
    fn test_two_addresses_stay_apart() {
        assert_eq!(
            corrected("ana@gmail.com eva@siol.net"),
            (
                Some("ana@gmail.com;eva@siol.net".to_string()),
                "2103".to_string()
            )
        );
        assert_eq!(
            corrected("ana@gmail.com; eva@siol.net"),
            (
                Some("ana@gmail.com;eva@siol.net".to_string()),
                "2103".to_string()
            )
        );
    }

    #[test]
    fn test_separators_survive_whitespace_removal() {
        let (value, _) = corrected("@ @/č");
        let value = value.expect("whitespace and diacritic fixed");
        assert_eq!(value, "@;@;c");
        assert_eq!(codes_of(&value), "2103");
    }
}
