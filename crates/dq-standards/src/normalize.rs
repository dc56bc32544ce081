//! Canonical keys for reference-set membership.
//!
//! Reference sets are built by normalizing every candidate string into a
//! canonical key; lookups normalize the queried value the same way and test exact
//! membership. There is no fuzzy matching.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// The `BŠ` ("brez številke", no house number) placeholder.
///
/// The token may not follow a letter, so `Ob Šumi` or `Rob` never match;
/// it may follow a digit (`12bš`).
static HOUSE_NUMBER_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[^\p{L}])(b\s*[./]?\s*š\.?|brez\s+številke)")
        .expect("Invalid placeholder regex")
});

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// NFKC-normalize, lowercase, trim and collapse whitespace.
///
/// Diacritics are kept: `č`, `š` and `ž` are significant in Slovenian
/// names and addresses.
pub fn canonical_key(value: &str) -> String {
    let folded: String = value.nfkc().collect();
    collapse_whitespace(&folded.to_lowercase())
}

/// Replace diacritics by their base letters (`č` → `c`, `đ` → `d`).
pub fn fold_diacritics(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect::<String>()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .nfc()
        .collect()
}

/// True when the value contains a `BŠ` placeholder token.
pub fn contains_house_number_placeholder(value: &str) -> bool {
    HOUSE_NUMBER_PLACEHOLDER.is_match(value)
}

/// Remove every `BŠ` placeholder token and collapse the remaining whitespace.
///
/// Removing a token can join its neighbours into a new one (`b bšš`), so
/// this repeats until none is left. Every pass removes at least two chars.
pub fn strip_house_number_placeholder(value: &str) -> String {
    let mut current = collapse_whitespace(value);
    while HOUSE_NUMBER_PLACEHOLDER.is_match(&current) {
        let stripped = HOUSE_NUMBER_PLACEHOLDER.replace_all(&current, "${1}");
        current = collapse_whitespace(&stripped);
    }
    current
}

/// True when the value consists of nothing but a placeholder (and punctuation).
pub fn is_house_number_placeholder(value: &str) -> bool {
    contains_house_number_placeholder(value)
        && strip_house_number_placeholder(value)
            .chars()
            .all(|ch| !ch.is_alphanumeric())
}

/// Canonical key of a composite address.
///
/// Layout: `street house_number, postal_code city`, each part through
/// [`canonical_key`]. A placeholder house number contributes nothing, so
/// `Glavna ulica BŠ` and registry rows without a number share a key.
pub fn address_key(
    street: Option<&str>,
    house_number: Option<&str>,
    postal_code: Option<&str>,
    city: Option<&str>,
) -> String {
    let street = canonical_key(street.unwrap_or_default());
    let house_number = house_number
        .filter(|value| !is_house_number_placeholder(value))
        .map(canonical_key)
        .unwrap_or_default();
    let postal_code = canonical_key(postal_code.unwrap_or_default());
    let city = canonical_key(city.unwrap_or_default());

    let mut key = street;
    if !house_number.is_empty() {
        key.push(' ');
        key.push_str(&house_number);
    }
    key.push_str(", ");
    key.push_str(&postal_code);
    key.push(' ');
    key.push_str(&city);
    collapse_whitespace(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_folds_case_and_whitespace() {
        assert_eq!(canonical_key("  Ljubljana   ČRNUČE "), "ljubljana črnuče");
        // NFKC turns the compatibility ligature into plain letters.
        assert_eq!(canonical_key("ﬁlip"), "filip");
    }

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_diacritics("Žiga Čuček"), "Ziga Cucek");
        assert_eq!(fold_diacritics("đorđe"), "dorde");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_house_number_placeholder("BŠ"));
        assert!(is_house_number_placeholder("b.š."));
        assert!(is_house_number_placeholder("b/š"));
        assert!(is_house_number_placeholder("brez številke"));
        assert!(!is_house_number_placeholder("BŠ 12"));
        assert!(contains_house_number_placeholder("12 bš"));
        assert!(!contains_house_number_placeholder("Ob Šumi"));
        assert_eq!(strip_house_number_placeholder("BŠ 12"), "12");
        assert_eq!(strip_house_number_placeholder("12bš"), "12");
    }

    #[test]
    fn test_strip_leaves_no_placeholder_behind() {
        assert_eq!(strip_house_number_placeholder("Glavna b bšš 4"), "Glavna 4");
        assert!(!contains_house_number_placeholder(&strip_house_number_placeholder("b bšš")));
    }

    #[test]
    fn test_address_key_layout() {
        assert_eq!(
            address_key(
                Some("Glavna  ulica"),
                Some("12A"),
                Some("1000"),
                Some("LJUBLJANA")
            ),
            "glavna ulica 12a, 1000 ljubljana"
        );
        assert_eq!(
            address_key(
                Some("Glavna ulica"),
                Some("BŠ"),
                Some("1000"),
                Some("Ljubljana")
            ),
            "glavna ulica, 1000 ljubljana"
        );
        assert_eq!(
            address_key(Some("Glavna ulica"), None, Some("1000"), Some("Ljubljana")),
            "glavna ulica, 1000 ljubljana"
        );
    }
}
