//! Syntax checks that need no reference data.

use std::sync::LazyLock;

use regex::Regex;

static CANONICAL_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^00386\d{8}$").expect("Invalid phone regex"));

static EMAIL_LOCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+$").expect("Invalid email local regex"));

static EMAIL_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,24}$")
        .expect("Invalid email domain regex")
});

/// `00386` followed by an eight-digit national number.
pub fn is_canonical_phone(value: &str) -> bool {
    CANONICAL_PHONE.is_match(value)
}

/// Local and domain part of a syntactically valid address.
pub fn email_parts(value: &str) -> Option<(&str, &str)> {
    let (local, domain) = value.split_once('@')?;
    if domain.contains('@') {
        return None;
    }
    let local_ok = EMAIL_LOCAL.is_match(local)
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");
    let domain_ok = EMAIL_DOMAIN.is_match(domain)
        && !domain.starts_with('-')
        && !domain.contains("-.")
        && !domain.contains(".-");
    (local_ok && domain_ok).then_some((local, domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(is_canonical_phone("0038641123456"));
        assert!(!is_canonical_phone("+38641123456"));
        assert!(!is_canonical_phone("00386411234567"));
        assert!(!is_canonical_phone("0038641 123456"));
    }

    #[test]
    fn test_email_parts() {
        assert_eq!(
            email_parts("ana.novak@gmail.com"),
            Some(("ana.novak", "gmail.com"))
        );
        assert_eq!(email_parts("ana@@gmail.com"), None);
        assert_eq!(email_parts("ana.gmail.com"), None);
        assert_eq!(email_parts(".ana@gmail.com"), None);
        assert_eq!(email_parts("ana@gmail..com"), None);
        assert_eq!(email_parts("ana@.gmail.com"), None);
        assert_eq!(email_parts("ana@localhost"), None);
        assert_eq!(email_parts("ana novak@gmail.com"), None);
        assert_eq!(email_parts("@gmail.com"), None);
    }
}
