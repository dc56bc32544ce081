//! Text transforms shared by several fields.

pub use dq_standards::normalize::{collapse_whitespace, fold_diacritics};

/// Encodings of an absent value besides the empty string.
const PLACEHOLDERS: &[&str] = &["/", "x", "-", "nan", "null", "none"];

/// The value, or `None` when it is absent or an absent-value placeholder.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_placeholder(v))
}

pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|p| trimmed.eq_ignore_ascii_case(p))
}

/// Leading or trailing whitespace, runs of whitespace, or whitespace other
/// than a plain space between words.
pub fn has_irregular_whitespace(value: &str) -> bool {
    value != collapse_whitespace(value)
}

pub fn has_whitespace(value: &str) -> bool {
    value.chars().any(char::is_whitespace)
}

pub fn remove_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Two consecutive words equal when compared case-insensitively.
pub fn has_consecutive_duplicates(value: &str) -> bool {
    let words: Vec<String> = value.split_whitespace().map(str::to_lowercase).collect();
    words.windows(2).any(|pair| pair[0] == pair[1])
}

/// Drop consecutive repeated words, keeping the first-seen casing.
pub fn dedupe_consecutive(value: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for word in value.split_whitespace() {
        if kept
            .last()
            .is_some_and(|last| last.to_lowercase() == word.to_lowercase())
        {
            continue;
        }
        kept.push(word);
    }
    kept.join(" ")
}

fn upper(ch: char) -> char {
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

fn lower(ch: char) -> char {
    let mut mapped = ch.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Title-case every run of letters: `ANA-marija` becomes `Ana-Marija`.
///
/// Characters whose case mapping expands to several characters are left
/// alone, which keeps the transform idempotent.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_run_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            out.push(if at_run_start { upper(ch) } else { lower(ch) });
            at_run_start = false;
        } else {
            out.push(ch);
            at_run_start = true;
        }
    }
    out
}

/// Title-case space-separated words, leaving the words `keep` accepts
/// (other than the first) untouched. Spacing is preserved.
pub fn title_case_words(value: &str, keep: impl Fn(&str) -> bool) -> String {
    value
        .split(' ')
        .enumerate()
        .map(|(idx, word)| {
            if idx > 0 && keep(word) {
                word.to_string()
            } else {
                title_case(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First letter lowercase, or every letter after it uppercase.
///
/// Letters without a single-character case mapping are left alone by
/// [`sentence_case`], so a value it cannot change is not flagged.
pub fn needs_sentence_case(value: &str) -> bool {
    sentence_case(value) != value
}

/// Uppercase the first letter and, when every later letter is uppercase,
/// lowercase the rest.
pub fn sentence_case(value: &str) -> String {
    let mut rest = value
        .chars()
        .filter(|c| c.is_alphabetic())
        .skip(1)
        .peekable();
    let all_upper = rest.peek().is_some() && rest.all(|c| !c.is_lowercase());
    let mut seen_letter = false;
    value
        .chars()
        .map(|ch| {
            if !ch.is_alphabetic() {
                return ch;
            }
            let mapped = if seen_letter {
                if all_upper { lower(ch) } else { ch }
            } else {
                upper(ch)
            };
            seen_letter = true;
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_absent() {
        for raw in ["", "   ", "/", "x", "X", " nan "] {
            assert_eq!(present(Some(raw)), None, "{raw:?}");
        }
        assert_eq!(present(None), None);
        assert_eq!(present(Some("xy")), Some("xy"));
    }

    #[test]
    fn test_dedupe_keeps_first_casing() {
        assert_eq!(dedupe_consecutive("Ljubljana LJUBLJANA"), "Ljubljana");
        assert_eq!(dedupe_consecutive("Ana Marija Ana"), "Ana Marija Ana");
        assert!(has_consecutive_duplicates("novo Novo mesto"));
        assert!(!has_consecutive_duplicates("Novo mesto"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ANA-marija"), "Ana-Marija");
        assert_eq!(title_case("žiga"), "Žiga");
        assert_eq!(
            title_case_words("janez in marija", |w| w == "in"),
            "Janez in Marija"
        );
    }

    #[test]
    fn test_sentence_case() {
        assert!(needs_sentence_case("glavna ulica"));
        assert!(needs_sentence_case("GLAVNA ULICA"));
        assert!(!needs_sentence_case("Glavna ulica"));
        assert!(!needs_sentence_case("Murska Sobota"));
        assert_eq!(sentence_case("GLAVNA ULICA"), "Glavna ulica");
        assert_eq!(sentence_case("novo mesto"), "Novo mesto");
        assert_eq!(sentence_case("ulica Talcev"), "Ulica Talcev");
    }

    #[test]
    fn test_sentence_case_inverted_caps() {
        assert!(needs_sentence_case("lJUBLJANA"));
        assert_eq!(sentence_case("lJUBLJANA"), "Ljubljana");
        assert_eq!(sentence_case("gLAVNA ULICA"), "Glavna ulica");
        assert_eq!(sentence_case("čŠ"), "Čš");
        for value in ["lJUBLJANA", "gLAVNA ULICA", "aA", "MARIBOR", "novo mesto"] {
            assert!(!needs_sentence_case(&sentence_case(value)), "{value:?}");
        }
        assert!(!needs_sentence_case("A"));
        assert!(!needs_sentence_case("12"));
    }
}
