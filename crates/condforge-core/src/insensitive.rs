//! Case-insensitive string comparison.
//!
//! Comparisons fold both sides to lowercase. ASCII input takes a byte-wise
//! fast path; other input is folded per character without allocating where
//! the operation allows it.

use std::borrow::Cow;

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Folds a string to lowercase, borrowing when nothing changes.
pub fn fold(s: &str) -> Cow<'_, str> {
    if s.chars().any(|c| c.is_uppercase() || !c.is_ascii()) {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

pub fn equals(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    folded(a).eq(folded(b))
}

pub fn starts_with(s: &str, prefix: &str) -> bool {
    if s.is_ascii() && prefix.is_ascii() {
        return s.len() >= prefix.len()
            && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes());
    }
    let mut chars = folded(s);
    folded(prefix).all(|p| chars.next() == Some(p))
}

pub fn ends_with(s: &str, suffix: &str) -> bool {
    if s.is_ascii() && suffix.is_ascii() {
        return s.len() >= suffix.len()
            && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes());
    }
    fold(s).ends_with(fold(suffix).as_ref())
}

pub fn contains(s: &str, needle: &str) -> bool {
    if s.is_ascii() && needle.is_ascii() {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        return s
            .as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle));
    }
    fold(s).contains(fold(needle).as_ref())
}

/// Null-safe equality: two nulls are equal, null never equals text.
pub fn equals_nullable(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => equals(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_ignores_case() {
        assert!(equals("Bag", "bAG"));
        assert!(!equals("Bag", "Bags"));
        assert!(equals("ÉPÉE", "épée"));
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert!(starts_with("Bag of Tricks", "BAG"));
        assert!(!starts_with("Bag", "Bag of"));
        assert!(ends_with("Bag of Tricks", "tricks"));
        assert!(!ends_with("Tricks", "of Tricks"));
        assert!(starts_with("Épée longue", "épée"));
        assert!(ends_with("longue Épée", "ÉPÉE"));
    }

    #[test]
    fn test_contains() {
        assert!(contains("Bag of Tricks", "OF"));
        assert!(contains("anything", ""));
        assert!(!contains("Sword", "bag"));
        assert!(contains("Grande Épée", "épé"));
    }

    #[test]
    fn test_fold_borrows_lowercase() {
        assert!(matches!(fold("already lower"), Cow::Borrowed(_)));
        assert_eq!(fold("MiXeD"), "mixed");
    }

    #[test]
    fn test_equals_nullable() {
        assert!(equals_nullable(None, None));
        assert!(!equals_nullable(Some("a"), None));
        assert!(!equals_nullable(None, Some("a")));
        assert!(equals_nullable(Some("A"), Some("a")));
    }
}
