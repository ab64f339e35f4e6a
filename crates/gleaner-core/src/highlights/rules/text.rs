//! Whitespace normalization and character-safe truncation.

use super::patterns::WHITESPACE_RUN;

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Return at most `max_chars` leading characters of `text`.
///
/// Lengths are counted in chars, the same unit used by the quote rule.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  Hello,\n\n\tworld  "), "Hello, world");
        assert_eq!(normalize("a \u{00a0} b"), "a b");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        // Multi-byte characters are never split
        assert_eq!(truncate_chars("żółwie", 3), "żół");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_has_no_whitespace_runs(s in "[ a-z\t\n\r]{0,64}") {
            let out = normalize(&s);
            prop_assert!(!out.starts_with(char::is_whitespace));
            prop_assert!(!out.ends_with(char::is_whitespace));
            let chars: Vec<char> = out.chars().collect();
            prop_assert!(chars.windows(2).all(|w| !(w[0].is_whitespace() && w[1].is_whitespace())));
        }

        #[test]
        fn prop_truncate_is_prefix(s in "\\PC{0,200}", n in 0usize..150) {
            let t = truncate_chars(&s, n);
            prop_assert!(s.starts_with(t));
            prop_assert!(t.chars().count() <= n);
        }
    }
}
