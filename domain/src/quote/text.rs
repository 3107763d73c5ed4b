//! Text limits and normalisation for quotes and tags.

use crate::core::error::DomainError;
use std::collections::BTreeSet;

/// Maximum quote length in bytes (leaves room for formatting in a 4096-byte chat message)
pub const MAX_QUOTE_LENGTH: usize = 4000;
/// Maximum length of a single tag
pub const MAX_TAG_LENGTH: usize = 50;
/// Maximum number of tags kept per quote
pub const MAX_TAGS: usize = 20;

/// Trim quote text and check it against [`MAX_QUOTE_LENGTH`].
pub fn validate_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyQuote);
    }
    if text.len() > MAX_QUOTE_LENGTH {
        return Err(DomainError::QuoteTooLong {
            len: text.len(),
            max: MAX_QUOTE_LENGTH,
        });
    }
    Ok(text.to_string())
}

/// Normalise a list of raw tags.
///
/// Tags are trimmed, stripped of a leading `#` and lower-cased. Tags that are
/// empty, too long or contain anything but word characters are dropped.
/// The first [`MAX_TAGS`] distinct tags in input order are kept; the result
/// is sorted.
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeSet::new();
    for raw in tags {
        if out.len() >= MAX_TAGS {
            break;
        }
        let tag = raw.as_ref().trim().trim_start_matches('#').to_lowercase();
        if tag.is_empty() || tag.chars().count() > MAX_TAG_LENGTH {
            continue;
        }
        if !tag.chars().all(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }
        out.insert(tag);
    }
    out
}

/// Truncate to at most `max_len` bytes, ending in `...` when shortened.
///
/// Never splits a UTF-8 character.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_limits() {
        assert!(validate_text(&"a".repeat(MAX_QUOTE_LENGTH)).is_ok());
        assert!(matches!(
            validate_text(&"a".repeat(MAX_QUOTE_LENGTH + 1)),
            Err(DomainError::QuoteTooLong { .. })
        ));
        assert_eq!(validate_text("\n\t "), Err(DomainError::EmptyQuote));
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(["#Wisdom", "wisdom", "  courage ", "bad-tag", "", "#"]);
        let tags: Vec<_> = tags.into_iter().collect();
        assert_eq!(tags, vec!["courage", "wisdom"]);
    }

    #[test]
    fn test_normalize_tags_caps_count_and_length() {
        let many: Vec<String> = (0..30).map(|i| format!("tag{i}")).collect();
        assert_eq!(normalize_tags(&many).len(), MAX_TAGS);

        let long = "x".repeat(MAX_TAG_LENGTH + 1);
        assert!(normalize_tags([long]).is_empty());
    }

    #[test]
    fn test_normalize_tags_keeps_earliest_and_sorts() {
        let raw: Vec<String> = (0..MAX_TAGS + 1).rev().map(|i| format!("t{i:02}")).collect();
        let tags: Vec<String> = normalize_tags(&raw).into_iter().collect();

        // Input runs t20..t00; t00 arrives last and is the one dropped
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags.first().map(String::as_str), Some("t01"));
        assert_eq!(tags.last().map(String::as_str), Some("t20"));
        assert!(tags.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
        // 'の' is 3 bytes; cutting inside it backs up to the boundary
        assert_eq!(truncate_with_ellipsis("あのねあのね", 8), "あ...");
    }
}
