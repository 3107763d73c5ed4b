//! Free-form message parsing.
//!
//! A message such as `"Be the change" https://example.com #wisdom` becomes a
//! [`NewQuote`] with the quote text, the first http(s) URL and every `#tag`
//! pulled out of it.

use super::entities::{NewQuote, OwnerId};
use crate::core::error::DomainError;

/// URLs longer than this are ignored
pub const MAX_URL_LENGTH: usize = 2048;

/// Split a message into quote text, source URL and tags.
pub fn parse_message(owner: OwnerId, message: &str) -> Result<NewQuote, DomainError> {
    let mut url = None;
    let mut tags = Vec::new();
    let mut words = Vec::new();

    for token in message.split_whitespace() {
        if is_url(token) {
            if url.is_none() && token.len() <= MAX_URL_LENGTH {
                url = Some(token);
            }
        } else if let Some(tag) = token.strip_prefix('#').filter(|t| !t.is_empty()) {
            tags.push(tag);
        } else {
            words.push(token);
        }
    }

    let joined = words.join(" ");
    let mut quote = NewQuote::new(owner, strip_quote_marks(&joined))?.with_tags(tags);
    if let Some(url) = url {
        quote = quote.with_url(url);
    }
    Ok(quote)
}

fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

fn strip_quote_marks(text: &str) -> &str {
    for mark in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(mark)
            .and_then(|rest| rest.strip_suffix(mark))
        {
            return inner.trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::text::MAX_QUOTE_LENGTH;

    fn parse(message: &str) -> Result<NewQuote, DomainError> {
        parse_message(OwnerId::from("me"), message)
    }

    #[test]
    fn test_plain_quote() {
        let quote = parse("Be the change you wish to see").unwrap();
        assert_eq!(quote.text, "Be the change you wish to see");
        assert!(quote.source_url.is_none());
        assert!(quote.tags.is_empty());
    }

    #[test]
    fn test_url_and_tags_are_extracted() {
        let quote = parse("\"Be the change\" https://www.example.com/gandhi #wisdom #Life").unwrap();
        assert_eq!(quote.text, "Be the change");
        assert_eq!(
            quote.source_url.as_deref(),
            Some("https://www.example.com/gandhi")
        );
        assert_eq!(quote.source_domain.as_deref(), Some("example.com"));
        assert!(quote.tags.contains("wisdom"));
        assert!(quote.tags.contains("life"));
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let quote = parse("  'Less   is\n\nmore'  ").unwrap();
        assert_eq!(quote.text, "Less is more");
    }

    #[test]
    fn test_only_first_url_is_kept() {
        let quote = parse("text https://a.org https://b.org").unwrap();
        assert_eq!(quote.source_domain.as_deref(), Some("a.org"));
        assert_eq!(quote.text, "text");
    }

    #[test]
    fn test_message_without_text_is_rejected() {
        assert_eq!(
            parse("https://example.com #tag"),
            Err(DomainError::EmptyQuote)
        );
        assert_eq!(parse("\"\""), Err(DomainError::EmptyQuote));
    }

    #[test]
    fn test_overlong_quote_is_rejected() {
        let long = "word ".repeat(MAX_QUOTE_LENGTH);
        assert!(matches!(parse(&long), Err(DomainError::QuoteTooLong { .. })));
    }
}
