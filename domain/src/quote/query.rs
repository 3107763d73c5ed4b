//! Collection queries: search filters and summary statistics.

use super::entities::Quote;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// How a listing narrows down a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteFilter {
    /// Case-insensitive substring of the quote text
    Text(String),
    /// Exact tag (leading `#` and case ignored)
    Tag(String),
    /// Case-insensitive substring of the source domain
    Source(String),
    /// Favorites only
    Favorites,
}

impl QuoteFilter {
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            QuoteFilter::Text(keyword) => quote
                .text
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
            QuoteFilter::Tag(tag) => quote.has_tag(tag),
            QuoteFilter::Source(domain) => quote
                .source_domain
                .as_deref()
                .is_some_and(|d| d.contains(&domain.to_lowercase())),
            QuoteFilter::Favorites => quote.is_favorite,
        }
    }
}

/// Summary of one owner's collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub favorites: usize,
    pub added_this_week: usize,
    /// Most used tags, most frequent first (ties alphabetical)
    pub top_tags: Vec<(String, usize)>,
}

impl CollectionStats {
    /// Number of tags reported in [`top_tags`](Self::top_tags)
    pub const TOP_TAGS: usize = 5;

    pub fn from_quotes(quotes: &[Quote], now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);

        let mut tag_counts: HashMap<&str, usize> = HashMap::new();
        for tag in quotes.iter().flat_map(|q| q.tags.iter()) {
            *tag_counts.entry(tag.as_str()).or_default() += 1;
        }
        let mut top_tags: Vec<(String, usize)> = tag_counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        top_tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_tags.truncate(Self::TOP_TAGS);

        Self {
            total: quotes.len(),
            favorites: quotes.iter().filter(|q| q.is_favorite).count(),
            added_this_week: quotes.iter().filter(|q| q.created_at >= week_ago).count(),
            top_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::entities::OwnerId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    fn quote(id: i64, text: &str, days_old: i64) -> Quote {
        Quote::new(id, OwnerId::from("me"), text, now() - Duration::days(days_old))
    }

    #[test]
    fn test_filters() {
        let q = quote(1, "The best time to plant a tree", 1)
            .with_tags(["wisdom"])
            .with_source(None, None, Some("example.com".to_string()))
            .with_favorite(true);

        assert!(QuoteFilter::Text("PLANT".to_string()).matches(&q));
        assert!(!QuoteFilter::Text("river".to_string()).matches(&q));
        assert!(QuoteFilter::Tag("#wisdom".to_string()).matches(&q));
        assert!(!QuoteFilter::Tag("wis".to_string()).matches(&q));
        assert!(QuoteFilter::Source("Example".to_string()).matches(&q));
        assert!(QuoteFilter::Favorites.matches(&q));
        assert!(!QuoteFilter::Source("example".to_string()).matches(&quote(2, "x", 1)));
    }

    #[test]
    fn test_stats() {
        let quotes = vec![
            quote(1, "a", 1).with_tags(["wisdom", "life"]),
            quote(2, "b", 3).with_tags(["wisdom"]).with_favorite(true),
            quote(3, "c", 30).with_tags(["courage"]),
        ];

        let stats = CollectionStats::from_quotes(&quotes, now());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.favorites, 1);
        assert_eq!(stats.added_this_week, 2);
        assert_eq!(
            stats.top_tags,
            vec![
                ("wisdom".to_string(), 2),
                ("courage".to_string(), 1),
                ("life".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_stats_empty() {
        let stats = CollectionStats::from_quotes(&[], now());
        assert_eq!(stats.total, 0);
        assert!(stats.top_tags.is_empty());
    }
}
