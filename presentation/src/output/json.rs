//! JSON output for scripting

use crate::output::formatter::OutputFormatter;
use readwiser_domain::{CollectionStats, Quote};
use serde_json::{Value, json};

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn random(&self, quote: &Quote) -> String {
        Self::render(json!({ "mode": "random", "quote": quote }))
    }

    fn daily(&self, quote: &Quote) -> String {
        Self::render(json!({ "mode": "daily", "quote": quote }))
    }

    fn digest(&self, quotes: &[Quote], total: usize) -> String {
        Self::render(json!({ "mode": "weekly", "quotes": quotes, "total": total }))
    }

    fn listing(&self, title: &str, quotes: &[Quote], matched: usize) -> String {
        Self::render(json!({ "title": title, "quotes": quotes, "matched": matched }))
    }

    fn stats(&self, stats: &CollectionStats) -> String {
        Self::render(json!(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use readwiser_domain::OwnerId;

    fn quote(id: i64) -> Quote {
        Quote::new(
            id,
            OwnerId::from("me"),
            format!("quote {id}"),
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        )
        .with_tags(["focus"])
    }

    #[test]
    fn test_daily_json() {
        let out = JsonFormatter.daily(&quote(4));
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["mode"], "daily");
        assert_eq!(value["quote"]["id"], 4);
        assert_eq!(value["quote"]["text"], "quote 4");
        assert_eq!(value["quote"]["tags"][0], "focus");
    }

    #[test]
    fn test_digest_json() {
        let out = JsonFormatter.digest(&[quote(1), quote(2)], 10);
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["quotes"].as_array().unwrap().len(), 2);
        assert_eq!(value["total"], 10);
    }

    #[test]
    fn test_stats_json() {
        let stats = CollectionStats {
            total: 3,
            favorites: 1,
            added_this_week: 0,
            top_tags: vec![("focus".to_string(), 3)],
        };
        let value: Value = serde_json::from_str(&JsonFormatter.stats(&stats)).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["top_tags"][0][0], "focus");
        assert_eq!(value["top_tags"][0][1], 3);
    }
}
