//! Console output formatter for quotes and digests

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use readwiser_domain::{CollectionStats, Quote, truncate_with_ellipsis};

/// Longest message produced, in bytes (chat messages cap at 4096)
pub const MESSAGE_LIMIT: usize = 4000;

/// Shown wherever a selection finds no quotes
pub const EMPTY_COLLECTION: &str =
    "No quotes saved yet. Start sending me quotes to build your collection!";

const DAILY_HEADER: &str = "Quote of the Day";
const DIGEST_HEADER: &str = "Your Weekly Quote Digest";

/// Formats quotes as plain text with colored headers
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one quote.
    ///
    /// ```text
    /// [#12] "Stay hungry, stay foolish" *
    ///   -- Commencement (stanford.edu)
    ///   https://stanford.edu/...
    ///   #life #wisdom
    /// ```
    pub fn format_quote(quote: &Quote, show_id: bool) -> String {
        let mut out = String::new();

        if show_id {
            out.push_str(&format!("[#{}] ", quote.id));
        }
        out.push_str(&format!("\"{}\"", quote.text));
        if quote.is_favorite {
            out.push_str(" *");
        }

        let source: Vec<String> = [
            quote.source_title.clone(),
            quote.source_domain.as_ref().map(|d| format!("({d})")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !source.is_empty() {
            out.push_str(&format!("\n  -- {}", source.join(" ")));
        }

        if let Some(url) = &quote.source_url {
            out.push_str(&format!("\n  {url}"));
        }

        if !quote.tags.is_empty() {
            let tags: Vec<String> = quote.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(&format!("\n  {}", tags.join(" ")));
        }

        out
    }

    /// Header line followed by a body, the whole message capped at [`MESSAGE_LIMIT`].
    fn message(header: &str, body: &str) -> String {
        let budget = MESSAGE_LIMIT.saturating_sub(header.len() + 2);
        format!(
            "{}\n\n{}",
            header.cyan().bold(),
            truncate_with_ellipsis(body, budget)
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn random(&self, quote: &Quote) -> String {
        Self::format_quote(quote, true)
    }

    fn daily(&self, quote: &Quote) -> String {
        Self::message(DAILY_HEADER, &Self::format_quote(quote, false))
    }

    fn digest(&self, quotes: &[Quote], total: usize) -> String {
        if quotes.is_empty() {
            return Self::message(DIGEST_HEADER, EMPTY_COLLECTION);
        }

        let mut body = String::new();
        for (i, quote) in quotes.iter().enumerate() {
            body.push_str(&format!("{}. {}\n\n", i + 1, Self::format_quote(quote, false)));
        }
        body.push_str(&format!("Total saved: {total} quotes"));

        Self::message(DIGEST_HEADER, &body)
    }

    fn listing(&self, title: &str, quotes: &[Quote], matched: usize) -> String {
        let mut body = quotes
            .iter()
            .map(|q| Self::format_quote(q, true))
            .collect::<Vec<_>>()
            .join("\n\n");
        if matched > quotes.len() {
            body.push_str(&format!("\n\n... and {} more", matched - quotes.len()));
        }

        Self::message(title, &body)
    }

    fn stats(&self, stats: &CollectionStats) -> String {
        let mut body = format!(
            "Total quotes: {}\nAdded this week: {}\nFavorites: {}",
            stats.total, stats.added_this_week, stats.favorites
        );
        if !stats.top_tags.is_empty() {
            body.push_str("\n\nTop tags:");
            for (tag, count) in &stats.top_tags {
                body.push_str(&format!("\n  #{tag}: {count}"));
            }
        }

        Self::message("Your ReadWiser Stats", &body)
    }
}
