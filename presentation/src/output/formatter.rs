//! Output formatter trait

use readwiser_domain::{CollectionStats, Quote};

/// Renders selection results and collection listings.
pub trait OutputFormatter {
    /// A single on-demand quote
    fn random(&self, quote: &Quote) -> String;

    /// The Quote of the Day
    fn daily(&self, quote: &Quote) -> String;

    /// A digest batch; `total` is the size of the whole collection
    fn digest(&self, quotes: &[Quote], total: usize) -> String;

    /// A titled listing; `matched` may exceed `quotes.len()` when truncated
    fn listing(&self, title: &str, quotes: &[Quote], matched: usize) -> String;

    fn stats(&self, stats: &CollectionStats) -> String;
}
