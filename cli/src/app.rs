//! Command dispatch: runs one subcommand against the store and renders the result.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use readwiser_application::{
    ComposeDigestUseCase, PickQuoteUseCase, SelectionError, SelectionRequest,
};
use readwiser_domain::{
    OwnerId, QuoteFilter, QuoteId, SelectionMode, parse_message, truncate_with_ellipsis,
};
use readwiser_infrastructure::SqliteStore;
use readwiser_presentation::{Command, EMPTY_COLLECTION, OutputFormatter};
use std::sync::Arc;
use tracing::info;

/// Listings never show more than this many quotes
const MAX_LISTING: usize = 10;

/// Identical text saved again within this window is treated as a resend
const DUPLICATE_WINDOW_SECS: i64 = 60;

pub struct App {
    store: Arc<SqliteStore>,
    selector: PickQuoteUseCase,
    composer: ComposeDigestUseCase,
    formatter: Box<dyn OutputFormatter>,
    owner: OwnerId,
    now: DateTime<Utc>,
}

impl App {
    pub fn new(
        store: Arc<SqliteStore>,
        selector: PickQuoteUseCase,
        formatter: Box<dyn OutputFormatter>,
        owner: OwnerId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            store,
            composer: ComposeDigestUseCase::new(selector.clone()),
            selector,
            formatter,
            owner,
            now,
        }
    }

    /// Run `command` and return what should be printed.
    pub async fn run(&self, command: Command) -> Result<String> {
        match command {
            Command::Add { message, title } => self.add(&message.join(" "), title).await,
            Command::Random => self.pick(SelectionMode::Random).await,
            Command::Daily => self.pick(SelectionMode::Daily).await,
            Command::Digest { count } => self.digest(count).await,
            Command::Fav { id } => self.toggle_favorite(QuoteId(id)).await,
            Command::Delete { id } => self.delete(QuoteId(id)).await,
            Command::Last { count } => {
                let quotes = self
                    .store
                    .last_quotes(&self.owner, count.clamp(1, MAX_LISTING))
                    .await?;
                if quotes.is_empty() {
                    return Ok("No quotes saved yet.".to_string());
                }
                let title = format!("Last {} quote(s):", quotes.len());
                Ok(self.formatter.listing(&title, &quotes, quotes.len()))
            }
            Command::Search { keyword } => {
                let title = format!("Quotes containing \"{keyword}\":");
                let empty = format!("No quotes found containing \"{keyword}\"");
                self.list(QuoteFilter::Text(keyword), &title, &empty).await
            }
            Command::Tag { tag } => {
                let tag = tag.trim_start_matches('#').to_string();
                let title = format!("Quotes tagged #{tag}:");
                let empty = format!("No quotes found with tag #{tag}");
                self.list(QuoteFilter::Tag(tag), &title, &empty).await
            }
            Command::Source { domain } => {
                let title = format!("Quotes from {domain}:");
                let empty = format!("No quotes found from {domain}");
                self.list(QuoteFilter::Source(domain), &title, &empty).await
            }
            Command::Favorites => {
                self.list(
                    QuoteFilter::Favorites,
                    "Your favorite quotes:",
                    "No favorite quotes yet. Use `readwiser fav <id>` to add some!",
                )
                .await
            }
            Command::Stats => {
                let stats = self.store.stats(&self.owner, self.now).await?;
                Ok(self.formatter.stats(&stats))
            }
            Command::Export => {
                let quotes = self.store.all_quotes(&self.owner).await?;
                if quotes.is_empty() {
                    return Ok("No quotes to export.".to_string());
                }
                Ok(serde_json::to_string_pretty(&quotes)?)
            }
        }
    }

    async fn add(&self, message: &str, title: Option<String>) -> Result<String> {
        let mut quote = parse_message(self.owner.clone(), message)?;
        if let Some(title) = title {
            quote = quote.with_title(title);
        }

        let window = Duration::seconds(DUPLICATE_WINDOW_SECS);
        if let Some(existing) = self
            .store
            .find_recent_duplicate(&self.owner, &quote.text, self.now, window)
            .await?
        {
            return Ok(format!("Already saved as #{}.", existing.id));
        }

        let saved = self.store.save_quote(&quote, self.now).await?;
        info!("Saved quote {} for {}", saved.id, self.owner);

        let mut out = format!("Saved quote #{}", saved.id);
        if let Some(domain) = &saved.source_domain {
            out.push_str(&format!("\nSource: {domain}"));
        }
        if !saved.tags.is_empty() {
            let tags: Vec<String> = saved.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(&format!("\nTags: {}", tags.join(" ")));
        }
        Ok(out)
    }

    async fn pick(&self, mode: SelectionMode) -> Result<String> {
        let request = SelectionRequest::new(self.owner.clone(), mode, self.now);
        match self.selector.pick(&request).await {
            Ok(quote) if mode == SelectionMode::Daily => Ok(self.formatter.daily(&quote)),
            Ok(quote) => Ok(self.formatter.random(&quote)),
            Err(SelectionError::EmptyCollection { .. }) => Ok(EMPTY_COLLECTION.to_string()),
            Err(e) => Err(e.into()),
        }
    }

    async fn digest(&self, count: Option<usize>) -> Result<String> {
        let count = count.unwrap_or_else(|| self.composer.default_count());
        let quotes = match self
            .composer
            .compose_all(self.owner.clone(), count, self.now)
            .await
        {
            Ok(quotes) => quotes,
            Err(SelectionError::EmptyCollection { .. }) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let total = self.store.count(&self.owner).await?;
        Ok(self.formatter.digest(&quotes, total))
    }

    async fn toggle_favorite(&self, id: QuoteId) -> Result<String> {
        Ok(match self.store.toggle_favorite(&self.owner, id).await? {
            Some(true) => format!("Quote #{id} added to favorites."),
            Some(false) => format!("Quote #{id} removed from favorites."),
            None => format!("Quote #{id} not found."),
        })
    }

    async fn delete(&self, id: QuoteId) -> Result<String> {
        let Some(quote) = self.store.get_quote(&self.owner, id).await? else {
            return Ok(format!("Quote #{id} not found."));
        };
        if self.store.delete_quote(&self.owner, id).await? {
            Ok(format!(
                "Deleted quote #{id}:\n\"{}\"",
                truncate_with_ellipsis(&quote.text, 50)
            ))
        } else {
            Ok(format!("Quote #{id} not found."))
        }
    }

    async fn list(&self, filter: QuoteFilter, title: &str, empty: &str) -> Result<String> {
        let matched = self.store.search(&self.owner, &filter, usize::MAX).await?;
        if matched.is_empty() {
            return Ok(empty.to_string());
        }
        let shown = &matched[..matched.len().min(MAX_LISTING)];
        Ok(self.formatter.listing(title, shown, matched.len()))
    }
}
