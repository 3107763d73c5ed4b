//! SQLite-backed quote store and review history.
//!
//! One database file holds every owner's quotes plus one review-history row
//! per quote that has been shown at least once. Deleting a quote cascades to
//! its history row.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use readwiser_application::ports::quote_store::{QuoteStore, ReviewHistory, StoreError};
use readwiser_domain::{
    CollectionStats, DomainError, NewQuote, OwnerId, Quote, QuoteFilter, QuoteId, ReviewRecord,
    SelectionMode,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS quotes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id TEXT NOT NULL,
        text TEXT NOT NULL,
        url TEXT,
        source_title TEXT,
        source_domain TEXT,
        tags TEXT,
        is_favorite BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_quotes_owner ON quotes(owner_id)",
    "CREATE TABLE IF NOT EXISTS review_history (
        quote_id INTEGER PRIMARY KEY REFERENCES quotes(id) ON DELETE CASCADE,
        show_count INTEGER NOT NULL DEFAULT 0,
        last_shown_at TEXT,
        last_mode TEXT
    )",
];

const QUOTE_COLUMNS: &str =
    "id, owner_id, text, url, source_title, source_domain, tags, is_favorite, created_at";

/// Bound parameters per `IN (...)` lookup
const LOOKUP_CHUNK: usize = 500;

type QuoteRow = (
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    bool,
    DateTime<Utc>,
);

type ReviewRow = (i64, i64, Option<DateTime<Utc>>, Option<String>);

/// Errors raised by [`SqliteStore`]
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("could not create database directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt {table} row: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

impl From<DomainError> for SqliteStoreError {
    fn from(e: DomainError) -> Self {
        SqliteStoreError::Corrupt {
            table: "review_history",
            reason: e.to_string(),
        }
    }
}

impl From<SqliteStoreError> for StoreError {
    fn from(e: SqliteStoreError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Quote collection and review history in one SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and make sure the schema exists.
    pub async fn open(path: &Path) -> Result<Self, SqliteStoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SqliteStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite is single-writer; a handful of readers is plenty
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!("Opened quote database at {}", path.display());
        Ok(store)
    }

    /// A private in-memory database, mostly for tests.
    pub async fn in_memory() -> Result<Self, SqliteStoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Every connection to :memory: is its own database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), SqliteStoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ==================== Collection ====================

    /// Store a new quote, stamped with `now`.
    pub async fn save_quote(
        &self,
        quote: &NewQuote,
        now: DateTime<Utc>,
    ) -> Result<Quote, SqliteStoreError> {
        let result = sqlx::query(
            "INSERT INTO quotes (owner_id, text, url, source_title, source_domain, tags, is_favorite, created_at)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(quote.owner_id.as_str())
        .bind(&quote.text)
        .bind(&quote.source_url)
        .bind(&quote.source_title)
        .bind(&quote.source_domain)
        .bind(encode_tags(quote.tags.iter()))
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Saved quote {} for {}", id, quote.owner_id);

        Ok(Quote::new(id, quote.owner_id.clone(), quote.text.clone(), now)
            .with_source(
                quote.source_url.clone(),
                quote.source_title.clone(),
                quote.source_domain.clone(),
            )
            .with_tags(&quote.tags))
    }

    /// The most recent quote with identical text saved within `window` of `now`.
    pub async fn find_recent_duplicate(
        &self,
        owner: &OwnerId,
        text: &str,
        now: DateTime<Utc>,
        window: ChronoDuration,
    ) -> Result<Option<Quote>, SqliteStoreError> {
        let sql = format!(
            "SELECT {QUOTE_COLUMNS} FROM quotes WHERE owner_id = ? AND text = ? ORDER BY id DESC LIMIT 1"
        );
        let row: Option<QuoteRow> = sqlx::query_as(&sql)
            .bind(owner.as_str())
            .bind(text.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .map(quote_from_row)
            .filter(|q| q.created_at >= now - window))
    }

    pub async fn get_quote(
        &self,
        owner: &OwnerId,
        id: QuoteId,
    ) -> Result<Option<Quote>, SqliteStoreError> {
        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ? AND owner_id = ?");
        let row: Option<QuoteRow> = sqlx::query_as(&sql)
            .bind(id.0)
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(quote_from_row))
    }

    /// Delete a quote (and its review history). Returns whether it existed.
    pub async fn delete_quote(&self, owner: &OwnerId, id: QuoteId) -> Result<bool, SqliteStoreError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ? AND owner_id = ?")
            .bind(id.0)
            .bind(owner.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the favorite flag. Returns the new state, or `None` if no such quote.
    pub async fn toggle_favorite(
        &self,
        owner: &OwnerId,
        id: QuoteId,
    ) -> Result<Option<bool>, SqliteStoreError> {
        let state: Option<bool> = sqlx::query_scalar(
            "UPDATE quotes SET is_favorite = NOT is_favorite
             WHERE id = ? AND owner_id = ?
             RETURNING is_favorite",
        )
        .bind(id.0)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(state)
    }

    /// Newest quotes first.
    pub async fn last_quotes(
        &self,
        owner: &OwnerId,
        limit: usize,
    ) -> Result<Vec<Quote>, SqliteStoreError> {
        let sql =
            format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE owner_id = ? ORDER BY id DESC LIMIT ?");
        let rows: Vec<QuoteRow> = sqlx::query_as(&sql)
            .bind(owner.as_str())
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(quote_from_row).collect())
    }

    /// Quotes matching `filter`, newest first.
    pub async fn search(
        &self,
        owner: &OwnerId,
        filter: &QuoteFilter,
        limit: usize,
    ) -> Result<Vec<Quote>, SqliteStoreError> {
        let mut quotes = self.all_quotes(owner).await?;
        quotes.retain(|q| filter.matches(q));
        quotes.reverse();
        quotes.truncate(limit);
        Ok(quotes)
    }

    pub async fn count(&self, owner: &OwnerId) -> Result<usize, SqliteStoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes WHERE owner_id = ?")
            .bind(owner.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub async fn stats(
        &self,
        owner: &OwnerId,
        now: DateTime<Utc>,
    ) -> Result<CollectionStats, SqliteStoreError> {
        let quotes = self.all_quotes(owner).await?;
        Ok(CollectionStats::from_quotes(&quotes, now))
    }

    /// Every quote of `owner`, oldest first.
    pub async fn all_quotes(&self, owner: &OwnerId) -> Result<Vec<Quote>, SqliteStoreError> {
        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE owner_id = ? ORDER BY id");
        let rows: Vec<QuoteRow> = sqlx::query_as(&sql)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(quote_from_row).collect())
    }

    // ==================== Review history ====================

    async fn read_record(&self, quote_id: QuoteId) -> Result<Option<ReviewRecord>, SqliteStoreError> {
        let row: Option<ReviewRow> = sqlx::query_as(
            "SELECT quote_id, show_count, last_shown_at, last_mode FROM review_history WHERE quote_id = ?",
        )
        .bind(quote_id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(record_from_row).transpose()
    }

    async fn read_records(
        &self,
        quote_ids: &[QuoteId],
    ) -> Result<HashMap<QuoteId, ReviewRecord>, SqliteStoreError> {
        let mut records = HashMap::with_capacity(quote_ids.len());

        for chunk in quote_ids.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT quote_id, show_count, last_shown_at, last_mode FROM review_history WHERE quote_id IN ({placeholders})"
            );
            let mut query = sqlx::query_as::<_, ReviewRow>(&sql);
            for id in chunk {
                query = query.bind(id.0);
            }
            for row in query.fetch_all(&self.pool).await? {
                let record = record_from_row(row)?;
                records.insert(record.quote_id(), record);
            }
        }

        Ok(records)
    }

    async fn write_record(&self, record: &ReviewRecord) -> Result<(), SqliteStoreError> {
        sqlx::query(
            "INSERT INTO review_history (quote_id, show_count, last_shown_at, last_mode)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(quote_id) DO UPDATE SET
                show_count = excluded.show_count,
                last_shown_at = excluded.last_shown_at,
                last_mode = excluded.last_mode",
        )
        .bind(record.quote_id().0)
        .bind(i64::from(record.show_count()))
        .bind(record.last_shown_at())
        .bind(record.last_mode().map(|m| m.as_str()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Increment in SQL so writers on other connections or processes never
    /// overwrite each other's counts.
    async fn increment_record(
        &self,
        quote_id: QuoteId,
        now: DateTime<Utc>,
        mode: SelectionMode,
    ) -> Result<ReviewRecord, SqliteStoreError> {
        let row: ReviewRow = sqlx::query_as(
            "INSERT INTO review_history (quote_id, show_count, last_shown_at, last_mode)
             VALUES (?, 1, ?, ?)
             ON CONFLICT(quote_id) DO UPDATE SET
                show_count = review_history.show_count + 1,
                last_shown_at = excluded.last_shown_at,
                last_mode = excluded.last_mode
             RETURNING quote_id, show_count, last_shown_at, last_mode",
        )
        .bind(quote_id.0)
        .bind(now)
        .bind(mode.as_str())
        .fetch_one(&self.pool)
        .await?;
        debug!("Quote #{} shown {} times", quote_id, row.1);
        record_from_row(row)
    }
}

#[async_trait]
impl QuoteStore for SqliteStore {
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Quote>, StoreError> {
        Ok(self.all_quotes(owner).await?)
    }
}

#[async_trait]
impl ReviewHistory for SqliteStore {
    async fn get(&self, quote_id: QuoteId) -> Result<Option<ReviewRecord>, StoreError> {
        Ok(self.read_record(quote_id).await?)
    }

    async fn get_many(
        &self,
        quote_ids: &[QuoteId],
    ) -> Result<HashMap<QuoteId, ReviewRecord>, StoreError> {
        Ok(self.read_records(quote_ids).await?)
    }

    async fn upsert(&self, record: &ReviewRecord) -> Result<(), StoreError> {
        Ok(self.write_record(record).await?)
    }

    async fn record_shown(
        &self,
        quote_id: QuoteId,
        now: DateTime<Utc>,
        mode: SelectionMode,
    ) -> Result<ReviewRecord, StoreError> {
        Ok(self.increment_record(quote_id, now, mode).await?)
    }
}

fn encode_tags<'a>(tags: impl Iterator<Item = &'a String>) -> Option<String> {
    let joined = tags.map(String::as_str).collect::<Vec<_>>().join(",");
    (!joined.is_empty()).then_some(joined)
}

fn quote_from_row(row: QuoteRow) -> Quote {
    let (id, owner_id, text, url, title, domain, tags, is_favorite, created_at) = row;
    let tags = tags.unwrap_or_default();
    Quote::new(id, OwnerId::new(owner_id), text, created_at)
        .with_source(url, title, domain)
        .with_tags(tags.split(',').filter(|t| !t.is_empty()))
        .with_favorite(is_favorite)
}

fn record_from_row(row: ReviewRow) -> Result<ReviewRecord, SqliteStoreError> {
    let (quote_id, show_count, last_shown_at, last_mode) = row;
    let show_count = u32::try_from(show_count).map_err(|_| SqliteStoreError::Corrupt {
        table: "review_history",
        reason: format!("quote {quote_id}: show_count {show_count} out of range"),
    })?;
    let last_mode = last_mode
        .as_deref()
        .map(SelectionMode::from_str)
        .transpose()?;
    Ok(ReviewRecord::restore(
        QuoteId(quote_id),
        last_shown_at,
        show_count,
        last_mode,
    )?)
}
