//! Quote store and review history ports.
//!
//! Following the Ports and Adapters pattern:
//! - **Ports**: [`QuoteStore`] and [`ReviewHistory`] - defined here
//! - **Adapter**: `SqliteStore` - implemented in the infrastructure layer
//!
//! The selection use cases only ever read quotes. Review records are written
//! by [`PickQuoteUseCase`](crate::use_cases::pick_quote::PickQuoteUseCase)
//! and nothing else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use readwiser_domain::{OwnerId, Quote, QuoteId, ReviewRecord, SelectionMode};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by store adapters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store could not be reached or the query failed.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer within the configured timeout.
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Read access to a user's quote collection.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// All quotes owned by `owner`, reflecting every committed edit and delete.
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Quote>, StoreError>;
}

/// Persistent exposure history, one record per shown quote.
#[async_trait]
pub trait ReviewHistory: Send + Sync {
    /// The record for a quote, or `None` if it has never been shown.
    async fn get(&self, quote_id: QuoteId) -> Result<Option<ReviewRecord>, StoreError>;

    /// Records for several quotes at once. Missing ids are simply absent.
    async fn get_many(
        &self,
        quote_ids: &[QuoteId],
    ) -> Result<HashMap<QuoteId, ReviewRecord>, StoreError> {
        let mut records = HashMap::with_capacity(quote_ids.len());
        for id in quote_ids {
            if let Some(record) = self.get(*id).await? {
                records.insert(*id, record);
            }
        }
        Ok(records)
    }

    /// Insert or replace the record for `record.quote_id()` atomically.
    async fn upsert(&self, record: &ReviewRecord) -> Result<(), StoreError>;

    /// Count one more exposure of `quote_id` at `now` and return the stored
    /// record.
    ///
    /// The increment happens inside the store in a single statement, so
    /// concurrent callers (including other processes sharing the store) never
    /// lose a count.
    async fn record_shown(
        &self,
        quote_id: QuoteId,
        now: DateTime<Utc>,
        mode: SelectionMode,
    ) -> Result<ReviewRecord, StoreError>;
}
