//! Compose Digest use case.
//!
//! Builds a batch of distinct quotes for the weekly digest (and the manual
//! `/digest` trigger) by calling the selector repeatedly, excluding what the
//! batch already holds.
//!
//! The batch is produced as a lazy stream: each item is one selection, and
//! each selection updates the review history as it is pulled. Composing
//! again starts from the updated history, so the next batch is weighted
//! independently of the last one.

use crate::ports::selection_logger::SelectionEvent;
use crate::use_cases::pick_quote::{PickQuoteUseCase, SelectionError, SelectionRequest};
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use readwiser_domain::{OwnerId, Quote, QuoteId, SelectionMode};
use std::collections::HashSet;
use tracing::info;

/// Use case for composing a digest.
#[derive(Clone)]
pub struct ComposeDigestUseCase {
    selector: PickQuoteUseCase,
}

struct DigestState {
    picked: HashSet<QuoteId>,
    finished: bool,
}

impl ComposeDigestUseCase {
    pub fn new(selector: PickQuoteUseCase) -> Self {
        Self { selector }
    }

    /// Default batch size from [`SelectionParams`](crate::config::SelectionParams).
    pub fn default_count(&self) -> usize {
        self.selector.params().digest_count
    }

    /// Stream up to `count` distinct quotes, in selection order.
    ///
    /// The stream ends early once every quote has been picked, so a
    /// collection smaller than `count` yields each quote exactly once.
    /// An error is yielded once and ends the stream; an empty collection
    /// yields [`SelectionError::EmptyCollection`].
    pub fn compose(
        &self,
        owner: OwnerId,
        count: usize,
        now: DateTime<Utc>,
    ) -> BoxStream<'_, Result<Quote, SelectionError>> {
        let initial = DigestState {
            picked: HashSet::with_capacity(count),
            finished: false,
        };

        stream::unfold(initial, move |mut state| {
            let request = SelectionRequest::new(owner.clone(), SelectionMode::Weekly, now)
                .with_excluded(state.picked.iter().copied());
            async move {
                if state.finished || state.picked.len() >= count {
                    return None;
                }
                match self.selector.pick_fresh(&request).await {
                    Ok(Some(quote)) => {
                        state.picked.insert(quote.id);
                        Some((Ok(quote), state))
                    }
                    Ok(None) => None,
                    // Quotes deleted mid-batch: what we already have is the digest
                    Err(e) if e.is_empty_collection() && !state.picked.is_empty() => None,
                    Err(e) => {
                        state.finished = true;
                        Some((Err(e), state))
                    }
                }
            }
        })
        .boxed()
    }

    /// Compose a digest and collect it.
    pub async fn compose_all(
        &self,
        owner: OwnerId,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Quote>, SelectionError> {
        let quotes: Vec<Quote> = self.compose(owner.clone(), count, now).try_collect().await?;

        info!(
            "Composed digest of {} quote(s) for {} (requested {})",
            quotes.len(),
            owner,
            count
        );
        self.selector
            .selection_logger()
            .log(&SelectionEvent::DigestComposed {
                owner,
                requested: count,
                quote_ids: quotes.iter().map(|q| q.id).collect(),
                at: now,
            });

        Ok(quotes)
    }
}
