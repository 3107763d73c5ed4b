//! Pick Quote use case: the selector.
//!
//! Draws one quote from an owner's collection, biased towards quotes that
//! were shown long ago, rarely, or never, and towards favorites.
//!
//! # Flow
//!
//! ```text
//! lock owner
//!   → QuoteStore::list_by_owner          (empty → EmptyCollection)
//!   → drop excluded ids                  (none left → whole collection)
//!   → ReviewHistory::get_many
//!   → never-shown tier, else everyone    → ScoringPolicy::score
//!   → weighted draw
//!   → ReviewHistory::record_shown(id, now, mode)
//! unlock
//! ```
//!
//! The only write is the final `record_shown`. Any failure before it leaves
//! the review history untouched. The lock only serializes picks within this
//! process; the store applies the increment itself, so picks from separate
//! processes still count every exposure. The store timeout covers the reads
//! only: a write that timed out could still commit.

use crate::config::SelectionParams;
use crate::ports::quote_store::{QuoteStore, ReviewHistory, StoreError};
use crate::ports::selection_logger::{NoSelectionLogger, SelectionEvent, SelectionLogger};
use crate::use_cases::user_locks::UserLocks;
use chrono::{DateTime, Utc};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use readwiser_domain::{OwnerId, Quote, QuoteId, ReviewRecord, ScoringPolicy, SelectionMode};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while selecting quotes.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The owner has not saved any quotes.
    #[error("No quotes saved yet for {owner}")]
    EmptyCollection { owner: OwnerId },

    /// A store call failed or timed out. Nothing was written.
    #[error("Quote store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl SelectionError {
    /// Check if this error means "nothing saved yet"
    pub fn is_empty_collection(&self) -> bool {
        matches!(self, SelectionError::EmptyCollection { .. })
    }
}

/// Input for a single selection.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub owner_id: OwnerId,
    pub mode: SelectionMode,
    /// Quotes that must not be picked (e.g. already in the current digest).
    pub exclude_ids: HashSet<QuoteId>,
    /// The caller's clock. The selector never reads the wall clock.
    pub now: DateTime<Utc>,
}

impl SelectionRequest {
    pub fn new(owner_id: OwnerId, mode: SelectionMode, now: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            mode,
            exclude_ids: HashSet::new(),
            now,
        }
    }

    pub fn with_excluded(mut self, ids: impl IntoIterator<Item = QuoteId>) -> Self {
        self.exclude_ids.extend(ids);
        self
    }
}

/// Use case for picking the next quote to surface.
///
/// Cheap to clone; clones share the random source and the per-owner locks.
#[derive(Clone)]
pub struct PickQuoteUseCase {
    quotes: Arc<dyn QuoteStore>,
    history: Arc<dyn ReviewHistory>,
    policy: ScoringPolicy,
    params: SelectionParams,
    rng: Arc<Mutex<Box<dyn RngCore + Send>>>,
    locks: Arc<UserLocks>,
    selection_logger: Arc<dyn SelectionLogger>,
}

impl PickQuoteUseCase {
    pub fn new(quotes: Arc<dyn QuoteStore>, history: Arc<dyn ReviewHistory>) -> Self {
        Self {
            quotes,
            history,
            policy: ScoringPolicy::default(),
            params: SelectionParams::default(),
            rng: Arc::new(Mutex::new(Box::new(StdRng::from_os_rng()))),
            locks: Arc::new(UserLocks::new()),
            selection_logger: Arc::new(NoSelectionLogger),
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_params(mut self, params: SelectionParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the random source (e.g. a seeded `StdRng` in tests).
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Arc::new(Mutex::new(Box::new(rng)));
        self
    }

    /// Share per-owner locks with another selector over the same stores.
    pub fn with_locks(mut self, locks: Arc<UserLocks>) -> Self {
        self.locks = locks;
        self
    }

    pub fn with_selection_logger(mut self, logger: Arc<dyn SelectionLogger>) -> Self {
        self.selection_logger = logger;
        self
    }

    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    pub fn selection_logger(&self) -> &Arc<dyn SelectionLogger> {
        &self.selection_logger
    }

    /// Pick one quote and record the exposure.
    ///
    /// If every quote is excluded the whole collection is used instead, so
    /// this only fails for an empty collection or a store error.
    pub async fn pick(&self, request: &SelectionRequest) -> Result<Quote, SelectionError> {
        match self.select(request, true).await? {
            Some(quote) => Ok(quote),
            None => Err(SelectionError::EmptyCollection {
                owner: request.owner_id.clone(),
            }),
        }
    }

    /// Like [`pick`](Self::pick) but never falls back to excluded quotes.
    ///
    /// Returns `Ok(None)` without touching the review history when every
    /// quote in the collection is excluded.
    pub async fn pick_fresh(
        &self,
        request: &SelectionRequest,
    ) -> Result<Option<Quote>, SelectionError> {
        self.select(request, false).await
    }

    async fn select(
        &self,
        request: &SelectionRequest,
        fallback_to_all: bool,
    ) -> Result<Option<Quote>, SelectionError> {
        let owner = &request.owner_id;
        let _guard = self.locks.acquire(owner).await;

        let quotes = self.bounded(self.quotes.list_by_owner(owner)).await?;
        if quotes.is_empty() {
            debug!("No quotes for owner {}", owner);
            return Err(SelectionError::EmptyCollection {
                owner: owner.clone(),
            });
        }
        let total = quotes.len();

        let (mut candidates, excluded): (Vec<Quote>, Vec<Quote>) = quotes
            .into_iter()
            .partition(|q| !request.exclude_ids.contains(&q.id));
        if candidates.is_empty() {
            if !fallback_to_all {
                debug!("All {} quotes of {} are excluded", total, owner);
                return Ok(None);
            }
            debug!(
                "All {} quotes of {} are excluded, falling back to the full collection",
                total, owner
            );
            candidates = excluded;
        }

        let ids: Vec<QuoteId> = candidates.iter().map(|q| q.id).collect();
        let records = self.bounded(self.history.get_many(&ids)).await?;

        let pool = self.weighted_pool(&candidates, &records, request.now);
        let chosen_index = pool[self.draw(&pool)].0;
        let chosen = candidates.swap_remove(chosen_index);

        let updated = self
            .history
            .record_shown(chosen.id, request.now, request.mode)
            .await?;

        info!(
            "Selected quote #{} for {} ({}, shown {} times)",
            chosen.id,
            owner,
            request.mode,
            updated.show_count()
        );
        self.selection_logger.log(&SelectionEvent::QuoteSelected {
            owner: owner.clone(),
            quote_id: chosen.id,
            mode: request.mode,
            show_count: updated.show_count(),
            candidates: pool.len(),
            collection_size: total,
            at: request.now,
        });

        Ok(Some(chosen))
    }

    /// `(candidate index, weight)` pairs eligible for the draw.
    ///
    /// Never-shown quotes form a priority tier: while any exist, only they
    /// are eligible.
    fn weighted_pool(
        &self,
        candidates: &[Quote],
        records: &HashMap<QuoteId, ReviewRecord>,
        now: DateTime<Utc>,
    ) -> Vec<(usize, f64)> {
        let unseen = |q: &Quote| records.get(&q.id).is_none_or(ReviewRecord::is_unseen);
        let unseen_only = candidates.iter().any(unseen);

        candidates
            .iter()
            .enumerate()
            .filter(|(_, q)| !unseen_only || unseen(*q))
            .map(|(i, q)| (i, self.policy.score(records.get(&q.id), q.is_favorite, now)))
            .collect()
    }

    /// Index into `pool`, drawn with probability proportional to weight.
    fn draw(&self, pool: &[(usize, f64)]) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        match WeightedIndex::new(pool.iter().map(|(_, w)| *w)) {
            Ok(dist) => dist.sample(&mut **rng),
            Err(e) => {
                warn!("Invalid selection weights ({}), drawing uniformly", e);
                rng.random_range(0..pool.len())
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match self.params.store_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StoreError::Timeout(limit))?,
            None => call.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeStore, at, owner};
    use std::time::Duration;

    fn seeded(store: &Arc<FakeStore>, seed: u64) -> PickQuoteUseCase {
        PickQuoteUseCase::new(store.clone(), store.clone()).with_rng(StdRng::seed_from_u64(seed))
    }

    fn request(mode: SelectionMode) -> SelectionRequest {
        SelectionRequest::new(owner(), mode, at(10))
    }

    #[tokio::test]
    async fn test_empty_collection_fails_without_mutation() {
        let store = Arc::new(FakeStore::new());
        let selector = seeded(&store, 1);

        let err = selector
            .pick(&request(SelectionMode::Random))
            .await
            .unwrap_err();

        assert!(err.is_empty_collection());
        assert_eq!(store.upsert_count(), 0);
    }

    #[tokio::test]
    async fn test_pick_records_exposure() {
        let store = Arc::new(FakeStore::with_quotes(1));
        let selector = seeded(&store, 1);

        let quote = selector.pick(&request(SelectionMode::Daily)).await.unwrap();

        let record = store.record(quote.id).unwrap();
        assert_eq!(record.show_count(), 1);
        assert_eq!(record.last_shown_at(), Some(at(10)));
        assert_eq!(record.last_mode(), Some(SelectionMode::Daily));
        assert_eq!(store.upsert_count(), 1);
    }

    #[tokio::test]
    async fn test_never_shown_quotes_come_first() {
        let store = Arc::new(FakeStore::with_quotes(6));
        // Quotes 1-3 were shown long ago; 4-6 never.
        for id in 1..=3 {
            store.seed_record(
                ReviewRecord::unseen(QuoteId(id))
                    .shown(at(1) - chrono::Duration::days(300), SelectionMode::Random),
            );
        }
        let selector = seeded(&store, 7);

        let mut picked = Vec::new();
        for _ in 0..3 {
            picked.push(selector.pick(&request(SelectionMode::Random)).await.unwrap().id.0);
        }
        picked.sort();
        assert_eq!(picked, vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn test_each_quote_shown_once_before_repeats() {
        let store = Arc::new(FakeStore::with_quotes(5));
        let selector = seeded(&store, 99);

        let mut seen = HashSet::new();
        for _ in 0..5 {
            seen.insert(selector.pick(&request(SelectionMode::Random)).await.unwrap().id);
        }
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_excluded_ids_are_skipped() {
        let store = Arc::new(FakeStore::with_quotes(3));
        let selector = seeded(&store, 3);

        for _ in 0..20 {
            let req = request(SelectionMode::Random).with_excluded([QuoteId(1), QuoteId(2)]);
            assert_eq!(selector.pick(&req).await.unwrap().id, QuoteId(3));
        }
    }

    #[tokio::test]
    async fn test_all_excluded_falls_back_to_full_collection() {
        let store = Arc::new(FakeStore::with_quotes(2));
        let selector = seeded(&store, 3);

        let req = request(SelectionMode::Random).with_excluded([QuoteId(1), QuoteId(2)]);
        let quote = selector.pick(&req).await.unwrap();
        assert!(quote.id == QuoteId(1) || quote.id == QuoteId(2));

        // The strict variant reports exhaustion and writes nothing
        let before = store.upsert_count();
        assert!(selector.pick_fresh(&req).await.unwrap().is_none());
        assert_eq!(store.upsert_count(), before);
    }

    #[tokio::test]
    async fn test_failed_history_read_leaves_no_mutation() {
        let store = Arc::new(FakeStore::with_quotes(3));
        store.fail_history_reads();
        let selector = seeded(&store, 5);

        let err = selector.pick(&request(SelectionMode::Random)).await.unwrap_err();

        assert!(matches!(err, SelectionError::StoreUnavailable(_)));
        assert_eq!(store.upsert_count(), 0);
        assert!((1..=3).all(|id| store.record(QuoteId(id)).is_none()));
    }

    #[tokio::test]
    async fn test_failed_quote_read_is_store_unavailable() {
        let store = Arc::new(FakeStore::with_quotes(3));
        store.fail_quote_reads();
        let selector = seeded(&store, 5);

        let err = selector.pick(&request(SelectionMode::Random)).await.unwrap_err();

        assert!(matches!(
            err,
            SelectionError::StoreUnavailable(StoreError::Unavailable(_))
        ));
        assert_eq!(store.upsert_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_times_out() {
        let store = Arc::new(FakeStore::with_quotes(2));
        store.delay_quote_reads(Duration::from_secs(60));
        let selector = seeded(&store, 5).with_params(
            SelectionParams::default().with_store_timeout(Some(Duration::from_secs(1))),
        );

        let err = selector.pick(&request(SelectionMode::Random)).await.unwrap_err();

        assert!(matches!(
            err,
            SelectionError::StoreUnavailable(StoreError::Timeout(_))
        ));
        assert_eq!(store.upsert_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_write_is_not_reported_as_failure() {
        let store = Arc::new(FakeStore::with_quotes(1));
        store.delay_history_writes(Duration::from_secs(60));
        let selector = seeded(&store, 5).with_params(
            SelectionParams::default().with_store_timeout(Some(Duration::from_secs(1))),
        );

        let quote = selector.pick(&request(SelectionMode::Random)).await.unwrap();

        assert_eq!(store.record(quote.id).unwrap().show_count(), 1);
    }

    #[tokio::test]
    async fn test_pick_increments_existing_record() {
        let store = Arc::new(FakeStore::with_quotes(1));
        store.seed_record(
            ReviewRecord::unseen(QuoteId(1)).shown(at(2), SelectionMode::Daily),
        );
        let selector = seeded(&store, 5);

        selector.pick(&request(SelectionMode::Weekly)).await.unwrap();

        let record = store.record(QuoteId(1)).unwrap();
        assert_eq!(record.show_count(), 2);
        assert_eq!(record.last_shown_at(), Some(at(10)));
        assert_eq!(record.last_mode(), Some(SelectionMode::Weekly));
    }

    #[tokio::test]
    async fn test_favorite_boost_is_bias_not_guarantee() {
        let store = Arc::new(FakeStore::new());
        store.add_quote(1, false);
        store.add_quote(2, true);
        let selector = seeded(&store, 2024);

        let mut favorite_wins = 0;
        let trials = 2000;
        for _ in 0..trials {
            // Identical history every trial: both shown once, 30 days before `now`
            for id in [1, 2] {
                store.seed_record(
                    ReviewRecord::unseen(QuoteId(id))
                        .shown(at(10) - chrono::Duration::days(30), SelectionMode::Random),
                );
            }
            if selector.pick(&request(SelectionMode::Random)).await.unwrap().id == QuoteId(2) {
                favorite_wins += 1;
            }
        }

        // Expected share is 2/3 with the default boost of 2.0
        assert!(favorite_wins > trials / 2);
        assert!(favorite_wins < trials);
        assert!((1100..1550).contains(&favorite_wins));
    }

    #[tokio::test]
    async fn test_equal_weights_are_not_picked_by_id() {
        let store = Arc::new(FakeStore::with_quotes(4));
        let selector = seeded(&store, 11);

        let mut counts: HashMap<QuoteId, usize> = HashMap::new();
        for _ in 0..400 {
            store.clear_records();
            let quote = selector.pick(&request(SelectionMode::Random)).await.unwrap();
            *counts.entry(quote.id).or_default() += 1;
        }

        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&c| c > 50));
    }

    #[tokio::test]
    async fn test_selection_event_is_logged() {
        use crate::use_cases::test_support::RecordingLogger;

        let store = Arc::new(FakeStore::with_quotes(1));
        let logger = Arc::new(RecordingLogger::default());
        let selector = seeded(&store, 1).with_selection_logger(logger.clone());

        selector.pick(&request(SelectionMode::Weekly)).await.unwrap();

        assert_eq!(
            logger.events(),
            vec![SelectionEvent::QuoteSelected {
                owner: owner(),
                quote_id: QuoteId(1),
                mode: SelectionMode::Weekly,
                show_count: 1,
                candidates: 1,
                collection_size: 1,
                at: at(10),
            }]
        );
    }

    #[tokio::test]
    async fn test_concurrent_picks_do_not_lose_increments() {
        let store = Arc::new(FakeStore::with_quotes(1));
        store.delay_history_reads(Duration::from_millis(5));
        let selector = seeded(&store, 8).with_params(
            SelectionParams::default().with_store_timeout(None),
        );

        let mut handles = Vec::new();
        for _ in 0..8 {
            let selector = selector.clone();
            handles.push(tokio::spawn(async move {
                selector.pick(&request(SelectionMode::Random)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.record(QuoteId(1)).unwrap().show_count(), 8);
    }
}
