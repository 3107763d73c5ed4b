//! In-memory store and logger fakes shared by the use case tests.

use crate::ports::quote_store::{QuoteStore, ReviewHistory, StoreError};
use crate::ports::selection_logger::{SelectionEvent, SelectionLogger};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use readwiser_domain::{OwnerId, Quote, QuoteId, ReviewRecord, SelectionMode};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn owner() -> OwnerId {
    OwnerId::from("chat-1")
}

/// Noon on the given day of June 2024.
pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
}

#[derive(Default)]
struct FakeState {
    quotes: Vec<Quote>,
    records: HashMap<QuoteId, ReviewRecord>,
    upserts: usize,
    fail_quote_reads: bool,
    fail_history_reads: bool,
    quote_delay: Option<Duration>,
    history_delay: Option<Duration>,
    write_delay: Option<Duration>,
}

/// Quote store + review history backed by a mutex-guarded map.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding quotes `1..=n` for [`owner()`].
    pub fn with_quotes(n: i64) -> Self {
        let store = Self::new();
        for id in 1..=n {
            store.add_quote(id, false);
        }
        store
    }

    pub fn add_quote(&self, id: i64, favorite: bool) {
        let quote = Quote::new(id, owner(), format!("quote number {id}"), at(1))
            .with_favorite(favorite);
        self.state.lock().unwrap().quotes.push(quote);
    }

    pub fn remove_quote(&self, id: i64) {
        let mut state = self.state.lock().unwrap();
        state.quotes.retain(|q| q.id != QuoteId(id));
        state.records.remove(&QuoteId(id));
    }

    pub fn seed_record(&self, record: ReviewRecord) {
        self.state
            .lock()
            .unwrap()
            .records
            .insert(record.quote_id(), record);
    }

    pub fn clear_records(&self) {
        self.state.lock().unwrap().records.clear();
    }

    pub fn record(&self, id: QuoteId) -> Option<ReviewRecord> {
        self.state.lock().unwrap().records.get(&id).cloned()
    }

    pub fn upsert_count(&self) -> usize {
        self.state.lock().unwrap().upserts
    }

    pub fn fail_quote_reads(&self) {
        self.state.lock().unwrap().fail_quote_reads = true;
    }

    pub fn fail_history_reads(&self) {
        self.state.lock().unwrap().fail_history_reads = true;
    }

    pub fn delay_quote_reads(&self, delay: Duration) {
        self.state.lock().unwrap().quote_delay = Some(delay);
    }

    pub fn delay_history_reads(&self, delay: Duration) {
        self.state.lock().unwrap().history_delay = Some(delay);
    }

    pub fn delay_history_writes(&self, delay: Duration) {
        self.state.lock().unwrap().write_delay = Some(delay);
    }
}

#[async_trait]
impl QuoteStore for FakeStore {
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Quote>, StoreError> {
        let delay = self.state.lock().unwrap().quote_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.state.lock().unwrap();
        if state.fail_quote_reads {
            return Err(StoreError::Unavailable("disk I/O error".to_string()));
        }
        Ok(state
            .quotes
            .iter()
            .filter(|q| &q.owner_id == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewHistory for FakeStore {
    async fn get(&self, quote_id: QuoteId) -> Result<Option<ReviewRecord>, StoreError> {
        let delay = self.state.lock().unwrap().history_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.state.lock().unwrap();
        if state.fail_history_reads {
            return Err(StoreError::Unavailable("database is locked".to_string()));
        }
        Ok(state.records.get(&quote_id).cloned())
    }

    async fn upsert(&self, record: &ReviewRecord) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.upserts += 1;
        state.records.insert(record.quote_id(), record.clone());
        Ok(())
    }

    async fn record_shown(
        &self,
        quote_id: QuoteId,
        now: DateTime<Utc>,
        mode: SelectionMode,
    ) -> Result<ReviewRecord, StoreError> {
        let delay = self.state.lock().unwrap().write_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        state.upserts += 1;
        let updated = state
            .records
            .get(&quote_id)
            .cloned()
            .unwrap_or_else(|| ReviewRecord::unseen(quote_id))
            .shown(now, mode);
        state.records.insert(quote_id, updated.clone());
        Ok(updated)
    }
}

/// Logger that keeps every event in memory.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<SelectionEvent>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<SelectionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SelectionLogger for RecordingLogger {
    fn log(&self, event: &SelectionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
