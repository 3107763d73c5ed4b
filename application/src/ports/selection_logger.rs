//! Port for structured selection logging.
//!
//! Defines the [`SelectionLogger`] trait for recording which quotes were
//! surfaced, when and why, to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port keeps a
//! machine-readable audit trail (JSONL) of every pick and digest.

use chrono::{DateTime, Utc};
use readwiser_domain::{OwnerId, QuoteId, SelectionMode};
use serde::Serialize;

/// Something the selector surfaced.
///
/// Serializes with a `type` tag (`quote_selected` / `digest_composed`) and
/// the fields inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// One quote was picked and its exposure recorded.
    QuoteSelected {
        owner: OwnerId,
        quote_id: QuoteId,
        mode: SelectionMode,
        /// Count after this exposure
        show_count: u32,
        /// Quotes eligible for the draw
        candidates: usize,
        collection_size: usize,
        /// The caller's clock, not the time of logging
        at: DateTime<Utc>,
    },

    /// A digest batch finished.
    DigestComposed {
        owner: OwnerId,
        requested: usize,
        quote_ids: Vec<QuoteId>,
        at: DateTime<Utc>,
    },
}

impl SelectionEvent {
    /// The serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionEvent::QuoteSelected { .. } => "quote_selected",
            SelectionEvent::DigestComposed { .. } => "digest_composed",
        }
    }
}

/// Port for logging selection events.
///
/// The `log` method is synchronous and non-fallible: a failed log write
/// never fails a selection.
pub trait SelectionLogger: Send + Sync {
    /// Record a selection event.
    fn log(&self, event: &SelectionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSelectionLogger;

impl SelectionLogger for NoSelectionLogger {
    fn log(&self, _event: &SelectionEvent) {}
}
