//! Review records: per-quote exposure bookkeeping.

use crate::core::error::DomainError;
use crate::quote::entities::QuoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a quote was surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// On-demand `/random`
    Random,
    /// Quote of the Day
    Daily,
    /// Weekly digest (also used for a manual `/digest`)
    Weekly,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Random => "random",
            SelectionMode::Daily => "daily",
            SelectionMode::Weekly => "weekly",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(SelectionMode::Random),
            "daily" => Ok(SelectionMode::Daily),
            "weekly" | "digest" => Ok(SelectionMode::Weekly),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}

/// Exposure history of a single quote.
///
/// `show_count == 0` exactly when `last_shown_at` is `None`. The fields are
/// private so the only ways to build a record keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    quote_id: QuoteId,
    last_shown_at: Option<DateTime<Utc>>,
    show_count: u32,
    last_mode: Option<SelectionMode>,
}

impl ReviewRecord {
    /// Record for a quote that has never been shown.
    pub fn unseen(quote_id: QuoteId) -> Self {
        Self {
            quote_id,
            last_shown_at: None,
            show_count: 0,
            last_mode: None,
        }
    }

    /// Rebuild a record from storage, checking the invariant.
    pub fn restore(
        quote_id: QuoteId,
        last_shown_at: Option<DateTime<Utc>>,
        show_count: u32,
        last_mode: Option<SelectionMode>,
    ) -> Result<Self, DomainError> {
        match (show_count, last_shown_at) {
            (0, None) | (1.., Some(_)) => Ok(Self {
                quote_id,
                last_shown_at,
                show_count,
                last_mode,
            }),
            (0, Some(_)) => Err(DomainError::InvalidReviewRecord {
                quote_id: quote_id.0,
                reason: "last_shown_at is set but show_count is 0".to_string(),
            }),
            (_, None) => Err(DomainError::InvalidReviewRecord {
                quote_id: quote_id.0,
                reason: format!("show_count is {show_count} but last_shown_at is missing"),
            }),
        }
    }

    /// The record after one more exposure at `now`.
    pub fn shown(&self, now: DateTime<Utc>, mode: SelectionMode) -> Self {
        Self {
            quote_id: self.quote_id,
            last_shown_at: Some(now),
            show_count: self.show_count.saturating_add(1),
            last_mode: Some(mode),
        }
    }

    // ==================== Accessors ====================

    pub fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    pub fn last_shown_at(&self) -> Option<DateTime<Utc>> {
        self.last_shown_at
    }

    pub fn show_count(&self) -> u32 {
        self.show_count
    }

    pub fn last_mode(&self) -> Option<SelectionMode> {
        self.last_mode
    }

    pub fn is_unseen(&self) -> bool {
        self.show_count == 0
    }
}
