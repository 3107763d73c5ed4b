//! Selection parameters: use case control.
//!
//! [`SelectionParams`] groups the static parameters that control how
//! [`PickQuoteUseCase`](crate::use_cases::pick_quote::PickQuoteUseCase) and
//! [`ComposeDigestUseCase`](crate::use_cases::compose_digest::ComposeDigestUseCase)
//! talk to their stores. Scoring constants live in the domain's
//! `ScoringPolicy`; these are application-layer concerns.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Selection control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    /// Upper bound for each quote store / review history call.
    /// `None` waits indefinitely.
    pub store_timeout: Option<Duration>,
    /// Number of quotes in a digest when the caller does not ask for a size.
    pub digest_count: usize,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            store_timeout: Some(Duration::from_secs(10)),
            digest_count: 10,
        }
    }
}

impl SelectionParams {
    // ==================== Builder Methods ====================

    pub fn with_store_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_digest_count(mut self, count: usize) -> Self {
        self.digest_count = count;
        self
    }
}
