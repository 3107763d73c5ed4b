//! Spaced-repetition scoring policy.
//!
//! [`ScoringPolicy::score`] maps a quote's review history to a positive
//! selection weight. Higher weight means more likely to be surfaced.
//!
//! # Shape
//!
//! ```text
//! never shown      → new_quote_weight
//! shown            → f(elapsed) / g(show_count)
//!   f(elapsed)     = clamp(elapsed_days, min_weight, max_elapsed_days)
//!   g(n)           = 1 + frequency_penalty * n
//! favorite         → weight * favorite_boost
//! ```
//!
//! `new_quote_weight` must exceed `max_elapsed_days`, the largest weight a
//! shown quote can reach before the favorite boost.

use super::record::ReviewRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Tunable constants of the scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    new_quote_weight: f64,
    max_elapsed_days: f64,
    min_weight: f64,
    frequency_penalty: f64,
    favorite_boost: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            new_quote_weight: 1000.0,
            max_elapsed_days: 365.0,
            min_weight: 0.01,
            frequency_penalty: 1.0,
            favorite_boost: 2.0,
        }
    }
}

impl ScoringPolicy {
    /// Create a policy, returning every violated constraint on failure.
    pub fn try_new(
        new_quote_weight: f64,
        max_elapsed_days: f64,
        min_weight: f64,
        frequency_penalty: f64,
        favorite_boost: f64,
    ) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        if !(min_weight.is_finite() && min_weight > 0.0) {
            errors.push(format!("min_weight must be > 0 (got {min_weight})"));
        }
        if !(max_elapsed_days.is_finite() && max_elapsed_days > min_weight) {
            errors.push(format!(
                "max_elapsed_days ({max_elapsed_days}) must be greater than min_weight ({min_weight})"
            ));
        }
        if !(new_quote_weight.is_finite() && new_quote_weight > max_elapsed_days) {
            errors.push(format!(
                "new_quote_weight ({new_quote_weight}) must be greater than max_elapsed_days ({max_elapsed_days})"
            ));
        }
        if !(frequency_penalty.is_finite() && frequency_penalty >= 0.0) {
            errors.push(format!(
                "frequency_penalty must be >= 0 (got {frequency_penalty})"
            ));
        }
        if !(favorite_boost.is_finite() && favorite_boost > 1.0) {
            errors.push(format!("favorite_boost must be > 1 (got {favorite_boost})"));
        }

        if errors.is_empty() {
            Ok(Self {
                new_quote_weight,
                max_elapsed_days,
                min_weight,
                frequency_penalty,
                favorite_boost,
            })
        } else {
            Err(errors)
        }
    }

    /// Selection weight for a quote at `now`.
    ///
    /// `record` is `None` for quotes that have never been selected.
    /// The result is always finite and strictly positive.
    pub fn score(
        &self,
        record: Option<&ReviewRecord>,
        is_favorite: bool,
        now: DateTime<Utc>,
    ) -> f64 {
        let base = match record.and_then(|r| r.last_shown_at().map(|at| (at, r.show_count()))) {
            None => self.new_quote_weight,
            Some((last_shown_at, show_count)) => {
                let elapsed_days =
                    (now - last_shown_at).num_milliseconds().max(0) as f64 / MILLIS_PER_DAY;
                let recency = elapsed_days.clamp(self.min_weight, self.max_elapsed_days);
                let frequency = 1.0 + self.frequency_penalty * f64::from(show_count);
                (recency / frequency).max(f64::MIN_POSITIVE)
            }
        };

        if is_favorite {
            base * self.favorite_boost
        } else {
            base
        }
    }

    // ==================== Accessors ====================

    pub fn new_quote_weight(&self) -> f64 {
        self.new_quote_weight
    }

    pub fn max_elapsed_days(&self) -> f64 {
        self.max_elapsed_days
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    pub fn frequency_penalty(&self) -> f64 {
        self.frequency_penalty
    }

    pub fn favorite_boost(&self) -> f64 {
        self.favorite_boost
    }
}
