//! Review domain: exposure history and the scoring policy built on it.
//!
//! - [`record::ReviewRecord`]: how often and when a quote was last surfaced
//! - [`record::SelectionMode`]: why it was surfaced (random, daily, weekly)
//! - [`scoring::ScoringPolicy`]: spaced-repetition weight for a quote

pub mod record;
pub mod scoring;
