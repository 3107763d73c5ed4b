//! Domain layer for readwiser
//!
//! This crate contains the core entities, value objects and the pure
//! spaced-repetition scoring policy. It has no dependencies on storage,
//! scheduling or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Quote**: a saved text snippet, optionally with a source and tags
//! - **ReviewRecord**: when a quote was last surfaced and how many times
//! - **ScoringPolicy**: turns a review record into a selection weight, so
//!   quotes seen long ago or rarely come back sooner than recent ones

pub mod core;
pub mod quote;
pub mod review;

// Re-export commonly used types
pub use core::{
    config_issue::{ConfigIssue, ConfigIssueCode, Severity},
    error::DomainError,
};
pub use quote::{
    entities::{NewQuote, OwnerId, Quote, QuoteId},
    message::{MAX_URL_LENGTH, parse_message},
    query::{CollectionStats, QuoteFilter},
    text::{MAX_QUOTE_LENGTH, MAX_TAGS, MAX_TAG_LENGTH, normalize_tags, truncate_with_ellipsis},
};
pub use review::{
    record::{ReviewRecord, SelectionMode},
    scoring::ScoringPolicy,
};
