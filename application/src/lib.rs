//! Application layer for readwiser
//!
//! This crate contains the selection use cases, the ports they depend on,
//! and application configuration. It depends only on the domain layer.
//!
//! - [`PickQuoteUseCase`]: picks the next quote for `/random` and the
//!   Quote of the Day
//! - [`ComposeDigestUseCase`]: builds a batch of distinct quotes for the
//!   weekly digest

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SelectionParams;
pub use ports::{
    quote_store::{QuoteStore, ReviewHistory, StoreError},
    selection_logger::{NoSelectionLogger, SelectionEvent, SelectionLogger},
};
pub use use_cases::compose_digest::ComposeDigestUseCase;
pub use use_cases::pick_quote::{PickQuoteUseCase, SelectionError, SelectionRequest};
pub use use_cases::user_locks::UserLocks;
