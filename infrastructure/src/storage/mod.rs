//! Persistence: SQLite adapter for the quote collection and review history.
//!
//! [`SqliteStore`] implements both the
//! [`QuoteStore`](readwiser_application::QuoteStore) and
//! [`ReviewHistory`](readwiser_application::ReviewHistory) ports, plus the
//! collection management calls (save, delete, favorites, listings) used
//! directly by the CLI.

mod sqlite;

pub use sqlite::{SqliteStore, SqliteStoreError};
