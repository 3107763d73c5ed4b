//! Infrastructure layer for readwiser
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: SQLite storage, configuration file loading
//! and the JSONL selection log.

pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlSelectionLogger;
pub use storage::{SqliteStore, SqliteStoreError};
