//! Storage configuration from TOML (`[storage]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("storage.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("storage.database_path cannot be empty")]
    EmptyDatabasePath,
}

/// Storage configuration.
///
/// ```toml
/// [storage]
/// database_path = "~/quotes.db"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// SQLite file. Defaults to `<data dir>/readwiser/quotes.db`.
    pub database_path: Option<PathBuf>,
    /// Upper bound for each store call. Omit to wait indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            timeout_seconds: Some(10),
        }
    }
}

impl FileStorageConfig {
    /// Resolve the database path, expanding a leading `~/`.
    pub fn database_path(&self) -> Result<PathBuf, ConfigValidationError> {
        match &self.database_path {
            Some(path) if path.as_os_str().is_empty() => {
                Err(ConfigValidationError::EmptyDatabasePath)
            }
            Some(path) => Ok(expand_home(path)),
            None => Ok(Self::default_database_path()),
        }
    }

    pub fn store_timeout(&self) -> Result<Option<Duration>, ConfigValidationError> {
        match self.timeout_seconds {
            Some(0) => Err(ConfigValidationError::InvalidTimeout),
            secs => Ok(secs.map(Duration::from_secs)),
        }
    }

    /// `<data dir>/readwiser/quotes.db`, or `./data/quotes.db` without a data dir.
    pub fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("readwiser"))
            .unwrap_or_else(|| PathBuf::from("data"))
            .join("quotes.db")
    }
}
