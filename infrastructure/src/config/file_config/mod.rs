//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain/application types
//! on demand, reporting problems as [`ConfigIssue`]s.

mod digest;
mod logging;
mod scoring;
mod storage;

pub use digest::{DEFAULT_DIGEST_COUNT, FileDigestConfig};
pub use logging::FileLoggingConfig;
pub use scoring::FileScoringConfig;
pub use storage::{ConfigValidationError, FileStorageConfig};

use readwiser_application::SelectionParams;
use readwiser_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Spaced-repetition constants
    pub scoring: FileScoringConfig,
    /// Digest settings
    pub digest: FileDigestConfig,
    /// Database location and store timeouts
    pub storage: FileStorageConfig,
    /// Log files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Warnings mean a default replaced the configured value. Errors mean
    /// the configuration cannot be used.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.scoring.to_scoring_policy().1);
        issues.extend(self.digest.parse_count().1);

        if self.storage.database_path().is_err() {
            issues.push(ConfigIssue::empty("storage.database_path"));
        }
        if let Err(e) = self.storage.store_timeout() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::InvalidConstraint {
                    field: "storage.timeout_seconds".to_string(),
                },
                message: format!("{e}, falling back to the default timeout"),
            });
        }

        issues
    }

    /// Selection parameters for the use cases, with invalid values replaced.
    pub fn selection_params(&self) -> SelectionParams {
        let defaults = SelectionParams::default();
        let timeout = self
            .storage
            .store_timeout()
            .unwrap_or(defaults.store_timeout);
        defaults
            .with_store_timeout(timeout)
            .with_digest_count(self.digest.parse_count().0)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
