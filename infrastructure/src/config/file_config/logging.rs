//! Logging configuration from TOML (`[logging]` section)

use super::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log file locations. Both are off unless set.
///
/// ```toml
/// [logging]
/// file = "~/.local/state/readwiser/readwiser.log"
/// selection_log = "~/.local/state/readwiser/selections.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log, rotated daily.
    pub file: Option<PathBuf>,
    /// JSONL audit trail of every selection.
    pub selection_log: Option<PathBuf>,
}

impl FileLoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_deref().map(expand_home)
    }

    pub fn selection_log_path(&self) -> Option<PathBuf> {
        self.selection_log.as_deref().map(expand_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_disabled_by_default() {
        let config = FileLoggingConfig::default();
        assert!(config.file_path().is_none());
        assert!(config.selection_log_path().is_none());
    }

    #[test]
    fn test_logging_paths() {
        let toml_str = r#"
[logging]
selection_log = "/tmp/readwiser/selections.jsonl"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.logging.selection_log_path(),
            Some(PathBuf::from("/tmp/readwiser/selections.jsonl"))
        );
        assert!(config.logging.file_path().is_none());
    }
}
