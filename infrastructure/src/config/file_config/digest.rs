//! Digest configuration from TOML (`[digest]` section)

use readwiser_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Default number of quotes in a digest
pub const DEFAULT_DIGEST_COUNT: usize = 10;

/// Digest configuration.
///
/// ```toml
/// [digest]
/// count = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDigestConfig {
    /// Quotes per digest when `--count` is not given.
    pub count: usize,
}

impl Default for FileDigestConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_DIGEST_COUNT,
        }
    }
}

impl FileDigestConfig {
    /// The configured count, or the default when it is zero.
    pub fn parse_count(&self) -> (usize, Option<ConfigIssue>) {
        if self.count == 0 {
            let issue = ConfigIssue::constraint(
                "digest.count",
                format!("digest.count must be at least 1, falling back to {DEFAULT_DIGEST_COUNT}"),
            );
            (DEFAULT_DIGEST_COUNT, Some(issue))
        } else {
            (self.count, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_count() {
        let (count, issue) = FileDigestConfig::default().parse_count();
        assert_eq!(count, 10);
        assert!(issue.is_none());
        assert_eq!(FileDigestConfig { count: 3 }.parse_count().0, 3);

        let (count, issue) = FileDigestConfig { count: 0 }.parse_count();
        assert_eq!(count, DEFAULT_DIGEST_COUNT);
        assert!(issue.is_some());
    }
}
