//! Scoring configuration from TOML (`[scoring]` section)

use readwiser_domain::{ConfigIssue, ScoringPolicy};
use serde::{Deserialize, Serialize};

/// Spaced-repetition constants from TOML.
///
/// # Example
///
/// ```toml
/// [scoring]
/// new_quote_weight = 1000.0
/// max_elapsed_days = 365.0
/// min_weight = 0.01
/// frequency_penalty = 1.0
/// favorite_boost = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    /// Weight of a quote that has never been shown.
    pub new_quote_weight: f64,
    /// Elapsed days beyond which a shown quote stops gaining weight.
    pub max_elapsed_days: f64,
    /// Floor for a just-shown quote.
    pub min_weight: f64,
    /// Per-exposure divisor growth.
    pub frequency_penalty: f64,
    /// Multiplier for favorites.
    pub favorite_boost: f64,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let policy = ScoringPolicy::default();
        Self {
            new_quote_weight: policy.new_quote_weight(),
            max_elapsed_days: policy.max_elapsed_days(),
            min_weight: policy.min_weight(),
            frequency_penalty: policy.frequency_penalty(),
            favorite_boost: policy.favorite_boost(),
        }
    }
}

impl FileScoringConfig {
    /// Convert to a domain `ScoringPolicy`, returning validation issues.
    ///
    /// If any value violates a constraint, the whole section falls back to
    /// `ScoringPolicy::default()` and each violation becomes a warning.
    pub fn to_scoring_policy(&self) -> (ScoringPolicy, Vec<ConfigIssue>) {
        match ScoringPolicy::try_new(
            self.new_quote_weight,
            self.max_elapsed_days,
            self.min_weight,
            self.frequency_penalty,
            self.favorite_boost,
        ) {
            Ok(policy) => (policy, vec![]),
            Err(errors) => {
                let issues = errors
                    .into_iter()
                    .map(|msg| ConfigIssue::constraint("scoring", msg))
                    .collect();
                (ScoringPolicy::default(), issues)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readwiser_domain::{ConfigIssueCode, Severity};

    #[test]
    fn test_scoring_config_default_matches_policy() {
        let (policy, issues) = FileScoringConfig::default().to_scoring_policy();
        assert!(issues.is_empty());
        assert_eq!(policy, ScoringPolicy::default());
    }

    #[test]
    fn test_scoring_config_deserialize_partial() {
        let toml_str = r#"
[scoring]
favorite_boost = 3.0
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scoring.favorite_boost, 3.0);
        assert_eq!(config.scoring.new_quote_weight, 1000.0);

        let (policy, issues) = config.scoring.to_scoring_policy();
        assert!(issues.is_empty());
        assert_eq!(policy.favorite_boost(), 3.0);
    }

    #[test]
    fn test_scoring_config_invalid_falls_back_to_default() {
        let config = FileScoringConfig {
            new_quote_weight: 10.0, // not above max_elapsed_days
            min_weight: 0.0,        // must be positive
            ..FileScoringConfig::default()
        };
        let (policy, issues) = config.to_scoring_policy();

        assert_eq!(policy, ScoringPolicy::default());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning
            && matches!(&i.code, ConfigIssueCode::InvalidConstraint { field } if field == "scoring")));
    }
}
