//! Structured configuration issues.
//!
//! Configuration loading never aborts on a bad tuning value. Instead each
//! problem is reported as a [`ConfigIssue`] and the affected section falls
//! back to its defaults.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a default was used instead of the configured value.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A numeric value violates a constraint (e.g. must be positive).
    InvalidConstraint { field: String },
    /// A value that must be non-empty was empty.
    EmptyValue { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    /// Warning for a violated numeric constraint.
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: ConfigIssueCode::InvalidConstraint {
                field: field.into(),
            },
            message: message.into(),
        }
    }

    /// Error for a required value that was left empty.
    pub fn empty(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            severity: Severity::Error,
            message: format!("{field} cannot be empty"),
            code: ConfigIssueCode::EmptyValue { field },
        }
    }
}
