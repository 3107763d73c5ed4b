//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Quote text cannot be empty")]
    EmptyQuote,

    #[error("Quote text is too long ({len} bytes, max {max})")]
    QuoteTooLong { len: usize, max: usize },

    #[error("Invalid review record for quote {quote_id}: {reason}")]
    InvalidReviewRecord { quote_id: i64, reason: String },

    #[error("Invalid selection mode: {0}")]
    InvalidMode(String),
}

impl DomainError {
    /// Check if this error was caused by user-supplied quote content
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyQuote | DomainError::QuoteTooLong { .. }
        )
    }
}
