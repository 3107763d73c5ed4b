//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`config_issue::ConfigIssue`]: structured configuration warnings

pub mod config_issue;
pub mod error;
