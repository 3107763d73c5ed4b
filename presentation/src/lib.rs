//! Presentation layer for readwiser
//!
//! This crate contains the CLI definitions and the output formatters that
//! turn quotes, digests and collection stats into text or JSON.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::{ConsoleFormatter, EMPTY_COLLECTION, MESSAGE_LIMIT};
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
