//! Output formatting for quotes, digests and stats

pub mod console;
pub mod formatter;
pub mod json;
