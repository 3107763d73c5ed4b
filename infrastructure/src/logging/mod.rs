//! Logging infrastructure: structured selection logging.
//!
//! Provides [`JsonlSelectionLogger`], a JSONL file writer that implements
//! the [`SelectionLogger`](readwiser_application::SelectionLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSelectionLogger;
