//! Append-only JSONL audit trail of surfaced quotes.
//!
//! One line per [`SelectionEvent`], tagged with its `type` plus a
//! `logged_at` wall-clock stamp next to the event's own `at`. Every
//! `readwiser` run appends to the same file, so each line goes out in a
//! single `write_all` on an `O_APPEND` handle and concurrent runs never
//! interleave partial lines.

use chrono::{DateTime, Utc};
use readwiser_application::ports::selection_logger::{SelectionEvent, SelectionLogger};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

#[derive(Serialize)]
struct LogLine<'a> {
    #[serde(flatten)]
    event: &'a SelectionEvent,
    logged_at: DateTime<Utc>,
}

/// Selection logger backed by a JSONL file.
pub struct JsonlSelectionLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlSelectionLogger {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create selection log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open selection log {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn render(event: &SelectionEvent, logged_at: DateTime<Utc>) -> Option<String> {
        match serde_json::to_string(&LogLine { event, logged_at }) {
            Ok(mut line) => {
                line.push('\n');
                Some(line)
            }
            Err(e) => {
                warn!("Could not serialize {} event: {}", event.kind(), e);
                None
            }
        }
    }
}

impl SelectionLogger for JsonlSelectionLogger {
    fn log(&self, event: &SelectionEvent) {
        let Some(line) = Self::render(event, Utc::now()) else {
            return;
        };

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("Could not write to {}: {}", self.path.display(), e);
        }
    }
}
