//! Operator log buffer
//!
//! Append-only, insertion-ordered. The only removal is a full reset at the
//! start of a new connection attempt.

use serde::Serialize;

/// Marker that classifies an entry as an error for display
pub const DEFAULT_ERROR_MARKER: &str = "[ERR]:";

/// One timestamped line shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }

    /// Whether the message carries the error marker.
    /// Derived from the text every time; never stored.
    pub fn is_error(&self, marker: &str) -> bool {
        !marker.is_empty() && self.message.contains(marker)
    }

    /// `[timestamp] message`
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.timestamp, self.message)
    }
}

#[derive(Debug, Default)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
    /// Bumped on every reset so streaming readers can notice it
    generation: u64,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn error_count(&self, marker: &str) -> usize {
        self.entries.iter().filter(|e| e.is_error(marker)).count()
    }
}
