//! Append-only log of parsing anomalies.
//!
//! Every stage of a parse run records what it skipped, adjusted or could not
//! read here. Entries are also emitted as `tracing` events so they show up
//! in the process log while the run is in progress.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogCategory {
    /// A fragment matched no known grammar.
    Unparseable,
    /// An unusual situation that was handled. Informational.
    EdgeCase,
    /// Input that was deliberately discarded.
    Ignored,
    /// Data may have been lost or degraded.
    Warning,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogCategory::Unparseable => "UNPARSEABLE",
            LogCategory::EdgeCase => "EDGE_CASE",
            LogCategory::Ignored => "IGNORED",
            LogCategory::Warning => "WARNING",
        })
    }
}

/// One recorded anomaly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub category: LogCategory,
    pub message: String,
    /// The roster text the entry is about, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_fragment: Option<String>,
    /// Extra detail, typically the underlying error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// The diagnostics of one parse run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticsLog {
    entries: Vec<LogEntry>,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time.
    pub fn record(
        &mut self,
        category: LogCategory,
        message: impl Into<String>,
        source_fragment: Option<&str>,
        context: Option<String>,
    ) {
        let entry = LogEntry {
            category,
            message: message.into(),
            source_fragment: source_fragment.map(str::to_string),
            context,
            timestamp: Utc::now(),
        };

        match category {
            LogCategory::Warning => warn!(
                fragment = entry.source_fragment.as_deref(),
                context = entry.context.as_deref(),
                "{}",
                entry.message
            ),
            _ => debug!(
                %category,
                fragment = entry.source_fragment.as_deref(),
                "{}",
                entry.message
            ),
        }

        self.entries.push(entry);
    }

    pub fn edge_case(&mut self, message: impl Into<String>, fragment: Option<&str>) {
        self.record(LogCategory::EdgeCase, message, fragment, None);
    }

    pub fn ignored(&mut self, message: impl Into<String>, fragment: Option<&str>) {
        self.record(LogCategory::Ignored, message, fragment, None);
    }

    pub fn unparseable(&mut self, message: impl Into<String>, fragment: &str) {
        self.record(LogCategory::Unparseable, message, Some(fragment), None);
    }

    pub fn warning(&mut self, message: impl Into<String>, fragment: Option<&str>) {
        self.record(LogCategory::Warning, message, fragment, None);
    }

    /// Record a warning, keeping the error text as context.
    pub fn warning_with(
        &mut self,
        message: impl Into<String>,
        fragment: Option<&str>,
        error: &dyn std::error::Error,
    ) {
        self.record(LogCategory::Warning, message, fragment, Some(error.to_string()));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one category, in recording order.
    pub fn of_category(&self, category: LogCategory) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }
}
