//! Clearing bumps the log epoch; a [`LogCursor`] from before restarts after it.

use std::fmt;

use chrono::Local;
use tracing::debug;

use crate::clipboard::Clipboard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputEntry {
    pub time: String,
    pub message: String,
    pub severity: Severity,
    pub action: Option<String>,
}

impl OutputEntry {
    pub fn new(message: impl Into<String>, severity: Severity, action: Option<String>) -> Self {
        Self {
            time: Local::now().format("%-I:%M:%S %p").to_string(),
            message: message.into(),
            severity,
            action,
        }
    }

    /// `[time] message action`, keeping the separating space when there is
    /// no action.
    pub fn line(&self) -> String {
        format!(
            "[{}] {} {}",
            self.time,
            self.message,
            self.action.as_deref().unwrap_or("")
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogCursor {
    epoch: u64,
    read: usize,
}

pub struct NewEntries<'a> {
    pub restarted: bool,
    pub entries: &'a [OutputEntry],
}

#[derive(Debug, Default)]
pub struct OutputLog {
    entries: Vec<OutputEntry>,
    epoch: u64,
    scroll: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: impl Into<String>, severity: Severity, action: Option<String>) {
        self.push(OutputEntry::new(message, severity, action));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Info, None);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Success, None);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Warning, None);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Error, None);
    }

    pub fn push(&mut self, entry: OutputEntry) {
        debug!(severity = %entry.severity, message = %entry.message, "output");
        self.entries.push(entry);
        self.scroll = self.entries.len().saturating_sub(1);
    }

    /// Drops every entry without the "cleared" notice. Used when a run takes
    /// over the panel.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.epoch += 1;
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.reset();
        self.info("Output cleared");
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry the view is scrolled to; always the newest.
    pub fn scroll_position(&self) -> usize {
        self.scroll
    }

    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(OutputEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn read_new(&self, cursor: &mut LogCursor) -> NewEntries<'_> {
        let restarted = cursor.epoch != self.epoch;
        if restarted {
            cursor.epoch = self.epoch;
            cursor.read = 0;
        }
        let start = cursor.read.min(self.entries.len());
        cursor.read = self.entries.len();
        NewEntries {
            restarted,
            entries: &self.entries[start..],
        }
    }

    /// Writes the whole log to the clipboard and records how that went.
    pub async fn copy(&mut self, clipboard: &dyn Clipboard) {
        let text = self.text();
        match clipboard.write_text(&text).await {
            Ok(()) => self.success("Output copied to clipboard"),
            Err(err) => self.error(format!("Failed to copy output: {}", err)),
        }
    }
}
