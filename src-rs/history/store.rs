use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use super::types::{HistoryEntry, HistoryRow};
use crate::error::{Result, WebUiError};
use crate::helpers::truncate_label;
use crate::store::{KeyValueStore, HISTORY_KEY};

pub const HISTORY_LIMIT: usize = 10;

/// Recent tasks, newest first, capped at [`HISTORY_LIMIT`].
#[derive(Debug, Default)]
pub struct TaskHistory {
    entries: Vec<HistoryEntry>,
    last_id: i64,
}

impl TaskHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the in-memory list with the persisted one. A missing key
    /// leaves the list empty.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<()> {
        let raw = match store.get(HISTORY_KEY)? {
            Some(raw) => raw,
            None => return Ok(()),
        };
        let entries = serde_json::from_str::<Vec<HistoryEntry>>(&raw).map_err(|source| {
            warn!(key = HISTORY_KEY, "stored history is not valid json");
            WebUiError::Corrupt {
                key: HISTORY_KEY.to_string(),
                source,
            }
        })?;
        self.last_id = entries
            .iter()
            .filter_map(|entry| entry.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        self.entries = entries;
        self.entries.truncate(HISTORY_LIMIT);
        debug!(count = self.entries.len(), "loaded task history");
        Ok(())
    }

    /// Stores the list with the new task on top; memory only changes once
    /// the store accepted it.
    pub fn add(&mut self, store: &dyn KeyValueStore, task: &str) -> Result<String> {
        let id = self.next_id();
        let mut entries = Vec::with_capacity(HISTORY_LIMIT + 1);
        entries.push(HistoryEntry {
            id: id.to_string(),
            task: task.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        entries.extend(self.entries.iter().cloned());
        entries.truncate(HISTORY_LIMIT);

        let serialized = serde_json::to_string(&entries)?;
        store.set(HISTORY_KEY, &serialized)?;

        self.entries = entries;
        self.last_id = id;
        Ok(id.to_string())
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self, current: Option<&str>) -> Vec<HistoryRow> {
        self.entries
            .iter()
            .map(|entry| HistoryRow {
                id: entry.id.clone(),
                label: truncate_label(&entry.task),
                active: current == Some(entry.id.as_str()),
            })
            .collect()
    }

    // Millisecond clock, bumped when two tasks land in the same millisecond.
    fn next_id(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.last_id + 1)
    }
}
