//! Bounded search history with up/down recall.
//!
//! Queries are kept oldest first and persisted to a [`KeyValueStore`] as a
//! JSON array of strings. The history is reloaded whenever the panel opens
//! and written back when it closes.

use crate::store::KeyValueStore;
use std::collections::VecDeque;

/// Bounded FIFO of executed queries plus a recall cursor.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    /// Oldest first
    entries: VecDeque<String>,
    max_entries: usize,
    key: String,
    /// Distance from the newest entry while recalling
    recall: usize,
}

impl SearchHistory {
    /// Create an empty history persisted under `key`.
    pub fn new(max_entries: usize, key: impl Into<String>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
            key: key.into(),
            recall: 0,
        }
    }

    /// Replace the in-memory history with what the store holds.
    ///
    /// Missing or malformed data yields an empty history.
    pub fn load(&mut self, store: &impl KeyValueStore) {
        self.recall = 0;
        let Some(serialized) = store.get(&self.key) else {
            self.entries.clear();
            return;
        };
        match serde_json::from_str::<Option<Vec<String>>>(&serialized) {
            Ok(entries) => {
                self.entries = entries.unwrap_or_default().into();
                self.truncate();
                log::debug!("Loaded {} search history entries", self.entries.len());
            }
            Err(e) => {
                log::warn!("Failed to parse search history: {}", e);
                self.entries.clear();
            }
        }
    }

    /// Write the history to the store. Failures are logged, not returned.
    pub fn persist(&mut self, store: &mut impl KeyValueStore) {
        self.recall = 0;
        match serde_json::to_string(&self.entries) {
            Ok(serialized) => {
                if let Err(e) = store.set(&self.key, &serialized) {
                    log::error!("Failed to save search history: {}", e);
                } else {
                    log::debug!("Saved {} search history entries", self.entries.len());
                }
            }
            Err(e) => log::error!("Failed to serialize search history: {}", e),
        }
    }

    /// Append a query, evicting the oldest entries beyond the bound.
    pub fn push(&mut self, query: impl Into<String>) {
        self.entries.push_back(query.into());
        self.truncate();
    }

    /// Step towards older entries (ArrowUp).
    ///
    /// With an empty input the current recall position is shown as is;
    /// otherwise the cursor moves one step first. Returns `None` once the
    /// oldest entry has been reached.
    pub fn recall_older(&mut self, input_is_empty: bool) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        if !input_is_empty {
            if self.recall >= last {
                self.recall = last;
                return None;
            }
            self.recall += 1;
        }
        self.recall = self.recall.min(last);
        self.entries.get(last - self.recall).map(String::as_str)
    }

    /// Step towards newer entries (ArrowDown).
    ///
    /// Returns `None` once the newest entry has been reached.
    pub fn recall_newer(&mut self, input_is_empty: bool) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.recall = self.recall.min(last);
        if !input_is_empty {
            if self.recall == 0 {
                return None;
            }
            self.recall -= 1;
        }
        self.entries.get(last - self.recall).map(String::as_str)
    }

    /// Forget the recall position, e.g. after the user types.
    pub fn reset_recall(&mut self) {
        self.recall = 0;
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &VecDeque<String> {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}
