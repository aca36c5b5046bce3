use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ClipboardEntry;

/// Maximum number of entries kept in history. Oldest entries are evicted first.
pub const HISTORY_CAPACITY: usize = 200;

/// Ordered, capacity-bounded clipboard history.
///
/// Insertion order is chronological order. Only *consecutive* duplicates are
/// suppressed: the same text may appear again once something else was added
/// in between.
///
/// # Behavior
/// - `push` is a no-op when the text equals the text of the last entry
/// - after an append, the front is trimmed to keep the newest [`HISTORY_CAPACITY`]
/// - eviction is purely by insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipboardHistory {
    entries: Vec<ClipboardEntry>,
}

impl ClipboardHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ClipboardEntry>) -> Self {
        Self { entries }
    }

    /// Append `text` captured at `added_at`.
    ///
    /// Returns `true` if an entry was appended.
    pub fn push(&mut self, text: impl Into<String>, added_at: DateTime<Utc>) -> bool {
        let text = text.into();
        if self.last().is_some_and(|last| last.text == text) {
            return false;
        }

        self.entries.push(ClipboardEntry::new(text, added_at));
        if self.entries.len() > HISTORY_CAPACITY {
            let excess = self.entries.len() - HISTORY_CAPACITY;
            self.entries.drain(..excess);
        }
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ClipboardEntry> {
        self.entries.last()
    }

    /// Look up an entry by its 1-based position, oldest first.
    pub fn get(&self, one_based_index: usize) -> Option<&ClipboardEntry> {
        one_based_index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
