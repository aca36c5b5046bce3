use std::sync::Arc;

use sc_core::ports::ClipboardHistoryPort;
use sc_core::ClipboardEntry;

/// Use case for listing recorded entries, oldest first.
pub struct ListHistory {
    history: Arc<dyn ClipboardHistoryPort>,
}

impl ListHistory {
    pub fn new(history: Arc<dyn ClipboardHistoryPort>) -> Self {
        Self { history }
    }

    pub async fn execute(&self) -> Vec<ClipboardEntry> {
        self.history.list().await
    }

    /// One `index<TAB>added_at<TAB>text` line per entry, 1-based.
    pub async fn lines(&self) -> Vec<String> {
        self.execute()
            .await
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.list_line(i + 1))
            .collect()
    }
}
