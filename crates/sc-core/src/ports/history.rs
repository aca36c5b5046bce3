use async_trait::async_trait;

use crate::clipboard::ClipboardEntry;

/// Durable, capacity-bounded clipboard history.
///
/// All operations form a single critical section per process: no caller ever
/// observes a partially applied `add` or `clear`.
#[async_trait]
pub trait ClipboardHistoryPort: Send + Sync {
    /// Append `text` unless it equals the most recent entry.
    ///
    /// Returns `true` when an entry was appended. Persistence failures are
    /// logged by the implementation and do not fail the call.
    async fn add(&self, text: &str) -> bool;

    /// Snapshot of all entries, oldest first.
    async fn list(&self) -> Vec<ClipboardEntry>;

    /// Drop every entry.
    async fn clear(&self);
}
