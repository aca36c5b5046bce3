use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use sc_core::ports::{ClipboardHistoryPort, ClockPort, HistoryError};
use sc_core::{ClipboardEntry, ClipboardHistory};

use crate::fs::atomic_write;
use crate::time::SystemClock;

/// Clipboard history persisted as a JSON array of `{text, added_at}` records.
///
/// # Behavior
/// - the in-memory [`ClipboardHistory`] is authoritative; every `add`/`clear`
///   rewrites the whole file through [`atomic_write`] while the lock is held
/// - a failed write is logged and swallowed so capture keeps running; the
///   next successful write catches the file up
/// - one `tokio::sync::Mutex` serializes all operations in this process;
///   across processes the last rename wins
pub struct FileHistoryStore {
    path: PathBuf,
    history: Mutex<ClipboardHistory>,
    clock: Arc<dyn ClockPort>,
}

impl FileHistoryStore {
    /// Open the store at `path`, loading any committed state.
    ///
    /// A missing file is an empty history. An unreadable or malformed file is
    /// an error: history is never silently discarded.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        Self::open_with_clock(path, Arc::new(SystemClock)).await
    }

    pub async fn open_with_clock(
        path: impl Into<PathBuf>,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, HistoryError> {
        let path = path.into();
        let history = load(&path).await?;
        debug!(path = %path.display(), entries = history.len(), "history loaded");

        Ok(Self {
            path,
            history: Mutex::new(history),
            clock,
        })
    }

    async fn persist(&self, history: &ClipboardHistory) {
        if let Err(e) = self.try_persist(history).await {
            warn!(path = %self.path.display(), error = %format!("{e:#}"), "failed to persist history");
        }
    }

    async fn try_persist(&self, history: &ClipboardHistory) -> Result<()> {
        let content = serde_json::to_vec(history)?;
        atomic_write(&self.path, &content).await
    }
}

async fn load(path: &Path) -> Result<ClipboardHistory, HistoryError> {
    let content = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClipboardHistory::new());
        }
        Err(source) => {
            return Err(HistoryError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let entries: Vec<ClipboardEntry> =
        serde_json::from_slice(&content).map_err(|source| HistoryError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(ClipboardHistory::from_entries(entries))
}

#[async_trait]
impl ClipboardHistoryPort for FileHistoryStore {
    async fn add(&self, text: &str) -> bool {
        let mut history = self.history.lock().await;
        if !history.push(text, self.clock.now()) {
            return false;
        }
        self.persist(&history).await;
        true
    }

    async fn list(&self) -> Vec<ClipboardEntry> {
        self.history.lock().await.entries().to_vec()
    }

    async fn clear(&self) {
        let mut history = self.history.lock().await;
        history.clear();
        self.persist(&history).await;
    }
}
