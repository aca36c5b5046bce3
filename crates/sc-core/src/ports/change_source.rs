//! Change-notification port
//!
//! A notification source only says "the clipboard changed"; the new content
//! is read separately through [`SystemClipboardPort`](super::SystemClipboardPort).
//!
//! ```text
//! ClipboardChangeSourcePort::subscribe()
//!      ↓
//! ChangeFeed { events, errors }   (consumed by the capture loop)
//!      ↓
//! ChangeFeed::close()             (releases the backend watcher)
//! ```

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

#[async_trait]
pub trait ClipboardChangeSourcePort: Send + Sync {
    /// Start watching the clipboard.
    ///
    /// Fails when the backend cannot be reached at all (no display, missing
    /// tool). Failures after startup are reported through
    /// [`ChangeFeed::errors`].
    async fn subscribe(&self) -> Result<ChangeFeed>;
}

/// Releases whatever resource backs a [`ChangeFeed`].
#[async_trait]
pub trait FeedCloser: Send {
    async fn close(self: Box<Self>) -> Result<()>;
}

/// A live subscription to clipboard change notifications.
///
/// - `events` yields one `()` per observed change; it closes when the backend
///   stops for good
/// - `errors` carries backend failures independently of `events`; a closed
///   error stream means "no more errors", not a failure
pub struct ChangeFeed {
    pub events: mpsc::Receiver<()>,
    pub errors: mpsc::Receiver<anyhow::Error>,
    closer: Option<Box<dyn FeedCloser>>,
}

impl ChangeFeed {
    pub fn new(
        events: mpsc::Receiver<()>,
        errors: mpsc::Receiver<anyhow::Error>,
        closer: impl FeedCloser + 'static,
    ) -> Self {
        Self {
            events,
            errors,
            closer: Some(Box::new(closer)),
        }
    }

    /// A feed with nothing to release, for sources owned by the caller.
    pub fn unmanaged(events: mpsc::Receiver<()>, errors: mpsc::Receiver<anyhow::Error>) -> Self {
        Self {
            events,
            errors,
            closer: None,
        }
    }

    /// Release the backend watcher. Idempotent.
    pub async fn close(&mut self) -> Result<()> {
        self.events.close();
        self.errors.close();
        match self.closer.take() {
            Some(closer) => closer.close().await,
            None => Ok(()),
        }
    }
}
