//! Clipboard port - abstracts local clipboard access
//!
//! Plain text only. How the text reaches the desktop session (wl-copy,
//! xclip, ...) is decided by the platform layer.

use anyhow::Result;
use async_trait::async_trait;

/// Clipboard port - abstracts local clipboard access
#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// Errors are expected to be transient (no owner, tool hiccup); callers
    /// that run in a loop should skip the cycle rather than stop.
    async fn read_text(&self) -> Result<String>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<()>;
}
