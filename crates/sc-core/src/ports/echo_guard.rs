use anyhow::Result;
use async_trait::async_trait;

/// Self-echo guard port.
///
/// Pick and capture run in different processes, so implementations must keep
/// the marker somewhere both can see.
///
/// # Semantics
///
/// - `mark` overwrites any previous marker
/// - `should_ignore` consumes a matching, unexpired marker and returns `true`
/// - a marker for other content is left untouched
/// - an expired or unreadable marker is removed and never matches
/// - `unmark` withdraws the marker for `text` only; a newer marker survives
#[async_trait]
pub trait SelfEchoGuardPort: Send + Sync {
    /// Remember that `text` is about to be written by stashclip.
    ///
    /// **Must be called before writing to the clipboard**, otherwise the
    /// capture loop may observe the write first.
    async fn mark(&self, text: &str) -> Result<()>;

    async fn should_ignore(&self, text: &str) -> bool;

    /// Withdraw a marker set by [`mark`](Self::mark) whose write never happened.
    async fn unmark(&self, text: &str);
}
