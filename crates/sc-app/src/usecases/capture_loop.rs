//! Daemon capture loop
//!
//! ```text
//! WAITING ──(change signal)──> READING ──(dedup decision)──> WAITING
//!    │                                                          │
//!    └──────────── shutdown / source error / source closed ─────┘──> exit
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use sc_core::ports::{
    ChangeFeed, ClipboardChangeSourcePort, ClipboardHistoryPort, SelfEchoGuardPort,
    SystemClipboardPort,
};
use sc_core::ContentHash;

/// What one change signal led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Recorded,
    /// Same text as the newest stored entry.
    Duplicate,
    /// Same content as the previous read; nothing was consulted.
    Unchanged,
    /// Content this program just wrote itself.
    SelfEcho,
    ReadFailed,
}

pub struct ClipboardCaptureLoop {
    clipboard: Arc<dyn SystemClipboardPort>,
    change_source: Arc<dyn ClipboardChangeSourcePort>,
    echo_guard: Arc<dyn SelfEchoGuardPort>,
    history: Arc<dyn ClipboardHistoryPort>,
}

impl ClipboardCaptureLoop {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        change_source: Arc<dyn ClipboardChangeSourcePort>,
        echo_guard: Arc<dyn SelfEchoGuardPort>,
        history: Arc<dyn ClipboardHistoryPort>,
    ) -> Self {
        Self {
            clipboard,
            change_source,
            echo_guard,
            history,
        }
    }

    /// Run until `shutdown` fires, the change source closes, or the change
    /// source reports an error.
    ///
    /// # Returns
    /// - `Ok(())` on shutdown or when the source closes cleanly
    /// - `Err` when subscribing fails or the source reports an error
    ///
    /// The subscription is released before returning in every case.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let span = info_span!("usecase.capture_loop.run");

        async {
            let mut feed = self
                .change_source
                .subscribe()
                .await
                .context("failed to subscribe to clipboard changes")?;
            info!("Capturing clipboard changes");

            let result = self.drive(&mut feed, &shutdown).await;

            if let Err(e) = feed.close().await {
                warn!(error = %format!("{e:#}"), "Failed to release change source");
            }
            info!(ok = result.is_ok(), "Capture loop stopped");
            result
        }
        .instrument(span)
        .await
    }

    async fn drive(&self, feed: &mut ChangeFeed, shutdown: &CancellationToken) -> Result<()> {
        // Hash of the last successful read, kept for the loop lifetime.
        let mut last_hash: Option<ContentHash> = None;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Shutdown requested");
                    return Ok(());
                }

                // A closed error stream yields `None` and disables this branch.
                Some(err) = feed.errors.recv() => {
                    return Err(err.context("clipboard change source failed"));
                }

                event = feed.events.recv() => match event {
                    Some(()) => {
                        let outcome = self.on_change(&mut last_hash).await;
                        debug!(?outcome, "Clipboard change handled");
                    }
                    None => {
                        if let Ok(err) = feed.errors.try_recv() {
                            return Err(err.context("clipboard change source failed"));
                        }
                        info!("Change source closed");
                        return Ok(());
                    }
                },
            }
        }
    }

    async fn on_change(&self, last_hash: &mut Option<ContentHash>) -> CaptureOutcome {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %format!("{e:#}"), "Clipboard read failed, skipping");
                return CaptureOutcome::ReadFailed;
            }
        };

        let hash = ContentHash::of_text(&text);
        if last_hash.as_ref() == Some(&hash) {
            return CaptureOutcome::Unchanged;
        }
        *last_hash = Some(hash);

        if self.echo_guard.should_ignore(&text).await {
            debug!("Skipping self-written clipboard content");
            return CaptureOutcome::SelfEcho;
        }

        if self.history.add(&text).await {
            CaptureOutcome::Recorded
        } else {
            CaptureOutcome::Duplicate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sc_core::ports::FeedCloser;
    use sc_core::ClipboardEntry;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// Clipboard returning scripted reads; `None` is a read failure.
    struct ScriptedClipboard {
        reads: Mutex<VecDeque<Option<String>>>,
    }

    impl ScriptedClipboard {
        fn new(reads: &[Option<&str>]) -> Self {
            Self {
                reads: Mutex::new(reads.iter().map(|r| r.map(String::from)).collect()),
            }
        }
    }

    #[async_trait]
    impl SystemClipboardPort for ScriptedClipboard {
        async fn read_text(&self) -> Result<String> {
            match self.reads.lock().unwrap().pop_front() {
                Some(Some(text)) => Ok(text),
                _ => Err(anyhow::anyhow!("clipboard unavailable")),
            }
        }

        async fn write_text(&self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    struct FlagCloser(Arc<AtomicBool>);

    #[async_trait]
    impl FeedCloser for FlagCloser {
        async fn close(self: Box<Self>) -> Result<()> {
            self.0.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Hands out one pre-built feed.
    struct PreparedSource {
        feed: Mutex<Option<ChangeFeed>>,
        closed: Arc<AtomicBool>,
    }

    struct FeedHandles {
        events: Option<mpsc::Sender<()>>,
        errors: Option<mpsc::Sender<anyhow::Error>>,
    }

    fn prepared_source() -> (PreparedSource, FeedHandles) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (err_tx, err_rx) = mpsc::channel(4);
        let closed = Arc::new(AtomicBool::new(false));
        let feed = ChangeFeed::new(event_rx, err_rx, FlagCloser(closed.clone()));
        (
            PreparedSource {
                feed: Mutex::new(Some(feed)),
                closed,
            },
            FeedHandles {
                events: Some(event_tx),
                errors: Some(err_tx),
            },
        )
    }

    #[async_trait]
    impl ClipboardChangeSourcePort for PreparedSource {
        async fn subscribe(&self) -> Result<ChangeFeed> {
            self.feed
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| anyhow::anyhow!("already subscribed"))
        }
    }

    #[derive(Default)]
    struct OneShotGuard {
        marked: Mutex<Option<String>>,
    }

    #[async_trait]
    impl SelfEchoGuardPort for OneShotGuard {
        async fn mark(&self, text: &str) -> Result<()> {
            *self.marked.lock().unwrap() = Some(text.to_string());
            Ok(())
        }

        async fn should_ignore(&self, text: &str) -> bool {
            let mut marked = self.marked.lock().unwrap();
            if marked.as_deref() == Some(text) {
                *marked = None;
                return true;
            }
            false
        }

        async fn unmark(&self, text: &str) {
            let mut marked = self.marked.lock().unwrap();
            if marked.as_deref() == Some(text) {
                *marked = None;
            }
        }
    }

    #[derive(Default)]
    struct MemoryHistory {
        texts: Mutex<Vec<String>>,
    }

    impl MemoryHistory {
        fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ClipboardHistoryPort for MemoryHistory {
        async fn add(&self, text: &str) -> bool {
            let mut texts = self.texts.lock().unwrap();
            if texts.last().map(String::as_str) == Some(text) {
                return false;
            }
            texts.push(text.to_string());
            true
        }

        async fn list(&self) -> Vec<ClipboardEntry> {
            self.texts
                .lock()
                .unwrap()
                .iter()
                .map(|t| ClipboardEntry::new(t.clone(), chrono::Utc::now()))
                .collect()
        }

        async fn clear(&self) {
            self.texts.lock().unwrap().clear();
        }
    }

    struct Harness {
        capture: ClipboardCaptureLoop,
        history: Arc<MemoryHistory>,
        guard: Arc<OneShotGuard>,
        closed: Arc<AtomicBool>,
        handles: FeedHandles,
    }

    fn harness(reads: &[Option<&str>]) -> Harness {
        let (source, handles) = prepared_source();
        let closed = source.closed.clone();
        let history = Arc::new(MemoryHistory::default());
        let guard = Arc::new(OneShotGuard::default());
        let capture = ClipboardCaptureLoop::new(
            Arc::new(ScriptedClipboard::new(reads)),
            Arc::new(source),
            guard.clone(),
            history.clone(),
        );
        Harness {
            capture,
            history,
            guard,
            closed,
            handles,
        }
    }

    impl Harness {
        async fn signal(&self, n: usize) {
            let events = self.handles.events.as_ref().unwrap();
            for _ in 0..n {
                events.send(()).await.unwrap();
            }
        }

        async fn fail_source(&self, message: &'static str) {
            let errors = self.handles.errors.as_ref().unwrap();
            errors.send(anyhow::anyhow!(message)).await.unwrap();
        }

        /// Queue `n` change signals, close the source and run to completion.
        async fn run_with_events(&mut self, n: usize) -> Result<()> {
            self.signal(n).await;
            self.handles.events = None;
            self.capture.run(CancellationToken::new()).await
        }
    }

    #[tokio::test]
    async fn identical_notifications_record_one_entry() {
        let mut h = harness(&[Some("hello"), Some("hello")]);

        h.run_with_events(2).await.unwrap();

        assert_eq!(h.history.texts(), vec!["hello"]);
    }

    #[tokio::test]
    async fn distinct_values_are_recorded_in_order() {
        let mut h = harness(&[Some("a"), Some("b"), Some("a")]);

        h.run_with_events(3).await.unwrap();

        assert_eq!(h.history.texts(), vec!["a", "b", "a"]);
    }

    #[tokio::test]
    async fn read_failure_skips_the_cycle() {
        let mut h = harness(&[None, Some("after failure")]);

        h.run_with_events(2).await.unwrap();

        assert_eq!(h.history.texts(), vec!["after failure"]);
    }

    #[tokio::test]
    async fn self_written_value_is_not_recorded() {
        let mut h = harness(&[Some("pasted"), Some("typed")]);
        h.guard.mark("pasted").await.unwrap();

        h.run_with_events(2).await.unwrap();

        assert_eq!(h.history.texts(), vec!["typed"]);
        assert!(h.guard.marked.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn repeated_read_after_self_echo_stays_skipped() {
        let mut h = harness(&[Some("pasted"), Some("pasted")]);
        h.guard.mark("pasted").await.unwrap();

        h.run_with_events(2).await.unwrap();

        assert!(h.history.texts().is_empty());
    }

    #[tokio::test]
    async fn closed_source_releases_feed() {
        let mut h = harness(&[]);

        h.run_with_events(0).await.unwrap();

        assert!(h.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn shutdown_exits_cleanly_and_releases_feed() {
        let h = harness(&[Some("never read")]);
        h.signal(1).await;
        let token = CancellationToken::new();
        token.cancel();

        h.capture.run(token).await.unwrap();

        assert!(h.closed.load(Ordering::SeqCst));
        assert!(h.history.texts().is_empty());
    }

    #[tokio::test]
    async fn source_error_is_fatal() {
        let h = harness(&[]);
        h.fail_source("watcher died").await;

        let err = h.capture.run(CancellationToken::new()).await.unwrap_err();

        assert!(format!("{err:#}").contains("watcher died"));
        assert!(h.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn closed_error_stream_is_not_a_failure() {
        let mut h = harness(&[Some("kept")]);
        h.handles.errors = None;

        h.run_with_events(1).await.unwrap();

        assert_eq!(h.history.texts(), vec!["kept"]);
    }

    #[tokio::test]
    async fn error_pending_when_source_closes_is_reported() {
        let mut h = harness(&[]);
        h.fail_source("exit status 1").await;
        h.handles.errors = None;

        let err = h.run_with_events(0).await.unwrap_err();

        assert!(format!("{err:#}").contains("exit status 1"));
    }

    #[tokio::test]
    async fn subscribe_failure_is_returned() {
        let h = harness(&[]);
        let token = CancellationToken::new();
        token.cancel();
        h.capture.run(token).await.unwrap();

        // The prepared feed is consumed; a second run cannot subscribe.
        let err = h.capture.run(CancellationToken::new()).await.unwrap_err();
        assert!(err.to_string().contains("subscribe"));
    }
}
