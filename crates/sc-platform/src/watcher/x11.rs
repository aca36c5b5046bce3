use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clipboard_rs::{
    ClipboardHandler, ClipboardWatcher as RSClipboardWatcher, ClipboardWatcherContext,
    WatcherShutdown,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use sc_core::ports::{ChangeFeed, ClipboardChangeSourcePort, FeedCloser};

use super::EVENT_BUFFER;

/// Change source backed by the `clipboard-rs` selection watcher, run on a
/// blocking thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct X11WatcherSource;

struct ChangeSignal {
    event_tx: mpsc::Sender<()>,
}

impl ClipboardHandler for ChangeSignal {
    fn on_clipboard_change(&mut self) {
        let _ = self.event_tx.try_send(());
    }
}

#[async_trait]
impl ClipboardChangeSourcePort for X11WatcherSource {
    async fn subscribe(&self) -> Result<ChangeFeed> {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (err_tx, err_rx) = mpsc::channel(1);

        let mut watcher_ctx = ClipboardWatcherContext::new()
            .map_err(|e| anyhow!("failed to create clipboard watcher: {e}"))?;
        let shutdown = watcher_ctx
            .add_handler(ChangeSignal { event_tx })
            .get_shutdown_channel();

        let stopping = Arc::new(AtomicBool::new(false));
        let stopping_in_thread = stopping.clone();
        let join = tokio::task::spawn_blocking(move || {
            info!("start clipboard watch");
            watcher_ctx.start_watch();
            info!("clipboard watch stopped");
            if !stopping_in_thread.load(Ordering::SeqCst) {
                warn!("clipboard watcher stopped unexpectedly");
                let _ = err_tx.try_send(anyhow!("clipboard watcher stopped unexpectedly"));
            }
        });

        Ok(ChangeFeed::new(
            event_rx,
            err_rx,
            WatcherCloser {
                shutdown,
                stopping,
                join,
            },
        ))
    }
}

struct WatcherCloser {
    shutdown: WatcherShutdown,
    stopping: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

#[async_trait]
impl FeedCloser for WatcherCloser {
    async fn close(self: Box<Self>) -> Result<()> {
        let WatcherCloser {
            shutdown,
            stopping,
            join,
        } = *self;
        stopping.store(true, Ordering::SeqCst);
        shutdown.stop();
        join.await.context("clipboard watcher thread panicked")
    }
}
