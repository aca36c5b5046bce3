use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sc_core::ports::{ChangeFeed, ClipboardChangeSourcePort, FeedCloser};

use super::EVENT_BUFFER;

/// Change source backed by a long-running `wl-paste --watch` child that
/// prints one line per clipboard change.
#[derive(Debug, Clone)]
pub struct WlPasteWatchSource {
    program: String,
    args: Vec<String>,
}

impl WlPasteWatchSource {
    pub fn new() -> Self {
        Self::with_command(
            "wl-paste",
            ["--watch", "sh", "-c", "printf '\\n'"].map(String::from),
        )
    }

    /// Any command that prints one line per change.
    pub fn with_command(
        program: impl Into<String>,
        args: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl Default for WlPasteWatchSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardChangeSourcePort for WlPasteWatchSource {
    async fn subscribe(&self) -> Result<ChangeFeed> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start {}", self.program))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("{} stdout not captured", self.program))?;

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (err_tx, err_rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(pump_lines(
            self.program.clone(),
            child,
            stdout,
            event_tx,
            err_tx,
            cancel.clone(),
        ));

        Ok(ChangeFeed::new(event_rx, err_rx, WatchChildCloser { cancel, task }))
    }
}

async fn pump_lines(
    program: String,
    mut child: Child,
    stdout: ChildStdout,
    event_tx: mpsc::Sender<()>,
    err_tx: mpsc::Sender<anyhow::Error>,
    cancel: CancellationToken,
) {
    let mut lines = BufReader::new(stdout).lines();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "watch child already gone");
                }
                return;
            }
            line = lines.next_line() => match line {
                // Full buffer means a signal is already pending.
                Ok(Some(_)) => { let _ = event_tx.try_send(()); }
                Ok(None) => break,
                Err(e) => {
                    let _ = err_tx.try_send(anyhow!(e).context(format!("reading {program} output failed")));
                    let _ = child.kill().await;
                    return;
                }
            }
        }
    }

    // The error goes out before `event_tx` drops so the consumer sees it.
    match child.wait().await {
        Ok(status) if status.success() => debug!(%program, "watch child exited"),
        Ok(status) => {
            warn!(%program, %status, "watch child exited");
            let _ = err_tx.try_send(anyhow!("{program} exited with {status}"));
        }
        Err(e) => {
            let _ = err_tx.try_send(anyhow!(e).context(format!("waiting for {program} failed")));
        }
    }
}

struct WatchChildCloser {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

#[async_trait]
impl FeedCloser for WatchChildCloser {
    async fn close(self: Box<Self>) -> Result<()> {
        self.cancel.cancel();
        self.task.await.context("watch task panicked")
    }
}
