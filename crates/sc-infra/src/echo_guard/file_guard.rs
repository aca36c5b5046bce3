use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use sc_core::ports::{ClockPort, SelfEchoGuardPort};
use sc_core::{IgnoreMarker, IGNORE_MARKER_TTL};

use crate::fs::atomic_write;
use crate::time::SystemClock;

/// Self-echo guard backed by a single small JSON file.
///
/// The pick flow and the daemon are separate processes, so the marker lives
/// on disk (`{"hash": "...", "expires_at": "..."}`) rather than in memory.
/// Expiry is lazy: it is only checked when the marker is read.
pub struct FileSelfEchoGuard {
    path: PathBuf,
    ttl: Duration,
    clock: Arc<dyn ClockPort>,
    lock: Mutex<()>,
}

impl FileSelfEchoGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock), IGNORE_MARKER_TTL)
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn ClockPort>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove ignore marker");
            }
        }
    }
}

#[async_trait]
impl SelfEchoGuardPort for FileSelfEchoGuard {
    async fn mark(&self, text: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let marker = IgnoreMarker::for_text(text, self.clock.now(), self.ttl);
        let content = serde_json::to_vec(&marker).context("serialize ignore marker failed")?;

        atomic_write(&self.path, &content).await?;
        debug!(hash = ?marker.hash, expires_at = %marker.expires_at, "ignore marker set");
        Ok(())
    }

    async fn should_ignore(&self, text: &str) -> bool {
        let _guard = self.lock.lock().await;
        let content = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let marker: IgnoreMarker = match serde_json::from_slice(&content) {
            Ok(marker) => marker,
            Err(e) => {
                // Advisory state: a broken marker is the same as no marker.
                warn!(error = %e, "discarding unreadable ignore marker");
                self.discard().await;
                return false;
            }
        };

        if marker.is_expired(self.clock.now()) {
            debug!(hash = ?marker.hash, "ignore marker expired");
            self.discard().await;
            return false;
        }

        if !marker.matches(text) {
            return false;
        }

        self.discard().await;
        true
    }

    async fn unmark(&self, text: &str) {
        let _guard = self.lock.lock().await;
        let Ok(content) = fs::read(&self.path).await else {
            return;
        };
        match serde_json::from_slice::<IgnoreMarker>(&content) {
            Ok(marker) if !marker.matches(text) => {}
            _ => {
                debug!("ignore marker withdrawn");
                self.discard().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex as StdMutex;
    use tempfile::TempDir;

    struct ManualClock(StdMutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(StdMutex::new(Utc::now())))
        }

        fn advance(&self, by: chrono::Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl ClockPort for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn guard_in(dir: &TempDir, clock: Arc<ManualClock>) -> FileSelfEchoGuard {
        FileSelfEchoGuard::with_clock(dir.path().join("ignore.json"), clock, IGNORE_MARKER_TTL)
    }

    #[tokio::test]
    async fn marked_text_is_ignored_exactly_once() {
        let dir = TempDir::new().unwrap();
        let guard = guard_in(&dir, ManualClock::new());

        guard.mark("pasted").await.unwrap();

        assert!(guard.should_ignore("pasted").await);
        assert!(!guard.should_ignore("pasted").await);
        assert!(!guard.path().exists());
    }

    #[tokio::test]
    async fn expired_marker_is_not_honoured() {
        let dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let guard = guard_in(&dir, clock.clone());

        guard.mark("pasted").await.unwrap();
        clock.advance(chrono::Duration::seconds(11));

        assert!(!guard.should_ignore("pasted").await);
        assert!(!guard.path().exists(), "expired marker should be removed");
    }

    #[tokio::test]
    async fn other_text_leaves_marker_in_place() {
        let dir = TempDir::new().unwrap();
        let guard = guard_in(&dir, ManualClock::new());

        guard.mark("x").await.unwrap();

        assert!(!guard.should_ignore("y").await);
        assert!(guard.should_ignore("x").await);
    }

    #[tokio::test]
    async fn new_mark_overwrites_previous() {
        let dir = TempDir::new().unwrap();
        let guard = guard_in(&dir, ManualClock::new());

        guard.mark("first").await.unwrap();
        guard.mark("second").await.unwrap();

        assert!(!guard.should_ignore("first").await);
        assert!(guard.should_ignore("second").await);
    }

    #[tokio::test]
    async fn no_marker_means_no_ignore() {
        let dir = TempDir::new().unwrap();
        let guard = guard_in(&dir, ManualClock::new());

        assert!(!guard.should_ignore("anything").await);
    }

    #[tokio::test]
    async fn corrupt_marker_is_discarded() {
        let dir = TempDir::new().unwrap();
        let guard = guard_in(&dir, ManualClock::new());
        std::fs::write(guard.path(), b"garbage").unwrap();

        assert!(!guard.should_ignore("garbage").await);
        assert!(!guard.path().exists());
    }

    #[tokio::test]
    async fn unmark_withdraws_only_its_own_marker() {
        let dir = TempDir::new().unwrap();
        let guard = guard_in(&dir, ManualClock::new());

        guard.mark("failed paste").await.unwrap();
        guard.unmark("failed paste").await;
        assert!(!guard.path().exists());
        assert!(!guard.should_ignore("failed paste").await);

        guard.mark("newer paste").await.unwrap();
        guard.unmark("failed paste").await;
        assert!(guard.should_ignore("newer paste").await);
    }

    #[tokio::test]
    async fn marker_is_shared_between_instances() {
        let dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let picker_side = guard_in(&dir, clock.clone());
        let daemon_side = guard_in(&dir, clock);

        picker_side.mark("shared").await.unwrap();

        assert!(daemon_side.should_ignore("shared").await);
        assert!(!picker_side.should_ignore("shared").await);
    }
}
