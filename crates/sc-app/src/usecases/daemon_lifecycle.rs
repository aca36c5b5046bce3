//! Start / stop / status of the background capture daemon.
//!
//! The daemon is a singleton tracked by a PID file. A PID counts as running
//! only while the process exists and is not a zombie; a PID reused by an
//! unrelated process after a full reap is not detected.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, info_span, warn, Instrument};

use sc_core::ports::{PidFilePort, ProcessControlPort, StopSignal};
use sc_core::AppConfig;

const DEFAULT_START_GRACE: Duration = Duration::from_millis(700);
const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_KILL_TIMEOUT: Duration = Duration::from_secs(1);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonTimings {
    /// Wait after spawning before checking the child stayed up.
    pub start_grace: Duration,
    /// Budget after SIGTERM.
    pub stop_timeout: Duration,
    /// Budget after SIGKILL.
    pub kill_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for DaemonTimings {
    fn default() -> Self {
        Self {
            start_grace: DEFAULT_START_GRACE,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            kill_timeout: DEFAULT_KILL_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DaemonTimings {
    /// Defaults overridden by whatever `[daemon]` keys the config sets.
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = Self::default();
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };
        Self {
            start_grace: ms(config.start_grace_ms, defaults.start_grace),
            stop_timeout: ms(config.stop_timeout_ms, defaults.stop_timeout),
            kill_timeout: ms(config.kill_timeout_ms, defaults.kill_timeout),
            poll_interval: ms(config.poll_interval_ms, defaults.poll_interval)
                .max(Duration::from_millis(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonStatus {
    Running { pid: u32 },
    NotRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { pid: u32 },
    AlreadyRunning { pid: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("not running")]
    NotRunning,

    #[error("failed to stay running (check {})", .log_path.display())]
    FailedToStayRunning { log_path: PathBuf },

    #[error("daemon (pid {pid}) did not exit after SIGKILL")]
    StopTimeout { pid: u32 },

    #[error("{0:#}")]
    PidFile(anyhow::Error),

    #[error("failed to spawn daemon: {0:#}")]
    Spawn(anyhow::Error),

    #[error("failed to signal daemon: {0:#}")]
    Signal(anyhow::Error),
}

pub struct DaemonLifecycle {
    process: Arc<dyn ProcessControlPort>,
    pid_file: Arc<dyn PidFilePort>,
    timings: DaemonTimings,
}

impl DaemonLifecycle {
    pub fn new(
        process: Arc<dyn ProcessControlPort>,
        pid_file: Arc<dyn PidFilePort>,
        timings: DaemonTimings,
    ) -> Self {
        Self {
            process,
            pid_file,
            timings,
        }
    }

    /// # Errors
    /// A PID file with unparseable or non-positive content.
    pub fn status(&self) -> Result<DaemonStatus, LifecycleError> {
        match self.pid_file.read().map_err(LifecycleError::PidFile)? {
            Some(pid) if self.process.is_alive(pid) => Ok(DaemonStatus::Running { pid }),
            _ => Ok(DaemonStatus::NotRunning),
        }
    }

    pub async fn start(&self) -> Result<StartOutcome, LifecycleError> {
        let span = info_span!("usecase.daemon_lifecycle.start");

        async {
            if let DaemonStatus::Running { pid } = self.status()? {
                info!(pid, "Daemon already running");
                return Ok(StartOutcome::AlreadyRunning { pid });
            }
            self.pid_file.remove().map_err(LifecycleError::PidFile)?;

            let log_path = self.pid_file.log_path().to_path_buf();
            let pid = self
                .process
                .spawn_daemon(&log_path)
                .map_err(LifecycleError::Spawn)?;

            if let Err(e) = self.pid_file.write(pid) {
                // Untracked daemons could never be stopped.
                let _ = self.process.signal(pid, StopSignal::Forceful);
                return Err(LifecycleError::PidFile(e));
            }

            tokio::time::sleep(self.timings.start_grace).await;

            if !self.process.is_alive(pid) {
                warn!(pid, log = %log_path.display(), "Daemon exited during startup");
                self.remove_pid_file();
                return Err(LifecycleError::FailedToStayRunning { log_path });
            }

            info!(pid, "Daemon started");
            Ok(StartOutcome::Started { pid })
        }
        .instrument(span)
        .await
    }

    /// Stop the daemon, escalating from SIGTERM to SIGKILL. Returns the PID
    /// that was stopped.
    pub async fn stop(&self) -> Result<u32, LifecycleError> {
        let span = info_span!("usecase.daemon_lifecycle.stop");

        async {
            let pid = match self.status()? {
                DaemonStatus::Running { pid } => pid,
                DaemonStatus::NotRunning => {
                    self.remove_pid_file();
                    return Err(LifecycleError::NotRunning);
                }
            };

            if self.terminate(pid, StopSignal::Graceful, self.timings.stop_timeout).await? {
                self.remove_pid_file();
                info!(pid, "Daemon stopped");
                return Ok(pid);
            }

            warn!(pid, "Daemon ignored SIGTERM, sending SIGKILL");
            if self.terminate(pid, StopSignal::Forceful, self.timings.kill_timeout).await? {
                self.remove_pid_file();
                info!(pid, "Daemon killed");
                return Ok(pid);
            }

            Err(LifecycleError::StopTimeout { pid })
        }
        .instrument(span)
        .await
    }

    /// Send `signal` and wait up to `budget` for the process to go away.
    async fn terminate(
        &self,
        pid: u32,
        signal: StopSignal,
        budget: Duration,
    ) -> Result<bool, LifecycleError> {
        if let Err(e) = self.process.signal(pid, signal) {
            // It may have exited between the probe and the signal.
            if !self.process.is_alive(pid) {
                return Ok(true);
            }
            return Err(LifecycleError::Signal(e));
        }
        Ok(self.wait_for_exit(pid, budget).await)
    }

    async fn wait_for_exit(&self, pid: u32, budget: Duration) -> bool {
        let deadline = Instant::now() + budget;
        loop {
            if !self.process.is_alive(pid) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            tokio::time::sleep(self.timings.poll_interval.min(deadline - now)).await;
        }
    }

    fn remove_pid_file(&self) {
        if let Err(e) = self.pid_file.remove() {
            warn!(error = %format!("{e:#}"), "Failed to remove pid file");
        }
    }
}
