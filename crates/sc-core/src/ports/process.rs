//! Process control ports used by the daemon lifecycle.

use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// Ask the daemon to shut down (SIGTERM).
    Graceful,
    /// Kill it (SIGKILL).
    Forceful,
}

pub trait ProcessControlPort: Send + Sync {
    /// Spawn the daemon detached from the caller, with stdout and stderr
    /// appended to `log_path`. Returns the child's PID.
    fn spawn_daemon(&self, log_path: &Path) -> Result<u32>;

    /// `true` only if the PID exists and is not a zombie.
    fn is_alive(&self, pid: u32) -> bool;

    fn signal(&self, pid: u32, signal: StopSignal) -> Result<()>;
}

/// Storage for the daemon PID.
pub trait PidFilePort: Send + Sync {
    /// `Ok(None)` when there is no PID file or it is empty.
    /// Unparseable or non-positive content is an error.
    fn read(&self) -> Result<Option<u32>>;

    fn write(&self, pid: u32) -> Result<()>;

    /// Remove the PID file; a missing file is not an error.
    fn remove(&self) -> Result<()>;

    fn path(&self) -> &Path;

    /// Log file kept next to the PID file.
    fn log_path(&self) -> &Path;
}
