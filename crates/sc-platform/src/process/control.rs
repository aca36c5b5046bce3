use anyhow::{Context, Result};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

use sc_core::ports::{ProcessControlPort, StopSignal};

use super::probe::is_process_alive;

/// Spawns the daemon as a detached session leader and signals it by PID.
#[derive(Debug, Clone)]
pub struct UnixProcessControl {
    program: OsString,
    args: Vec<OsString>,
}

impl UnixProcessControl {
    /// Re-executes the running binary with `args`.
    pub fn for_current_exe<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let exe = std::env::current_exe().context("cannot resolve current executable")?;
        Ok(Self::new(exe, args))
    }

    pub fn new<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl ProcessControlPort for UnixProcessControl {
    fn spawn_daemon(&self, log_path: &Path) -> Result<u32> {
        if let Some(dir) = log_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log dir failed: {}", dir.display()))?;
        }
        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("open daemon log failed: {}", log_path.display()))?;
        let log_err = log.try_clone().context("duplicate daemon log handle failed")?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(log)
            .stderr(log_err);
        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()
                    .map(|_| ())
                    .map_err(std::io::Error::from)
            });
        }

        let child = command
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.program.to_string_lossy()))?;
        let pid = child.id();
        info!(pid, log = %log_path.display(), "daemon process spawned");
        Ok(pid)
    }

    fn is_alive(&self, pid: u32) -> bool {
        is_process_alive(pid)
    }

    fn signal(&self, pid: u32, signal: StopSignal) -> Result<()> {
        let raw = i32::try_from(pid).with_context(|| format!("pid out of range: {pid}"))?;
        let sig = match signal {
            StopSignal::Graceful => Signal::SIGTERM,
            StopSignal::Forceful => Signal::SIGKILL,
        };
        debug!(pid, signal = sig.as_str(), "signalling daemon");
        kill(Pid::from_raw(raw), sig)
            .with_context(|| format!("failed to send {} to {pid}", sig.as_str()))
    }
}
