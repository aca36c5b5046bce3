use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use sc_core::ports::PidFilePort;

const PID_FILE_NAME: &str = "daemon.pid";
const LOG_FILE_NAME: &str = "daemon.log";

/// Daemon state files: `daemon.pid` (decimal PID) and `daemon.log`, side by
/// side in the resolved state directory.
#[derive(Debug, Clone)]
pub struct FilePidStore {
    pid_path: PathBuf,
    log_path: PathBuf,
}

impl FilePidStore {
    pub fn in_dir(state_dir: impl AsRef<Path>) -> Self {
        let dir = state_dir.as_ref();
        Self {
            pid_path: dir.join(PID_FILE_NAME),
            log_path: dir.join(LOG_FILE_NAME),
        }
    }
}

impl PidFilePort for FilePidStore {
    fn read(&self) -> Result<Option<u32>> {
        let content = match fs::read_to_string(&self.pid_path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read pid file failed: {}", self.pid_path.display()))
            }
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<u32>() {
            Ok(pid) if pid > 0 && pid <= i32::MAX as u32 => Ok(Some(pid)),
            _ => bail!("invalid pid file: {}", self.pid_path.display()),
        }
    }

    fn write(&self, pid: u32) -> Result<()> {
        if let Some(dir) = self.pid_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create state dir failed: {}", dir.display()))?;
        }
        fs::write(&self.pid_path, pid.to_string())
            .with_context(|| format!("write pid file failed: {}", self.pid_path.display()))
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.pid_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("remove pid file failed: {}", self.pid_path.display())),
        }
    }

    fn path(&self) -> &Path {
        &self.pid_path
    }

    fn log_path(&self) -> &Path {
        &self.log_path
    }
}
