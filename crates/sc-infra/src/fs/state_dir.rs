use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Resolve where daemon state (PID file, log) lives.
///
/// Prefers `preferred` (the history data directory). Falls back to the system
/// temp directory when it is absent, cannot be created, or fails an actual
/// write probe.
pub fn resolve_state_dir(preferred: Option<&Path>) -> PathBuf {
    if let Some(dir) = preferred {
        match fs::create_dir_all(dir) {
            Ok(()) if is_dir_writable(dir) => return dir.to_path_buf(),
            Ok(()) => warn!(dir = %dir.display(), "state dir not writable, using temp dir"),
            Err(e) => warn!(dir = %dir.display(), error = %e, "cannot create state dir, using temp dir"),
        }
    }
    std::env::temp_dir()
}

/// Resolve the ignore-marker path: next to the history file, or a fixed name
/// in the temp dir when the data dir is unusable.
pub fn resolve_marker_path(data_dir: Option<&Path>) -> PathBuf {
    match data_dir {
        Some(dir) if fs::create_dir_all(dir).is_ok() => dir.join("ignore.json"),
        _ => std::env::temp_dir().join("stashclip-ignore.json"),
    }
}

/// Probe writability by creating and removing a file, which also catches
/// read-only mounts and ACLs that metadata checks miss.
pub fn is_dir_writable(dir: &Path) -> bool {
    let probe = dir.join(format!(".stashclip-writecheck-{}", std::process::id()));
    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(file) => {
            drop(file);
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
