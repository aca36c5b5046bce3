//! Desktop session detection and tool lookup.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    Wayland,
    X11,
    Unknown,
}

impl SessionType {
    /// Detect the current session from the environment.
    pub fn detect() -> Self {
        Self::from_env_values(
            std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
            std::env::var_os("WAYLAND_DISPLAY").as_deref(),
            std::env::var_os("DISPLAY").as_deref(),
        )
    }

    /// `XDG_SESSION_TYPE` wins when it names a known session; otherwise a
    /// non-empty `WAYLAND_DISPLAY`, then `DISPLAY`.
    pub fn from_env_values(
        xdg_session_type: Option<&str>,
        wayland_display: Option<&OsStr>,
        display: Option<&OsStr>,
    ) -> Self {
        match xdg_session_type.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("wayland") => return Self::Wayland,
            Some("x11") => return Self::X11,
            _ => {}
        }
        if wayland_display.is_some_and(|v| !v.is_empty()) {
            return Self::Wayland;
        }
        if display.is_some_and(|v| !v.is_empty()) {
            return Self::X11;
        }
        Self::Unknown
    }
}

/// `true` when `name` resolves to an executable on `PATH`.
pub fn has_command(name: &str) -> bool {
    find_command(name, std::env::var_os("PATH").as_deref()).is_some()
}

pub fn find_command(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let path = Path::new(name);
        return is_executable(path).then(|| path.to_path_buf());
    }
    std::env::split_paths(path_var?)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
