use std::sync::Arc;
use thiserror::Error;

use sc_core::ports::SystemClipboardPort;

use super::{WaylandClipboard, XclipClipboard};
use crate::session::{has_command, SessionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    Wayland,
    X11,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("wayland detected, but wl-copy/wl-paste not found")]
    MissingWaylandTools,

    #[error("x11 detected, but xclip not found")]
    MissingXclip,

    #[error("no clipboard backend found (need wl-copy/wl-paste or xclip)")]
    NoBackend,

    #[error("unknown clipboard backend in config: {0:?} (expected auto, wayland or x11)")]
    UnknownPreference(String),
}

impl ClipboardBackend {
    /// Pick a backend for the current session and `PATH`.
    pub fn detect(preference: &str) -> Result<Self, BackendError> {
        select_backend(preference, SessionType::detect(), has_command)
    }
}

/// Resolve the backend from a config preference, the session type and a tool
/// lookup.
///
/// An explicit preference replaces session detection but still requires the
/// tools. With no session information Wayland tools are preferred, then xclip.
pub fn select_backend(
    preference: &str,
    session: SessionType,
    has: impl Fn(&str) -> bool,
) -> Result<ClipboardBackend, BackendError> {
    let session = match preference.trim().to_ascii_lowercase().as_str() {
        "" | "auto" => session,
        "wayland" => SessionType::Wayland,
        "x11" => SessionType::X11,
        other => return Err(BackendError::UnknownPreference(other.to_string())),
    };

    let wayland_tools = || has("wl-copy") && has("wl-paste");
    match session {
        SessionType::Wayland if wayland_tools() => Ok(ClipboardBackend::Wayland),
        SessionType::Wayland => Err(BackendError::MissingWaylandTools),
        SessionType::X11 if has("xclip") => Ok(ClipboardBackend::X11),
        SessionType::X11 => Err(BackendError::MissingXclip),
        SessionType::Unknown if wayland_tools() => Ok(ClipboardBackend::Wayland),
        SessionType::Unknown if has("xclip") => Ok(ClipboardBackend::X11),
        SessionType::Unknown => Err(BackendError::NoBackend),
    }
}

pub fn build_clipboard(backend: ClipboardBackend) -> Arc<dyn SystemClipboardPort> {
    match backend {
        ClipboardBackend::Wayland => Arc::new(WaylandClipboard),
        ClipboardBackend::X11 => Arc::new(XclipClipboard),
    }
}
