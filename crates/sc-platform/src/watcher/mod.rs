//! Clipboard change sources.
//!
//! ```text
//! X11      clipboard-rs watcher thread ─┐
//!                                       ├─> ChangeFeed { events, errors }
//! Wayland  wl-paste --watch child ──────┘
//! ```
//!
//! Events are coalesced: the channel holds at most one pending signal, since
//! the capture loop always reads the latest clipboard content anyway.

mod wayland;
mod x11;

use std::sync::Arc;

use sc_core::ports::ClipboardChangeSourcePort;

use crate::clipboard::ClipboardBackend;

pub use wayland::WlPasteWatchSource;
pub use x11::X11WatcherSource;

pub(crate) const EVENT_BUFFER: usize = 1;

pub fn build_change_source(backend: ClipboardBackend) -> Arc<dyn ClipboardChangeSourcePort> {
    match backend {
        ClipboardBackend::Wayland => Arc::new(WlPasteWatchSource::new()),
        ClipboardBackend::X11 => Arc::new(X11WatcherSource),
    }
}
