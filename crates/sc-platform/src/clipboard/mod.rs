//! Command-line clipboard backends.
//!
//! Both backends shell out to the session's clipboard tools. Writes go through
//! a tool that keeps serving the selection after `stashclip` exits, which an
//! in-process X11 owner could not do.

mod command;
mod factory;
mod wayland;
mod x11;

pub use factory::{build_clipboard, select_backend, BackendError, ClipboardBackend};
pub use wayland::WaylandClipboard;
pub use x11::XclipClipboard;
