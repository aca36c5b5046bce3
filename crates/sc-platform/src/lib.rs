//! # sc-platform
//!
//! OS-facing adapters for stashclip: clipboard command backends, change
//! sources, pickers, process control and directory resolution.

pub mod app_dirs;
pub mod clipboard;
pub mod picker;
pub mod process;
pub mod session;
pub mod watcher;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::{build_clipboard, select_backend, BackendError, ClipboardBackend};
pub use picker::{DialogPicker, TerminalPicker};
pub use process::UnixProcessControl;
pub use session::SessionType;
pub use watcher::build_change_source;
