//! Business logic use cases
//!
//! ```text
//! [change source] ──> ClipboardCaptureLoop ──> history
//!                                                 │
//!                     ListHistory / ClearHistory <┤
//!                                                 │
//! [picker / index] ──> PasteEntry ──> echo guard, clipboard
//!
//! DaemonLifecycle: start / stop / status of the process hosting the loop
//! ```

pub mod capture_loop;
pub mod clear_history;
pub mod daemon_lifecycle;
pub mod list_history;
pub mod paste_entry;

pub use capture_loop::{CaptureOutcome, ClipboardCaptureLoop};
pub use clear_history::ClearHistory;
pub use daemon_lifecycle::{DaemonLifecycle, DaemonStatus, DaemonTimings, LifecycleError, StartOutcome};
pub use list_history::ListHistory;
pub use paste_entry::{PasteEntry, PasteError};
