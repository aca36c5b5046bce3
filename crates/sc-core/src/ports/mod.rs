//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. Concrete adapters are constructed once
//! at the binary boundary and injected as `Arc<dyn Port>`, so use cases never
//! branch on platform.
//!
//! ## Port Placement Guidelines
//!
//! A trait belongs here when it represents a capability used by use cases and
//! implemented by `sc-infra` or `sc-platform`.

pub mod app_dirs;
pub mod change_source;
pub mod clipboard;
mod clock;
pub mod echo_guard;
pub mod errors;
pub mod history;
pub mod picker;
pub mod process;

pub use app_dirs::AppDirsPort;
pub use change_source::{ChangeFeed, ClipboardChangeSourcePort, FeedCloser};
pub use clipboard::SystemClipboardPort;
pub use clock::*;
pub use echo_guard::SelfEchoGuardPort;
pub use errors::{AppDirsError, HistoryError, PickerError};
pub use history::ClipboardHistoryPort;
pub use picker::{PickOutcome, PickerPort};
pub use process::{PidFilePort, ProcessControlPort, StopSignal};
