//! # sc-app
//!
//! Use cases for stashclip. Every use case receives its collaborators as
//! `Arc<dyn Port>` and never touches files, processes or the desktop
//! directly.

pub mod usecases;

pub use usecases::{
    CaptureOutcome, ClearHistory, ClipboardCaptureLoop, DaemonLifecycle, DaemonStatus,
    DaemonTimings, LifecycleError, ListHistory, PasteEntry, PasteError, StartOutcome,
};
