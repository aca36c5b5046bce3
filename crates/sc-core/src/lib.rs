//! # sc-core
//!
//! Core domain models and ports for stashclip.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.
//! File formats, processes and desktop sessions live behind the traits in [`ports`].

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod ports;

// Re-export commonly used types at the crate root
pub use app_dirs::AppDirs;
pub use clipboard::{
    ClipboardEntry, ClipboardHistory, ContentHash, IgnoreMarker, HISTORY_CAPACITY,
    IGNORE_MARKER_TTL,
};
pub use config::AppConfig;
