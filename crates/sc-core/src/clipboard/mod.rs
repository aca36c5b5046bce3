mod entry;
mod hash;
mod history;
mod ignore_marker;

pub use entry::ClipboardEntry;
pub use hash::ContentHash;
pub use history::{ClipboardHistory, HISTORY_CAPACITY};
pub use ignore_marker::{IgnoreMarker, IGNORE_MARKER_TTL};
