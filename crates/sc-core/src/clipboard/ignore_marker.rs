use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ContentHash;

/// How long a paste-back marker stays valid.
pub const IGNORE_MARKER_TTL: Duration = Duration::from_secs(10);

/// Marks one upcoming clipboard change as written by stashclip itself.
///
/// The capture loop consumes it at most once; it is never part of history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreMarker {
    pub hash: ContentHash,
    pub expires_at: DateTime<Utc>,
}

impl IgnoreMarker {
    pub fn for_text(text: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(now);
        Self {
            hash: ContentHash::of_text(text),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn matches(&self, text: &str) -> bool {
        self.hash == ContentHash::of_text(text)
    }
}
