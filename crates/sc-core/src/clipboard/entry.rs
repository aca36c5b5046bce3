use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One recorded clipboard text snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub text: String,
    pub added_at: DateTime<Utc>,
}

impl ClipboardEntry {
    pub fn new(text: impl Into<String>, added_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            added_at,
        }
    }

    /// Single-line rendering of the text, with newlines and tabs escaped.
    pub fn escaped_text(&self) -> String {
        self.text.replace('\n', "\\n").replace('\t', "\\t")
    }

    /// `index<TAB>added_at<TAB>text`, the line format shared by `list` and `menu`.
    pub fn list_line(&self, index: usize) -> String {
        format!(
            "{index}\t{}\t{}",
            self.added_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.escaped_text()
        )
    }
}
