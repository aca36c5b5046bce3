//! Put a past entry back on the clipboard.
//!
//! The text is marked in the self-echo guard before it is written, so the
//! daemon does not record the write as a new copy.

use std::sync::Arc;
use tracing::{info, info_span, Instrument};

use sc_core::ports::{
    ClipboardHistoryPort, PickOutcome, PickerError, PickerPort, SelfEchoGuardPort,
    SystemClipboardPort,
};
use sc_core::ClipboardEntry;

#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error("no entries available")]
    NoEntries,

    #[error("index out of range: {0}")]
    IndexOutOfRange(i64),

    #[error("invalid index: {0}")]
    InvalidSelection(String),

    #[error("selection canceled")]
    Canceled,

    #[error(transparent)]
    Picker(PickerError),

    #[error("failed to mark pasted content: {0:#}")]
    Guard(anyhow::Error),

    #[error("failed to write clipboard: {0:#}")]
    Clipboard(anyhow::Error),
}

impl From<PickerError> for PasteError {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::NoEntries => PasteError::NoEntries,
            PickerError::InvalidSelection(s) => PasteError::InvalidSelection(s),
            other => PasteError::Picker(other),
        }
    }
}

impl PasteError {
    /// Parse a user-typed 1-based index.
    pub fn parse_index(raw: &str) -> Result<i64, PasteError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| PasteError::InvalidSelection(raw.to_string()))
    }
}

pub struct PasteEntry {
    history: Arc<dyn ClipboardHistoryPort>,
    echo_guard: Arc<dyn SelfEchoGuardPort>,
    clipboard: Arc<dyn SystemClipboardPort>,
}

impl PasteEntry {
    pub fn new(
        history: Arc<dyn ClipboardHistoryPort>,
        echo_guard: Arc<dyn SelfEchoGuardPort>,
        clipboard: Arc<dyn SystemClipboardPort>,
    ) -> Self {
        Self {
            history,
            echo_guard,
            clipboard,
        }
    }

    /// Paste entry `index` (1-based, oldest first); `None` pastes the newest.
    pub async fn execute(&self, index: Option<i64>) -> Result<ClipboardEntry, PasteError> {
        let span = info_span!("usecase.paste_entry.execute", ?index);

        async {
            let entries = self.history.list().await;
            let entry = select(&entries, index)?;
            self.paste(entry).await
        }
        .instrument(span)
        .await
    }

    /// Let `picker` choose the entry, then paste it.
    pub async fn execute_with_picker(
        &self,
        picker: &dyn PickerPort,
    ) -> Result<ClipboardEntry, PasteError> {
        let span = info_span!("usecase.paste_entry.execute_with_picker");

        async {
            let entries = self.history.list().await;
            if entries.is_empty() {
                return Err(PasteError::NoEntries);
            }
            let index = match picker.pick(&entries).await? {
                PickOutcome::Selected(index) => i64::try_from(index).unwrap_or(i64::MAX),
                PickOutcome::Canceled => return Err(PasteError::Canceled),
            };
            let entry = select(&entries, Some(index))?;
            self.paste(entry).await
        }
        .instrument(span)
        .await
    }

    async fn paste(&self, entry: ClipboardEntry) -> Result<ClipboardEntry, PasteError> {
        self.echo_guard
            .mark(&entry.text)
            .await
            .map_err(PasteError::Guard)?;
        if let Err(e) = self.clipboard.write_text(&entry.text).await {
            self.echo_guard.unmark(&entry.text).await;
            return Err(PasteError::Clipboard(e));
        }
        info!(bytes = entry.text.len(), "Entry written to clipboard");
        Ok(entry)
    }
}

fn select(entries: &[ClipboardEntry], index: Option<i64>) -> Result<ClipboardEntry, PasteError> {
    if entries.is_empty() {
        return Err(PasteError::NoEntries);
    }
    let index = index.unwrap_or(entries.len() as i64);
    if index < 1 || index > entries.len() as i64 {
        return Err(PasteError::IndexOutOfRange(index));
    }
    Ok(entries[(index - 1) as usize].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Records guard and clipboard calls in one ordered log.
    #[derive(Default)]
    struct CallLog(Mutex<Vec<String>>);

    impl CallLog {
        fn push(&self, call: String) {
            self.0.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FixedHistory(Vec<ClipboardEntry>);

    #[async_trait]
    impl ClipboardHistoryPort for FixedHistory {
        async fn add(&self, _text: &str) -> bool {
            false
        }

        async fn list(&self) -> Vec<ClipboardEntry> {
            self.0.clone()
        }

        async fn clear(&self) {}
    }

    struct LoggingGuard(Arc<CallLog>);

    #[async_trait]
    impl SelfEchoGuardPort for LoggingGuard {
        async fn mark(&self, text: &str) -> Result<()> {
            self.0.push(format!("mark:{text}"));
            Ok(())
        }

        async fn should_ignore(&self, _text: &str) -> bool {
            false
        }

        async fn unmark(&self, text: &str) {
            self.0.push(format!("unmark:{text}"));
        }
    }

    struct LoggingClipboard {
        log: Arc<CallLog>,
        fail: bool,
    }

    #[async_trait]
    impl SystemClipboardPort for LoggingClipboard {
        async fn read_text(&self) -> Result<String> {
            Ok(String::new())
        }

        async fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("no display");
            }
            self.log.push(format!("write:{text}"));
            Ok(())
        }
    }

    struct FixedPicker(std::result::Result<PickOutcome, &'static str>);

    #[async_trait]
    impl PickerPort for FixedPicker {
        async fn pick(
            &self,
            _entries: &[ClipboardEntry],
        ) -> std::result::Result<PickOutcome, PickerError> {
            self.0.map_err(|s| PickerError::InvalidSelection(s.to_string()))
        }
    }

    fn use_case(texts: &[&str], fail_write: bool) -> (PasteEntry, Arc<CallLog>) {
        let log = Arc::new(CallLog::default());
        let entries = texts
            .iter()
            .map(|t| ClipboardEntry::new(*t, Utc::now()))
            .collect();
        let paste = PasteEntry::new(
            Arc::new(FixedHistory(entries)),
            Arc::new(LoggingGuard(log.clone())),
            Arc::new(LoggingClipboard {
                log: log.clone(),
                fail: fail_write,
            }),
        );
        (paste, log)
    }

    #[tokio::test]
    async fn marks_before_writing() {
        let (paste, log) = use_case(&["one", "two"], false);

        let entry = paste.execute(Some(1)).await.unwrap();

        assert_eq!(entry.text, "one");
        assert_eq!(log.calls(), vec!["mark:one", "write:one"]);
    }

    #[tokio::test]
    async fn default_is_latest_entry() {
        let (paste, log) = use_case(&["one", "two"], false);

        paste.execute(None).await.unwrap();

        assert_eq!(log.calls(), vec!["mark:two", "write:two"]);
    }

    #[tokio::test]
    async fn out_of_range_does_nothing() {
        let (paste, log) = use_case(&["one"], false);

        for index in [0, 2, -1] {
            let err = paste.execute(Some(index)).await.unwrap_err();
            assert!(matches!(err, PasteError::IndexOutOfRange(i) if i == index));
        }
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_history_is_an_error() {
        let (paste, _) = use_case(&[], false);

        assert!(matches!(paste.execute(None).await, Err(PasteError::NoEntries)));
        let picker = FixedPicker(Ok(PickOutcome::Selected(1)));
        assert!(matches!(
            paste.execute_with_picker(&picker).await,
            Err(PasteError::NoEntries)
        ));
    }

    #[tokio::test]
    async fn write_failure_withdraws_the_marker() {
        let (paste, log) = use_case(&["one"], true);

        let err = paste.execute(None).await.unwrap_err();

        assert!(matches!(err, PasteError::Clipboard(_)));
        assert_eq!(log.calls(), vec!["mark:one", "unmark:one"]);
    }

    #[tokio::test]
    async fn picker_selection_is_pasted() {
        let (paste, log) = use_case(&["one", "two", "three"], false);

        let entry = paste
            .execute_with_picker(&FixedPicker(Ok(PickOutcome::Selected(2))))
            .await
            .unwrap();

        assert_eq!(entry.text, "two");
        assert_eq!(log.calls(), vec!["mark:two", "write:two"]);
    }

    #[tokio::test]
    async fn canceled_picker_changes_nothing() {
        let (paste, log) = use_case(&["one"], false);

        let err = paste
            .execute_with_picker(&FixedPicker(Ok(PickOutcome::Canceled)))
            .await
            .unwrap_err();

        assert!(matches!(err, PasteError::Canceled));
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn picker_errors_map_to_paste_errors() {
        let (paste, _) = use_case(&["one"], false);

        let err = paste
            .execute_with_picker(&FixedPicker(Err("abc")))
            .await
            .unwrap_err();
        assert!(matches!(err, PasteError::InvalidSelection(s) if s == "abc"));

        let err = paste
            .execute_with_picker(&FixedPicker(Ok(PickOutcome::Selected(5))))
            .await
            .unwrap_err();
        assert!(matches!(err, PasteError::IndexOutOfRange(5)));
    }

    #[test]
    fn parse_index_rejects_non_numeric() {
        assert_eq!(PasteError::parse_index(" 7 ").unwrap(), 7);
        assert!(matches!(
            PasteError::parse_index("seven"),
            Err(PasteError::InvalidSelection(s)) if s == "seven"
        ));
    }
}
