use async_trait::async_trait;

use crate::clipboard::ClipboardEntry;
use crate::ports::errors::PickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// 1-based position in the list handed to the picker.
    Selected(usize),
    Canceled,
}

/// Interactive selection of one history entry.
#[async_trait]
pub trait PickerPort: Send + Sync {
    async fn pick(&self, entries: &[ClipboardEntry]) -> Result<PickOutcome, PickerError>;
}
