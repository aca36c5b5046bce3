use std::sync::Arc;
use tracing::{info, info_span, Instrument};

use sc_core::ports::ClipboardHistoryPort;

/// Use case for dropping every recorded entry.
pub struct ClearHistory {
    history: Arc<dyn ClipboardHistoryPort>,
}

impl ClearHistory {
    pub fn new(history: Arc<dyn ClipboardHistoryPort>) -> Self {
        Self { history }
    }

    pub async fn execute(&self) {
        let span = info_span!("usecase.clear_history.execute");

        async {
            self.history.clear().await;
            info!("History cleared");
        }
        .instrument(span)
        .await
    }
}
