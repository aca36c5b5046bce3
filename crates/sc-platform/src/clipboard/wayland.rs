use anyhow::Result;
use async_trait::async_trait;

use sc_core::ports::SystemClipboardPort;

use super::command::{read_stdout, write_stdin};

/// Clipboard access through `wl-paste` / `wl-copy`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaylandClipboard;

#[async_trait]
impl SystemClipboardPort for WaylandClipboard {
    async fn read_text(&self) -> Result<String> {
        read_stdout("wl-paste", &["--no-newline"]).await
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        write_stdin("wl-copy", &[], text).await
    }
}
