use anyhow::Result;
use async_trait::async_trait;

use sc_core::ports::SystemClipboardPort;

use super::command::{read_stdout, write_stdin};

/// Clipboard access through `xclip` on the CLIPBOARD selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct XclipClipboard;

#[async_trait]
impl SystemClipboardPort for XclipClipboard {
    async fn read_text(&self) -> Result<String> {
        read_stdout("xclip", &["-selection", "clipboard", "-o"]).await
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        write_stdin("xclip", &["-selection", "clipboard", "-i"], text).await
    }
}
