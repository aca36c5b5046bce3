use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

use sc_core::ports::{PickOutcome, PickerError, PickerPort};
use sc_core::ClipboardEntry;

/// Numbered menu on a terminal. An empty answer (or EOF) picks the latest
/// entry.
pub struct TerminalPicker<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalPicker<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> TerminalPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }

    pub fn into_parts(self) -> (R, W) {
        self.io.into_inner()
    }
}

fn io_failure(e: std::io::Error) -> PickerError {
    PickerError::Failed(anyhow::Error::new(e).context("terminal menu I/O failed"))
}

#[async_trait]
impl<R, W> PickerPort for TerminalPicker<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn pick(&self, entries: &[ClipboardEntry]) -> Result<PickOutcome, PickerError> {
        if entries.is_empty() {
            return Err(PickerError::NoEntries);
        }

        let mut guard = self.io.lock().await;
        let (input, output) = &mut *guard;

        let mut menu = String::new();
        for (i, entry) in entries.iter().enumerate() {
            menu.push_str(&entry.list_line(i + 1));
            menu.push('\n');
        }
        menu.push_str(&format!(
            "Choose an entry [1-{}] (Enter for latest): ",
            entries.len()
        ));
        output.write_all(menu.as_bytes()).await.map_err(io_failure)?;
        output.flush().await.map_err(io_failure)?;

        let mut line = String::new();
        input.read_line(&mut line).await.map_err(io_failure)?;

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(PickOutcome::Selected(entries.len()));
        }
        answer
            .parse::<usize>()
            .map(PickOutcome::Selected)
            .map_err(|_| PickerError::InvalidSelection(answer.to_string()))
    }
}
