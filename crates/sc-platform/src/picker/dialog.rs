use async_trait::async_trait;
use chrono::SecondsFormat;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use sc_core::ports::{PickOutcome, PickerError, PickerPort};
use sc_core::ClipboardEntry;

use crate::session::has_command;

pub const POPUP_PROVIDER_ENV: &str = "STASHCLIP_POPUP_PROVIDER";

const TITLE: &str = "Stashclip";
const PROMPT: &str = "Select an entry to copy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogProvider {
    Yad,
    Zenity,
    Kdialog,
}

impl DialogProvider {
    pub const ALL: [DialogProvider; 3] = [Self::Yad, Self::Zenity, Self::Kdialog];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "yad" => Some(Self::Yad),
            "zenity" => Some(Self::Zenity),
            "kdialog" => Some(Self::Kdialog),
            _ => None,
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            Self::Yad => "yad",
            Self::Zenity => "zenity",
            Self::Kdialog => "kdialog",
        }
    }
}

/// Picker that lists entries in a `yad`, `zenity` or `kdialog` window.
#[derive(Debug, Clone, Default)]
pub struct DialogPicker {
    forced: Option<String>,
}

impl DialogPicker {
    /// `STASHCLIP_POPUP_PROVIDER` wins over `configured`; empty means
    /// "first available".
    pub fn from_env(configured: &str) -> Self {
        let forced = std::env::var(POPUP_PROVIDER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| Some(configured.to_string()).filter(|v| !v.trim().is_empty()));
        Self { forced }
    }

    pub fn resolve_provider(&self) -> Option<DialogProvider> {
        resolve_provider(self.forced.as_deref(), has_command)
    }
}

fn resolve_provider(
    forced: Option<&str>,
    has: impl Fn(&str) -> bool,
) -> Option<DialogProvider> {
    match forced {
        Some(name) => DialogProvider::from_name(name).filter(|p| has(p.program())),
        None => DialogProvider::ALL.into_iter().find(|p| has(p.program())),
    }
}

/// Command-line arguments that show `entries` in `provider`'s list dialog.
/// Row ids are 1-based positions.
pub fn dialog_args(provider: DialogProvider, entries: &[ClipboardEntry]) -> Vec<String> {
    let mut args: Vec<String> = match provider {
        DialogProvider::Yad => vec![
            "--list".into(),
            format!("--title={TITLE}"),
            format!("--text={PROMPT}"),
            "--width=980".into(),
            "--height=600".into(),
            "--button=Copy:0".into(),
            "--button=Close:1".into(),
            "--column=ID:NUM".into(),
            "--column=Date:TEXT".into(),
            "--column=Text:TEXT".into(),
            "--print-column=1".into(),
            "--separator=\n".into(),
        ],
        DialogProvider::Zenity => vec![
            "--list".into(),
            format!("--title={TITLE}"),
            format!("--text={PROMPT}"),
            "--width=980".into(),
            "--height=600".into(),
            "--ok-label=Copy".into(),
            "--cancel-label=Close".into(),
            "--column=ID".into(),
            "--column=Date".into(),
            "--column=Text".into(),
            "--hide-column=1".into(),
            "--print-column=1".into(),
        ],
        DialogProvider::Kdialog => vec![
            "--title".into(),
            TITLE.into(),
            "--menu".into(),
            PROMPT.into(),
        ],
    };

    for (i, entry) in entries.iter().enumerate() {
        let id = (i + 1).to_string();
        let at = entry.added_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        match provider {
            DialogProvider::Kdialog => {
                args.push(id);
                args.push(format!("{at}  {}", entry.escaped_text()));
            }
            DialogProvider::Yad | DialogProvider::Zenity => {
                args.push(id);
                args.push(at);
                args.push(entry.escaped_text());
            }
        }
    }
    args
}

/// Parse dialog output into a positive 1-based index.
pub fn parse_selection(output: &str) -> Result<usize, PickerError> {
    let trimmed = output.trim();
    match trimmed.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(PickerError::InvalidSelection(trimmed.to_string())),
    }
}

#[async_trait]
impl PickerPort for DialogPicker {
    async fn pick(&self, entries: &[ClipboardEntry]) -> Result<PickOutcome, PickerError> {
        if entries.is_empty() {
            return Err(PickerError::NoEntries);
        }
        let provider = self.resolve_provider().ok_or(PickerError::NoBackend)?;
        info!(provider = provider.program(), count = entries.len(), "opening popup");

        let output = Command::new(provider.program())
            .args(dialog_args(provider, entries))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| PickerError::Failed(anyhow::Error::new(e).context("failed to run popup")))?;

        if !output.status.success() {
            debug!(status = %output.status, "popup closed without a selection");
            return Ok(PickOutcome::Canceled);
        }
        parse_selection(&String::from_utf8_lossy(&output.stdout)).map(PickOutcome::Selected)
    }
}
