use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data directory is unavailable")]
    DataDirUnavailable,

    #[error("system config directory is unavailable")]
    ConfigDirUnavailable,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("read history failed: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file is corrupt: {path}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("no entries available")]
    NoEntries,

    #[error("no supported popup backend found (install one of: yad, zenity, kdialog)")]
    NoBackend,

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("picker failed: {0}")]
    Failed(#[from] anyhow::Error),
}
