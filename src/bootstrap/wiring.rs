//! Adapter construction.
//!
//! Adapters are built per command, so `daemon status` never touches the
//! history file and `list` never needs a clipboard tool.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sc_app::{ClipboardCaptureLoop, DaemonLifecycle, DaemonTimings, PasteEntry, PasteError};
use sc_core::ports::{AppDirsPort, ClipboardHistoryPort};
use sc_core::{AppConfig, AppDirs};
use sc_infra::fs::{resolve_marker_path, resolve_state_dir};
use sc_infra::{FileHistoryStore, FilePidStore, FileSelfEchoGuard};
use sc_platform::{
    build_change_source, build_clipboard, ClipboardBackend, DialogPicker, DirsAppDirsAdapter,
    UnixProcessControl,
};

use super::config::resolve_config;

pub struct AppContext {
    pub config: AppConfig,
    pub dirs: AppDirs,
    /// Explicit `--config` file, forwarded to the background daemon.
    pub config_path: Option<PathBuf>,
}

impl AppContext {
    /// Resolve directories and load the configuration.
    pub fn resolve(explicit_config: Option<PathBuf>) -> Result<Self> {
        let dirs = DirsAppDirsAdapter::new()
            .get_app_dirs()
            .context("cannot resolve application directories")?;
        let config = resolve_config(explicit_config.clone(), &dirs.config_path())?;
        let mut ctx = Self::from_parts(config, dirs);
        // The daemon is detached and must not depend on our working directory.
        ctx.config_path = explicit_config.map(|path| std::fs::canonicalize(&path).unwrap_or(path));
        Ok(ctx)
    }

    pub fn from_parts(config: AppConfig, dirs: AppDirs) -> Self {
        Self {
            config,
            dirs,
            config_path: None,
        }
    }

    pub async fn history(&self) -> Result<Arc<dyn ClipboardHistoryPort>> {
        let store = FileHistoryStore::open(self.dirs.history_path())
            .await
            .context("store error")?;
        Ok(Arc::new(store))
    }

    pub fn echo_guard(&self) -> Arc<FileSelfEchoGuard> {
        Arc::new(FileSelfEchoGuard::new(resolve_marker_path(Some(
            &self.dirs.app_data_root,
        ))))
    }

    pub fn clipboard_backend(&self) -> Result<ClipboardBackend> {
        Ok(ClipboardBackend::detect(&self.config.clipboard_backend)?)
    }

    /// Directory holding `daemon.pid` and `daemon.log`.
    pub fn state_dir(&self) -> PathBuf {
        resolve_state_dir(Some(&self.dirs.app_data_root))
    }

    pub fn lifecycle(&self) -> Result<DaemonLifecycle> {
        let process =
            UnixProcessControl::for_current_exe(daemon_run_args(self.config_path.as_deref()))?;
        Ok(DaemonLifecycle::new(
            Arc::new(process),
            Arc::new(FilePidStore::in_dir(self.state_dir())),
            DaemonTimings::from_config(&self.config),
        ))
    }

    pub async fn capture_loop(&self) -> Result<ClipboardCaptureLoop> {
        let backend = self.clipboard_backend()?;
        let history = self.history().await?;
        Ok(ClipboardCaptureLoop::new(
            build_clipboard(backend),
            build_change_source(backend),
            self.echo_guard(),
            history,
        ))
    }

    /// Fails with [`PasteError::NoEntries`] before any backend detection, so
    /// an empty history is reported even without clipboard tools.
    pub async fn paste_entry(&self) -> Result<PasteEntry> {
        let history = self.history().await?;
        if history.list().await.is_empty() {
            return Err(PasteError::NoEntries.into());
        }
        let clipboard = build_clipboard(self.clipboard_backend()?);
        Ok(PasteEntry::new(history, self.echo_guard(), clipboard))
    }

    pub fn dialog_picker(&self) -> DialogPicker {
        DialogPicker::from_env(&self.config.picker_provider)
    }
}

/// Arguments that start the foreground daemon with the same configuration.
fn daemon_run_args(config_path: Option<&Path>) -> Vec<OsString> {
    let mut args = Vec::new();
    if let Some(path) = config_path {
        args.push(OsString::from("--config"));
        args.push(path.as_os_str().to_owned());
    }
    args.extend(["daemon", "run"].map(OsString::from));
    args
}
