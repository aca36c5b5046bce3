use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stashclip")]
#[command(version, about = "Clipboard history daemon", long_about = None)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/stashclip/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Manage the daemon (start/run/stop/status, default start)
    Daemon {
        #[command(subcommand)]
        action: Option<DaemonAction>,
    },
    /// List stored entries
    List,
    /// Paste entry N (1-based); defaults to the latest
    Pick {
        #[arg(allow_negative_numbers = true)]
        index: Option<String>,
    },
    /// Interactive terminal picker
    Menu,
    /// Dialog picker (yad, zenity or kdialog)
    Popup,
    /// Clear stored entries
    Clear,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonAction {
    /// Start the daemon in the background
    Start,
    /// Run the capture loop in the foreground
    Run,
    /// Stop the background daemon
    Stop,
    /// Report whether the daemon is running
    Status,
}
