//! stashclip: clipboard history daemon and CLI.

pub mod bootstrap;
pub mod cli;
pub mod commands;

use clap::CommandFactory;

use bootstrap::logging::{init_tracing_subscriber, LogTarget};
use bootstrap::wiring::AppContext;
use cli::{Cli, Commands, DaemonAction};

/// Dispatch one CLI invocation.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let target = match command {
        Commands::Daemon {
            action: Some(DaemonAction::Run),
        } => LogTarget::Stdout,
        _ => LogTarget::Stderr,
    };
    init_tracing_subscriber(target)?;

    let ctx = AppContext::resolve(cli.config)?;

    match command {
        Commands::Daemon { action } => {
            commands::daemon::run(&ctx, action.unwrap_or(DaemonAction::Start)).await
        }
        Commands::List => commands::history::list(&ctx).await,
        Commands::Pick { index } => commands::history::pick(&ctx, index.as_deref()).await,
        Commands::Menu => commands::history::menu(&ctx).await,
        Commands::Popup => commands::history::popup(&ctx).await,
        Commands::Clear => commands::history::clear(&ctx).await,
    }
}
