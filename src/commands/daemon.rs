use anyhow::{Context, Result};
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

use sc_app::{DaemonStatus, StartOutcome};

use crate::bootstrap::wiring::AppContext;
use crate::cli::DaemonAction;

pub async fn run(ctx: &AppContext, action: DaemonAction) -> Result<()> {
    let result = match action {
        DaemonAction::Start => start(ctx).await,
        DaemonAction::Run => run_foreground(ctx).await,
        DaemonAction::Stop => stop(ctx).await,
        DaemonAction::Status => status(ctx),
    };
    result.context("daemon error")
}

async fn start(ctx: &AppContext) -> Result<()> {
    match ctx.lifecycle()?.start().await? {
        StartOutcome::Started { pid } => println!("daemon started (pid {pid})"),
        StartOutcome::AlreadyRunning { pid } => println!("daemon already running (pid {pid})"),
    }
    Ok(())
}

async fn stop(ctx: &AppContext) -> Result<()> {
    let pid = ctx.lifecycle()?.stop().await?;
    println!("daemon stopped (pid {pid})");
    Ok(())
}

fn status(ctx: &AppContext) -> Result<()> {
    match ctx.lifecycle()?.status()? {
        DaemonStatus::Running { pid } => println!("daemon running (pid {pid})"),
        DaemonStatus::NotRunning => println!("daemon not running"),
    }
    Ok(())
}

/// Run the capture loop until SIGINT or SIGTERM.
async fn run_foreground(ctx: &AppContext) -> Result<()> {
    let capture = ctx.capture_loop().await?;
    let shutdown = CancellationToken::new();

    let mut sigint = signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut sigterm = signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    let signal_token = shutdown.clone();
    let signals = tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => info!("SIGINT received"),
            _ = sigterm.recv() => info!("SIGTERM received"),
        }
        signal_token.cancel();
    });

    info!(pid = std::process::id(), "Daemon running");
    let result = capture.run(shutdown).await;
    signals.abort();
    result
}
