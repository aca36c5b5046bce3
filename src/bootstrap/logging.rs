//! Tracing configuration for stashclip
//!
//! - `daemon run` logs to stdout, which `daemon start` redirects into
//!   `daemon.log`
//! - every other command logs to stderr so stdout stays clean for output
//! - `RUST_LOG` overrides the default directives

use std::io;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Foreground daemon.
    Stdout,
    /// Interactive commands.
    Stderr,
}

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives.
///
/// The daemon logs at `info`, with `debug` for the workspace crates in
/// development builds. Interactive commands only report warnings.
pub fn build_filter_directives(is_dev: bool, target: LogTarget) -> Vec<String> {
    let base = match target {
        LogTarget::Stdout => "info",
        LogTarget::Stderr => "warn",
    };
    let mut directives = vec![base.to_string()];
    if is_dev && target == LogTarget::Stdout {
        directives.extend(
            ["sc_app", "sc_infra", "sc_platform", "stashclip_lib"]
                .iter()
                .map(|krate| format!("{krate}=debug")),
        );
    }
    directives
}

/// Register the global subscriber. Call once, before any logging.
pub fn init_tracing_subscriber(target: LogTarget) -> anyhow::Result<()> {
    let directives = build_filter_directives(is_development(), target);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.join(",")));

    let (writer, ansi) = match target {
        LogTarget::Stdout => (BoxMakeWriter::new(io::stdout), false),
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), cfg!(not(test))),
    };

    // "2025-01-15 10:30:45.123  INFO sc_app::usecases::capture_loop: file.rs:42: message"
    let fmt_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);

    registry().with(env_filter).with(fmt_layer).try_init()?;
    Ok(())
}
