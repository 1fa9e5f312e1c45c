// Logging module - file-backed tracing setup
//
// The TUI owns the alternate screen, so logs must never reach stdout once
// it is up; everything goes through a non-blocking rolling file writer.
// Filtering follows RUST_LOG when set, defaulting to info.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with a daily-rolling log file.
///
/// The returned guard must stay alive for the program's lifetime or
/// buffered log lines are dropped on exit.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, "diorama.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(guard)
}
