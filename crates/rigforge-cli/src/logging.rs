//! Tracing subscriber setup.
//!
//! Logs go to a daily rolling file so they never interleave with the REPL.
//! `--verbose` routes them to stderr instead.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rigforge_core::config::{DEFAULT_LOG_LEVEL, LoggingSettings};

const LOG_FILE_PREFIX: &str = "rigforge.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until
/// the process exits.
pub fn init(settings: &LoggingSettings, logs_dir: &Path, verbose: bool) -> Result<Option<WorkerGuard>> {
    let filter = filter_for(settings);

    if verbose {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install tracing subscriber")?;
        return Ok(None);
    }

    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;
    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(Some(guard))
}

/// `RUST_LOG` wins; otherwise the configured level.
fn filter_for(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(&settings.level))
}

/// Parses `level`, falling back to the default on a bad directive.
fn configured_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
