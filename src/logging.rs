use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::settings;

/// Route `tracing` output to `<config_dir>/reels.log`.
///
/// The terminal belongs to the UI, so nothing is written to stdout. `RUST_LOG`
/// takes precedence over the default level. The returned guard must be held
/// until exit or buffered lines are lost.
pub fn init(config_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let log_path = settings::log_path(config_dir);
    let file_name = log_path
        .file_name()
        .context("Log path has no file name")?;
    let appender = tracing_appender::rolling::never(config_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let default_level = if verbose { "reels=debug" } else { "reels=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    if verbose {
        eprintln!("Logging to {}", log_path.display());
    }
    Ok(guard)
}
