//! Tracing setup. Logs go to a file so they never corrupt the terminal UI.

use anyhow::Context;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CELLSHEET_LOG";
const DEFAULT_FILTER: &str = "cellsheet=info,cellsheet_core=info,cellsheet_engine=info";

/// Install the global subscriber writing to `log_file`. Without a file,
/// nothing is installed and events are discarded.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
