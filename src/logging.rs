use std::{env, fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Names the file diagnostics are appended to. Unset means no logging.
pub(crate) const LOG_FILE_ENV: &str = "HEXCOMPARE_LOG";

/// Installs a file-backed subscriber so diagnostics never touch the terminal UI.
pub(crate) fn install_tracing() -> Result<()> {
    let Some(log_path) = env::var_os(LOG_FILE_ENV).map(PathBuf::from) else {
        return Ok(());
    };

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")
}
