//! Tracing subscriber setup.
//!
//! Logs go to stderr by default so they never mix with command output.
//! When `[log].file` is set they go to that file through a non-blocking
//! writer; keep the returned guard alive until exit so buffered lines flush.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable that overrides `[log].level`.
pub const LOG_ENV_VAR: &str = "SIGNIN_LOG";

/// Builds the filter: `SIGNIN_LOG` wins over the configured level.
///
/// # Errors
/// Returns an error if neither source holds a valid filter directive.
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive.trim())
            .with_context(|| format!("Invalid {LOG_ENV_VAR} filter: {directive}")),
        _ => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level in config: {}", config.level)),
    }
}

/// Installs the global subscriber.
///
/// # Errors
/// Returns an error if the filter is invalid, the log file cannot be
/// prepared, or a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;

    let Some(path) = &config.file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log dir {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;
    Ok(Some(guard))
}
