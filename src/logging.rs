//! File logging for the console.
//!
//! The terminal belongs to the UI, so `tracing` output goes to
//! `<local data dir>/lazylogbook/logs/lazylogbook.log.<date>`, one file per
//! day. `RUST_LOG` selects what is recorded; without it the crate logs at
//! `info` and dependencies at `warn`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "lazylogbook=info,warn";
const LOG_FILE_PREFIX: &str = "lazylogbook.log";

/// Install the global subscriber and return the directory logs go to.
///
/// Fails if the directory cannot be created or a subscriber is already set.
/// Unparseable `RUST_LOG` directives fall back to the default filter and are
/// reported in the log itself.
pub fn init() -> anyhow::Result<PathBuf> {
    let log_dir = log_directory().context("could not determine the local data directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create {}", log_dir.display()))?;

    let (filter, rejected) = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    let file = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if let Some(directives) = rejected {
        tracing::warn!(%directives, "Ignoring invalid RUST_LOG, using the default filter");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = %log_dir.display(),
        "Console starting"
    );
    Ok(log_dir)
}

/// Filter from `RUST_LOG` directives, with the rejected text if they don't parse.
fn build_filter(directives: Option<&str>) -> (EnvFilter, Option<String>) {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        None => (EnvFilter::new(DEFAULT_LOG_FILTER), None),
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(_) => (
                EnvFilter::new(DEFAULT_LOG_FILTER),
                Some(directives.to_string()),
            ),
        },
    }
}

fn log_directory_in(base: &Path) -> PathBuf {
    base.join("lazylogbook").join("logs")
}

/// Where log files are written, if the platform has a local data directory.
///
/// Printed by `lazylogbook init` so operators can find the log files.
pub fn log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| log_directory_in(&base))
}

pub fn shutdown() {
    tracing::info!("Console shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_layout() {
        let dir = log_directory_in(Path::new("/data"));
        assert_eq!(dir, PathBuf::from("/data/lazylogbook/logs"));
    }

    #[test]
    fn test_default_filter_without_directives() {
        let (filter, rejected) = build_filter(None);
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_LOG_FILTER).to_string());
        assert_eq!(rejected, None);

        let (_, rejected) = build_filter(Some("   "));
        assert_eq!(rejected, None);
    }

    #[test]
    fn test_valid_directives_are_used() {
        let (filter, rejected) = build_filter(Some("lazylogbook=trace"));
        assert_eq!(rejected, None);
        assert_eq!(filter.to_string(), "lazylogbook=trace");
    }

    #[test]
    fn test_invalid_directives_fall_back() {
        let (filter, rejected) = build_filter(Some("lazylogbook=loud"));
        assert_eq!(rejected.as_deref(), Some("lazylogbook=loud"));
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_LOG_FILTER).to_string());
    }
}
