//! Diagnostic logging: a console layer on stderr and an optional plain
//! text file layer under `logs_folder`.

use crate::config::LoggingConfig;
use crate::errors::AppResult;
use chrono::{Duration, Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

const LOG_PREFIX: &str = "court_calendar_";
const LOG_SUFFIX: &str = ".log";

/// Days of log files kept in `logs_folder`.
pub const LOG_RETENTION_DAYS: i64 = 7;

/// Daily log file inside `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "{LOG_PREFIX}{}{LOG_SUFFIX}",
        Local::now().date_naive().format("%Y-%m-%d")
    ))
}

/// Date encoded in a daily log file name, if `name` is one.
fn log_file_date(name: &str) -> Option<NaiveDate> {
    let date = name.strip_prefix(LOG_PREFIX)?.strip_suffix(LOG_SUFFIX)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Delete daily log files older than the retention window ending at
/// `today`. Other files in `dir` are left alone. Returns the count removed.
pub fn prune_old_logs(dir: &Path, today: NaiveDate) -> AppResult<usize> {
    let cutoff = today - Duration::days(LOG_RETENTION_DAYS);
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(log_file_date) else {
            continue;
        };
        if date < cutoff {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Install the global subscriber. `RUST_LOG` overrides the console level.
/// Log files past the retention window are deleted first.
/// A second call is a no-op.
pub fn init_logging(cfg: &LoggingConfig, logs_dir: Option<&Path>) -> AppResult<Option<PathBuf>> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.console_level));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let mut pruned = 0;
    let (file_layer, path) = match logs_dir {
        Some(dir) => {
            pruned = prune_old_logs(dir, Local::now().date_naive())?;
            let path = log_file_path(dir);
            let file: File = OpenOptions::new().create(true).append(true).open(&path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(EnvFilter::new(&cfg.file_level));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .ok();

    if pruned > 0 {
        debug!(removed = pruned, "old log files pruned");
    }
    Ok(path)
}
