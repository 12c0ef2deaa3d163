//! Log output for the monitor.
//!
//! The terminal UI owns the tty on both stdout and stderr, so log lines go
//! to a file instead. `RUST_LOG` overrides the default filter.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

use crate::{MonitorError, Result};

/// File name of the log inside the system temp directory.
const LOG_FILE: &str = "topup-monitor.log";

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "topup_monitor=info,warn";

/// Default log location.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE)
}

/// Installs the global subscriber, appending to `path`.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] if the file cannot be opened or a global
/// subscriber is already set.
pub fn init(path: &Path) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing::subscriber::set_global_default(file_subscriber(open(path)?, filter))
        .map_err(|e| MonitorError::Io(format!("failed to install logger: {e}")))
}

fn open(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| MonitorError::Io(format!("failed to open log file {}: {e}", path.display())))
}

fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .finish()
}
