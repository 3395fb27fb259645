//! Tracing setup.
//!
//! Diagnostics always go to stderr, since stdout carries the command trace
//! and the child's own output. With a log file configured, the same events
//! are also appended to that file through a non-blocking writer.

use std::fs::{self, File};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::TaskExecConfig;
use crate::error::{Result, TaskExecError};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool, verbose: bool) -> &'static str {
    if debug {
        "taskexec=debug"
    } else if verbose {
        "taskexec=info"
    } else {
        "taskexec=warn"
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must be held until
/// the process exits.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init(config: &TaskExecConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.debug, config.verbose)));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.logfile {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TaskExecError::Config(format!("cannot install logger: {e}")))?;

    Ok(guard)
}

/// Open `path` for appending, creating parent directories as needed.
fn open_log_file(path: &Path) -> Result<File> {
    let open = || -> std::io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|e| {
        TaskExecError::Config(format!("cannot open log file {}: {e}", path.display()))
    })
}
