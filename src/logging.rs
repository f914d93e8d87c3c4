//! tracing subscriber setup for the CLI

use std::ffi::OsString;
use std::fs::File;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `nexus_tags=debug`
pub const LOG_ENV: &str = "NEXUS_TAGS_LOG";

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, writing to `log_path`.
///
/// Falls back to stderr when the log file cannot be opened. The returned
/// guard must be held until exit so buffered lines are flushed.
pub fn init(log_path: &Path) -> WorkerGuard {
    let (writer, guard) = match log_target(log_path) {
        Ok((dir, file_name)) => {
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            tracing_appender::non_blocking(std::io::stderr())
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

/// Create the log directory and check the file is writable, since
/// `rolling::never` panics when it cannot open the file.
fn log_target(log_path: &Path) -> std::io::Result<(&Path, OsString)> {
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "nexus-tags.log".into());

    std::fs::create_dir_all(dir)?;
    File::options()
        .append(true)
        .create(true)
        .open(dir.join(&file_name))?;
    Ok((dir, file_name))
}
