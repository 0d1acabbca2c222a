use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TASKDECK_LOG=taskdeck=debug`
pub const LOG_ENV: &str = "TASKDECK_LOG";

pub const LOG_FILE: &str = "taskdeck.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, for the headless subcommands. Quiet unless asked.
pub fn init_stderr(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }
}

/// Directory holding the log file while the TUI owns the terminal
pub fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("taskdeck"))
}

/// Log to `<state dir>/taskdeck/taskdeck.log`. The returned guard flushes on
/// drop and must be held until the TUI exits. Returns `None` (no logging)
/// when the directory cannot be created.
pub fn init_file() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("warning: logging disabled, cannot create {}: {}", dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    if init_result.is_err() {
        return None;
    }
    tracing::info!(path = %dir.join(LOG_FILE).display(), "logging started");
    Some(guard)
}
