//! Logging Infrastructure
//!
//! Structured logging via `tracing-subscriber`, optionally written to a daily
//! rolling file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with console output at `info`
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` wins over `log_level` when set. When `log_dir` does not exist
/// it is created; if that fails, logs go to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_appender = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        if !path.exists() && std::fs::create_dir_all(path).is_err() {
            return None;
        }
        Some(tracing_appender::rolling::daily(path, "bakery-server"))
    });

    // try_init: tests may initialize more than once
    match (file_appender, json) {
        (Some(appender), true) => {
            let _ = builder.json().with_writer(appender).try_init();
        }
        (Some(appender), false) => {
            let _ = builder.with_ansi(false).with_writer(appender).try_init();
        }
        (None, true) => {
            let _ = builder.json().try_init();
        }
        (None, false) => {
            let _ = builder.try_init();
        }
    }
}
