//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production
//! environments. `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger(level: &str) {
    init_logger_with_file(level, None);
}

/// Initialize the logger with optional daily-rolling file output
pub fn init_logger_with_file(level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && std::path::Path::new(dir).exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "quickcart-server");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
