use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

/// Install the global subscriber. Logs never go to stdout, which carries the
/// rendered stream.
pub fn setup_logging(verbose_level: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        // Use RUST_LOG if set
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        // Map verbosity count to filters
        let filter_str = match verbose_level {
            0 => "warn,reasoning_view=info",
            1 => "info,reasoning_view=debug,reasoning_stream=debug",
            _ => "debug,reasoning_view=trace,reasoning_stream=trace",
        };
        tracing_subscriber::EnvFilter::new(filter_str)
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_level(true);

    if let Some(log_file_path) = log_file {
        if let Some(parent) = log_file_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .with_context(|| format!("Could not open log file {}", log_file_path.display()))?;

        subscriber
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}
