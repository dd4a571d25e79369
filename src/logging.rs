use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Route `tracing` output to a daily rolling file under `log_dir`, filtered by `RUST_LOG`
/// (default `info`). The terminal belongs to the UI, so nothing is logged to stdout.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("mazecarve")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error if a global subscriber was already installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init();

    Ok(guard)
}
