use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::settings::{log_dir, Settings};

/// Route `tracing` events to a timestamped file under the config directory.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// Returns `None` when the log directory cannot be created; the app runs
/// without logs in that case. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init(settings: &Settings) -> Option<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).ok()?;

    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let file_appender = tracing_appender::rolling::never(&dir, format!("doorman.{timestamp}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(guard)
}
