//! File-based logging.
//!
//! The terminal belongs to the TUI, so tracing output goes to a daily rolling
//! file under the configured log directory.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;
use crate::error::Result;

const LOG_FILE_PREFIX: &str = "tilawa";

/// Install the global subscriber writing to `<dir>/tilawa.YYYY-MM-DD`.
///
/// `RUST_LOG` wins over `settings.filter`. The returned guard flushes pending
/// lines on drop and must live until the app exits.
pub fn init_logging(dir: &Path, settings: &LoggingSettings) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("tilawa=info,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
