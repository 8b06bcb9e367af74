//! Structured Logger
//!
//! Wraps `tracing` with a human console layer on stderr and, when a log
//! directory is configured, a daily-rotated NDJSON file. stdout is left to
//! the command's own output.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "prodsafe.log";

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Default filter when `RUST_LOG` is unset, e.g. `info` or `prodsafe_upload=debug`.
    pub level: String,
    /// Directory for `prodsafe.log.YYYY-MM-DD`; no file output when `None`.
    pub log_dir: Option<PathBuf>,
    pub ansi: bool,
    /// Emit console records as JSON instead of the compact text format.
    pub json: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_dir: None,
            ansi: true,
            json: false,
        }
    }
}

/// Initialize the global structured logger. Calling it twice is a no-op.
pub fn init_logger(options: &LoggerOptions) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    let file_layer = options.log_dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let (console_text, console_json) = if options.json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(options.ansi);
        (Some(layer), None)
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_text)
        .with(console_json)
        .with(file_layer)
        .try_init();
}
