//! Utilities for logging.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Copy, Default)]
pub enum LoggingMode {
    #[default]
    Pretty,
    Json,
    Compact,
}

/// Initialize the global tracing subscriber.
///
/// Verbosity escalates the default level: 0 = info, 1 = debug, 2 and above =
/// trace. A `RUST_LOG` directive takes precedence over the default when set.
pub fn init(verbosity: u8, mode: LoggingMode) {
    let default_level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match mode {
        LoggingMode::Pretty => builder.pretty().init(),
        LoggingMode::Json => builder.json().init(),
        LoggingMode::Compact => builder.compact().init(),
    }
}
