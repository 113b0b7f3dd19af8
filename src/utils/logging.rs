use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system with the specified log level.
///
/// Console logs go to stderr so they never interleave with rendered tables.
/// With `with_file`, logs are also written to daily rotating files in the
/// "logs" directory.
///
/// # Arguments
///
/// * `log_level` - The desired log level as a string (e.g. "info", "debug", "warn")
/// * `with_file` - Whether to also log to a rotating file in addition to stderr.
///
/// # Example
///
/// ```no_run
/// staffboard::utils::init_logging("info", true);
/// ```
pub fn init_logging(log_level: &str, with_file: bool) {
    let filter = match EnvFilter::try_new(log_level) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            EnvFilter::new("info")
        }
    };

    let stderr_layer = fmt::layer()
        .with_line_number(true)
        .with_writer(std::io::stderr);

    if with_file {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "staffboard.log");

        let file_layer = fmt::layer()
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }
}
