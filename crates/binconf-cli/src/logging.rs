//! Log output for the CLI.
//!
//! Logs go to stderr so JSON written to stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable read when `--log` is not given
pub const LOG_ENV: &str = "BINCONF_LOG";

/// Initialize logging.
///
/// Filter priority: `--log` flag > `BINCONF_LOG` > `warn`.
pub fn init_logging(flag: Option<&str>) {
    let filter = match flag {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
