//! Tracing setup. Logs go to stderr so stdout stays clean for pipelines.

use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter, e.g. `ISSUEBOARD_LOG=debug`.
pub const LOG_ENV: &str = "ISSUEBOARD_LOG";

pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
