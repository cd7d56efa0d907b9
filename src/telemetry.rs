//! Diagnostic logging for the snapshot binary.
//!
//! Log lines go to stderr so stdout carries only the run summary. The
//! filter is read from `GITHUB_SNAPSHOT_LOG` using `tracing-subscriber`
//! directive syntax and defaults to `info`.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "GITHUB_SNAPSHOT_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Installs the global `tracing` subscriber.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging() {
    let _already_installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Filter from [`LOG_ENV_VAR`], or `info` when it is unset or unparsable.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
