use tracing_subscriber::EnvFilter;

use crate::config::log_level;

/// Initialize the global `tracing` subscriber from `LOG_LEVEL`.
///
/// Panics on an unrecognized level, mirroring the upstream services' own
/// `mustMakeLogger`, a bad `LOG_LEVEL` is a startup misconfiguration, not
/// something to silently default past.
pub fn init() {
    let level = log_level();
    let directive = match level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "ERROR" => "error",
        other => panic!("unknown log level: {other}"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(false)
        .init();
}
