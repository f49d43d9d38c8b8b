//! Logging utilities for the booking services.
//!
//! Every binary and test harness in the workspace sets up `tracing` through
//! this module so that log output looks the same everywhere.

use std::env;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use connectify_common::logging;
///
/// logging::init();
/// // A second call is a no-op.
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber from the `LOG_LEVEL` environment variable.
///
/// Unknown or missing values fall back to INFO.
pub fn init_from_env() {
    let level = env::var("LOG_LEVEL")
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(Level::INFO);
    init_with_level(level);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` still applies; `level` is added as a directive for the
/// workspace's own `connectify` targets.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("connectify={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: tests and embedded callers may have set a subscriber already
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Parses a case-insensitive level name such as `debug` or `WARN`.
pub fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so the call can sit in a `?` chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
