//! Logging utilities for the Banklink service.
//!
//! All crates log through `tracing`; this module installs the subscriber once
//! at startup.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO for the Banklink crates.
///
/// ```
/// use banklink_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Installs the subscriber with `level` for every `banklink_*` target.
///
/// `RUST_LOG` is honoured; `tower_http` request traces are kept at INFO.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for directive in [format!("banklink={}", level), "tower_http=info".to_string()] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // try_init: a global subscriber may already be set (tests, embedding).
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
        info!("Banklink logging ready ({} for banklink crates)", level);
    }
}

/// Logs a failure that is about to be turned into an error response.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Logs how a flow ended and hands the result back unchanged.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    if let Err(e) = &result {
        error!("{}: {}", error_context, e);
    } else {
        info!("{}", success_message);
    }
    result
}
