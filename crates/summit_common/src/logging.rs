//! Logging utilities for the Summit registration service.
//!
//! One subscriber is installed per process. `RUST_LOG` is honoured; on top
//! of it the service's own crates (`summit_*`) log at the requested level.

use tracing::{error, info, Level};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use summit_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
///
/// # Arguments
///
/// * `level` - The minimum level for the service's own crates.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    match format!("summit={}", level).parse::<Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(err) => eprintln!("Invalid log directive for level {level}: {err}"),
    }

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

/// Parse a level name such as `debug` or `WARN`, defaulting to INFO.
pub fn level_from_str(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Log a result, with different messages for success and error cases.
///
/// # Arguments
///
/// * `result` - The result to log.
/// * `success_message` - The message to log if the result is Ok.
/// * `error_context` - Additional context information to include if the result is Err.
///
/// # Returns
///
/// The original result, allowing this function to be used in a chain.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("debug"), Level::DEBUG);
        assert_eq!(level_from_str(" WARN "), Level::WARN);
        assert_eq!(level_from_str("chatty"), Level::INFO);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_with_level(Level::DEBUG);
        init();
    }

    #[test]
    fn test_log_result_passes_value_through() {
        let ok: Result<u8, String> = log_result(Ok(7), "done", "failed");
        assert_eq!(ok, Ok(7));
        let err: Result<u8, String> = log_result(Err("nope".into()), "done", "failed");
        assert_eq!(err, Err("nope".to_string()));
    }
}
