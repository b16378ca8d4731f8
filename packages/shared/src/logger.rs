//! Logging setup utilities for the Irori chat relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing target of the relay library
const LIBRARY_TARGET: &str = "irori_server";

/// Initialize the tracing subscriber with the specified default log level.
///
/// This function sets up logging for both the server library crate and the binary.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "irori-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use irori_shared::logger::setup_logger;
///
/// setup_logger("irori-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Both the binary target and the server library target get the same level.
/// The binary directive is left out when it names the library target itself.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    if binary_target == LIBRARY_TARGET {
        return format!("{}={}", LIBRARY_TARGET, default_log_level);
    }
    format!(
        "{}={},{}={}",
        LIBRARY_TARGET, default_log_level, binary_target, default_log_level
    )
}
