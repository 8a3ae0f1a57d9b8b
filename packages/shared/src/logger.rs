//! Logging setup utilities for the Tsunagi workspace.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Sets up logging for the library crates and the binary; the `RUST_LOG`
/// environment variable overrides the default when present.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tsunagi-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tsunagi_shared::logger::setup_logger;
///
/// setup_logger("tsunagi-client", "info");
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

/// Build the default filter directives covering the workspace crates and the binary.
fn default_filter(binary_name: &str, level: &str) -> String {
    let binary_target = binary_name.replace("-", "_");
    format!("tsunagi_shared={level},tsunagi_core={level},tsunagi_client={level},{binary_target}={level}")
}
