//! Tracing subscriber setup for the server binary.

use odonto_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `ODONTO_LOG` wins over the configured
/// level. Safe to call more than once; later calls are no-ops.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env("ODONTO_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let _ = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
