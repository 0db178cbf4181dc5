//! Tracing setup: `EnvFilter` from `VERITY_LOG` or config, text or JSON output.

use tracing_subscriber::EnvFilter;
use verity_core::config::ObservabilityConfig;
use verity_core::constants::LOG_ENV_VAR;

/// Filter from `env_value` when it parses, else from the configured level.
pub fn resolve_filter(env_value: Option<&str>, config: &ObservabilityConfig) -> EnvFilter {
    env_value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(&config.log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// `VERITY_LOG` takes precedence over `config.log_level`. Returns `false` if a
/// subscriber was already installed, which leaves the existing one in place.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let filter = resolve_filter(env_value.as_deref(), config);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let installed = if config.json {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(json = config.json, level = %config.log_level, "tracing initialized");
    }
    installed
}

/// Install a JSON subscriber with an explicit filter (tests, embedding hosts).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
