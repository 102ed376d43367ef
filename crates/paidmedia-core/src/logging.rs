use anyhow::Context;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::infrastructure::LoggingConfig;

/// Takes precedence over `RUST_LOG` when set
pub const LOG_FILTER_ENV: &str = "PAIDMEDIA_LOG";

const CRATE_TARGETS: [&str; 3] = [
    "paidmedia_core",
    "paidmedia_plugin_api",
    "paidmedia_plugin_fixture",
];

/// `target=level` directives for every paidmedia crate
pub fn crate_directives(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level.trim()))
        .collect::<Vec<_>>()
        .join(",")
}

/// `PAIDMEDIA_LOG`, then `RUST_LOG`, then the configured level for our crates
pub fn build_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) {
        return Ok(filter);
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(crate_directives(&config.level))
        .with_context(|| format!("Invalid log level '{}'", config.level))
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(config.with_thread_ids),
        )
        .try_init()
        .context("Global tracing subscriber already installed")?;

    tracing::debug!(level = %config.level, "Logging initialized");
    Ok(())
}
