use std::collections::HashMap;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::level_filters::LevelFilter;

pub(super) const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

pub(super) const DEFAULT_MAX_CONCURRENT_PROVIDERS: usize = 10;

pub(super) const DEFAULT_MIN_HEALTHY_CONFIDENCE: f64 = 0.8;

pub(super) const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaidMediaConfig {
    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub providers: IndexMap<String, ProviderFileConfig>,
}

impl PaidMediaConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.aggregation.validate()?;
        self.logging.validate()?;

        for (name, provider) in &self.providers {
            if provider.provider_type.trim().is_empty() {
                return Err(format!("Provider '{}' has no type", name));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Upper bound on a single adapter call before it is reported as timed out
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    #[serde(default = "default_max_concurrent_providers")]
    pub max_concurrent_providers: usize,

    /// Below this confidence a provider reporting healthy is treated as degraded
    #[serde(default = "default_min_healthy_confidence")]
    pub min_healthy_confidence: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: default_provider_timeout_secs(),
            max_concurrent_providers: default_max_concurrent_providers(),
            min_healthy_confidence: default_min_healthy_confidence(),
        }
    }
}

impl AggregationConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.provider_timeout_secs == 0 {
            return Err("provider_timeout_secs must be greater than zero".to_string());
        }

        if self.max_concurrent_providers == 0 {
            return Err("max_concurrent_providers must be greater than zero".to_string());
        }

        if !(0.0..=1.0).contains(&self.min_healthy_confidence) {
            return Err(format!(
                "min_healthy_confidence must be within [0, 1], got {}",
                self.min_healthy_confidence
            ));
        }

        Ok(())
    }
}

/// `[logging]` table, consumed by `crate::logging::init`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level applied to the paidmedia crates when no filter env var is set
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub with_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.level
            .trim()
            .parse::<LevelFilter>()
            .map(|_| ())
            .map_err(|_| format!("Unknown log level '{}'", self.level))
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_provider_timeout_secs() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_SECS
}

fn default_max_concurrent_providers() -> usize {
    DEFAULT_MAX_CONCURRENT_PROVIDERS
}

fn default_min_healthy_confidence() -> f64 {
    DEFAULT_MIN_HEALTHY_CONFIDENCE
}

/// One `[providers.<name>]` table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderFileConfig {
    #[serde(rename = "type")]
    pub provider_type: String,

    #[serde(default)]
    pub config: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ProviderTimeoutSecs,
    MaxConcurrentProviders,
    MinHealthyConfidence,
    LogLevel,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        Self::ProviderTimeoutSecs,
        Self::MaxConcurrentProviders,
        Self::MinHealthyConfidence,
        Self::LogLevel,
    ];

    pub fn env_var_name(&self) -> &'static str {
        match self {
            Self::ProviderTimeoutSecs => "PAIDMEDIA_PROVIDER_TIMEOUT_SECS",
            Self::MaxConcurrentProviders => "PAIDMEDIA_MAX_CONCURRENT_PROVIDERS",
            Self::MinHealthyConfidence => "PAIDMEDIA_MIN_HEALTHY_CONFIDENCE",
            Self::LogLevel => "PAIDMEDIA_LOG_LEVEL",
        }
    }
}
