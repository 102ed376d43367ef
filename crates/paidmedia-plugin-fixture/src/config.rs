use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use paidmedia_plugin_api::{
    ProviderError,
    ProviderResult,
};

/// Failure injected into every call, to simulate a misbehaving platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Auth,
    RateLimited,
    Timeout,
    Malformed,
    Network,
    Internal,
    Panic,
}

impl FailureMode {
    pub(crate) fn into_error(self) -> ProviderError {
        match self {
            Self::Auth => ProviderError::AuthenticationFailed("injected: token rejected".into()),
            Self::RateLimited => ProviderError::RateLimited("injected: quota exhausted".into()),
            Self::Timeout => ProviderError::Timeout("injected: upstream timed out".into()),
            Self::Malformed => ProviderError::MalformedResponse("injected: bad payload".into()),
            Self::Network => ProviderError::NetworkError("injected: connection reset".into()),
            Self::Internal | Self::Panic => ProviderError::Internal("injected: adapter bug".into()),
        }
    }
}

impl std::str::FromStr for FailureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auth" => Ok(Self::Auth),
            "rate_limited" | "rate-limited" => Ok(Self::RateLimited),
            "timeout" => Ok(Self::Timeout),
            "malformed" => Ok(Self::Malformed),
            "network" => Ok(Self::Network),
            "internal" => Ok(Self::Internal),
            "panic" => Ok(Self::Panic),
            _ => Err(format!(
                "Unknown failure mode: {}. Valid options: auth, rate_limited, timeout, malformed, network, internal, panic",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureConfig {
    pub path: Option<PathBuf>,
    pub latency: Duration,
    pub fail_with: Option<FailureMode>,
}

impl FixtureConfig {
    /// Parses the free-form `[providers.<name>.config]` table
    pub fn from_map(config: &HashMap<String, String>) -> ProviderResult<Self> {
        let path = config
            .get("path")
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let latency = match config.get("latency_ms") {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|e| {
                    ProviderError::InvalidConfig(format!("Invalid latency_ms '{}': {e}", raw))
                })?;
                Duration::from_millis(millis)
            }
            None => Duration::ZERO,
        };

        let fail_with = config
            .get("fail_with")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<FailureMode>())
            .transpose()
            .map_err(ProviderError::InvalidConfig)?;

        Ok(Self {
            path,
            latency,
            fail_with,
        })
    }
}
