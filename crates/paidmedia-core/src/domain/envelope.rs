use paidmedia_plugin_api::{
    PaidMediaDailyMetrics,
    PaidMediaDataHealth,
    PaidMediaHierarchy,
    ProviderError,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Classified reason a provider call produced no data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderErrorKind {
    ProviderNotRegistered,
    ProviderTimeout,
    ProviderAuthError,
    ProviderRateLimited,
    ProviderMalformedResponse,
    ProviderUnknownError,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderNotRegistered => "ProviderNotRegistered",
            Self::ProviderTimeout => "ProviderTimeout",
            Self::ProviderAuthError => "ProviderAuthError",
            Self::ProviderRateLimited => "ProviderRateLimited",
            Self::ProviderMalformedResponse => "ProviderMalformedResponse",
            Self::ProviderUnknownError => "ProviderUnknownError",
        }
    }
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_registered(provider: &str) -> Self {
        Self::new(
            ProviderErrorKind::ProviderNotRegistered,
            format!("Provider not registered: {}", provider),
        )
    }
}

impl From<ProviderError> for ProviderFailure {
    fn from(err: ProviderError) -> Self {
        let kind = match &err {
            ProviderError::AuthenticationFailed(_) => ProviderErrorKind::ProviderAuthError,
            ProviderError::RateLimited(_) => ProviderErrorKind::ProviderRateLimited,
            ProviderError::Timeout(_) => ProviderErrorKind::ProviderTimeout,
            ProviderError::MalformedResponse(_) => ProviderErrorKind::ProviderMalformedResponse,
            ProviderError::NetworkError(_)
            | ProviderError::ApiError(_)
            | ProviderError::InvalidConfig(_)
            | ProviderError::NotSupported(_)
            | ProviderError::Internal(_) => ProviderErrorKind::ProviderUnknownError,
        };
        Self::new(kind, err.to_string())
    }
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Error,
}

/// Outcome of one provider call. Exactly one of `data` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEnvelope<T> {
    pub provider: String,
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderFailure>,
    pub duration_ms: u64,
}

impl<T> ProviderEnvelope<T> {
    pub fn success(provider: impl Into<String>, data: T, duration_ms: u64) -> Self {
        Self {
            provider: provider.into(),
            status: FetchStatus::Success,
            data: Some(data),
            error: None,
            duration_ms,
        }
    }

    pub fn failure(provider: impl Into<String>, error: ProviderFailure, duration_ms: u64) -> Self {
        Self {
            provider: provider.into(),
            status: FetchStatus::Error,
            data: None,
            error: Some(error),
            duration_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    pub fn failure_summary(&self) -> Option<ProviderFailureSummary> {
        self.error.as_ref().map(|e| ProviderFailureSummary {
            provider: self.provider.clone(),
            kind: e.kind,
            message: e.message.clone(),
        })
    }
}

pub type DomainMetricsResult = ProviderEnvelope<Vec<PaidMediaDailyMetrics>>;
pub type DomainHierarchyResult = ProviderEnvelope<PaidMediaHierarchy>;
pub type DomainDataHealthResult = ProviderEnvelope<PaidMediaDataHealth>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailureSummary {
    pub provider: String,
    pub kind: ProviderErrorKind,
    pub message: String,
}

/// How much of the registered provider set an aggregate is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    Complete,
    Partial,
    AllFailed,
    NoProviders,
}

impl AggregateStatus {
    pub fn from_envelopes<T>(envelopes: &[ProviderEnvelope<T>]) -> Self {
        let succeeded = envelopes.iter().filter(|e| e.is_success()).count();
        match (succeeded, envelopes.len()) {
            (_, 0) => Self::NoProviders,
            (0, _) => Self::AllFailed,
            (s, total) if s == total => Self::Complete,
            _ => Self::Partial,
        }
    }

    /// True when the aggregate holds no provider data at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::AllFailed | Self::NoProviders)
    }
}

pub(crate) fn collect_failures<T>(envelopes: &[ProviderEnvelope<T>]) -> Vec<ProviderFailureSummary> {
    envelopes
        .iter()
        .filter_map(ProviderEnvelope::failure_summary)
        .collect()
}
