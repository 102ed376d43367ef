use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    ProviderError,
    ProviderResult,
};
use crate::types::*;

/// Adapter metadata - describes the platform integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Display name (e.g., "Meta Ads")
    pub name: String,
    /// Adapter type identifier (e.g., "meta", "fixture")
    pub provider_type: String,
    pub version: String,
    pub description: String,
    pub author: Option<String>,
    pub capabilities: ProviderCapabilities,
}

/// Which parts of the contract the adapter actually implements.
/// Operations switched off here are answered as unsupported without calling the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub metrics: bool,
    pub hierarchy: bool,
    pub data_health: bool,
}

impl Default for ProviderCapabilities {
    fn default() -> Self {
        Self {
            metrics: true,
            hierarchy: true,
            data_health: true,
        }
    }
}

/// Provider contract - every ad platform adapter must implement this.
///
/// Adapters own authentication, pagination, rate-limit backoff and translation
/// into the canonical shapes. They either return canonical data or an error.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn metadata(&self) -> &ProviderMetadata;

    /// Daily rows for the window, one per date the platform has data for
    async fn fetch_daily_metrics(
        &self, project_id: &str, range: &DateRange,
    ) -> ProviderResult<Vec<PaidMediaDailyMetrics>>;

    async fn fetch_hierarchy(&self, _project_id: &str) -> ProviderResult<PaidMediaHierarchy> {
        Err(ProviderError::NotSupported(
            "Hierarchy not supported by this provider".to_string(),
        ))
    }

    async fn fetch_data_health(
        &self, _project_id: &str, _range: &DateRange,
    ) -> ProviderResult<PaidMediaDataHealth> {
        Err(ProviderError::NotSupported(
            "Data health not supported by this provider".to_string(),
        ))
    }

    fn provider_type(&self) -> &str {
        &self.metadata().provider_type
    }
}
