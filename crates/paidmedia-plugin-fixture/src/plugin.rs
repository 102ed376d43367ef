//! Fixture adapter implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use paidmedia_plugin_api::*;

use crate::config::{
    FailureMode,
    FixtureConfig,
};
use crate::types::FixtureSnapshot;
use crate::{
    mapper,
    metadata,
};

enum SnapshotSource {
    Inline(Arc<FixtureSnapshot>),
    File(std::path::PathBuf),
}

/// Adapter that replays a canonical snapshot instead of calling a platform API
pub struct FixturePlugin {
    metadata: ProviderMetadata,
    source: SnapshotSource,
    config: FixtureConfig,
}

impl Default for FixturePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl FixturePlugin {
    /// Adapter with an empty snapshot
    pub fn new() -> Self {
        Self::from_snapshot(FixtureSnapshot::default())
    }

    pub fn from_snapshot(snapshot: FixtureSnapshot) -> Self {
        Self {
            metadata: metadata::create_metadata(),
            source: SnapshotSource::Inline(Arc::new(snapshot)),
            config: FixtureConfig::default(),
        }
    }

    /// Builds the adapter from a `[providers.<name>.config]` table
    pub fn from_config(config: &HashMap<String, String>) -> ProviderResult<Self> {
        let config = FixtureConfig::from_map(config)?;
        let source = match &config.path {
            Some(path) => SnapshotSource::File(path.clone()),
            None => SnapshotSource::Inline(Arc::new(FixtureSnapshot::default())),
        };

        Ok(Self {
            metadata: metadata::create_metadata(),
            source,
            config,
        })
    }

    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.config.latency = latency;
        self
    }

    pub fn with_failure(mut self, mode: FailureMode) -> Self {
        self.config.fail_with = Some(mode);
        self
    }

    async fn load(&self, project_id: &str) -> ProviderResult<Arc<FixtureSnapshot>> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if let Some(mode) = self.config.fail_with {
            if mode == FailureMode::Panic {
                panic!("fixture adapter configured to panic");
            }
            return Err(mode.into_error());
        }

        let snapshot = match &self.source {
            SnapshotSource::Inline(snapshot) => Arc::clone(snapshot),
            SnapshotSource::File(path) => {
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    ProviderError::ApiError(format!(
                        "Failed to read snapshot {}: {e}",
                        path.display()
                    ))
                })?;
                Arc::new(serde_json::from_str::<FixtureSnapshot>(&content)?)
            }
        };

        if let Some(expected) = snapshot.project_id.as_deref() {
            if expected != project_id {
                return Err(ProviderError::ApiError(format!(
                    "Unknown project: {}",
                    project_id
                )));
            }
        }

        Ok(snapshot)
    }
}

#[async_trait]
impl ProviderAdapter for FixturePlugin {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn fetch_daily_metrics(
        &self, project_id: &str, range: &DateRange,
    ) -> ProviderResult<Vec<PaidMediaDailyMetrics>> {
        let snapshot = self.load(project_id).await?;
        let rows = mapper::map_metrics(self.provider_type(), &snapshot.metrics, range);
        tracing::debug!(
            project_id,
            range = %range,
            rows = rows.len(),
            "Fixture served daily metrics"
        );
        Ok(rows)
    }

    async fn fetch_hierarchy(&self, project_id: &str) -> ProviderResult<PaidMediaHierarchy> {
        let snapshot = self.load(project_id).await?;
        Ok(mapper::map_hierarchy(self.provider_type(), &snapshot))
    }

    async fn fetch_data_health(
        &self, project_id: &str, _range: &DateRange,
    ) -> ProviderResult<PaidMediaDataHealth> {
        let snapshot = self.load(project_id).await?;
        Ok(mapper::map_health(
            self.provider_type(),
            snapshot.data_health.as_ref(),
        ))
    }
}
