#![allow(dead_code)]

use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use paidmedia_plugin_api::{
    DateRange,
    HealthStatus,
    PaidMediaDailyMetrics,
    PaidMediaDataHealth,
    PaidMediaHierarchy,
    ProviderAdapter,
    ProviderCapabilities,
    ProviderError,
    ProviderMetadata,
    ProviderResult,
};

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).expect("valid range")
}

pub fn spend_row(provider: &str, d: &str, spend: f64) -> PaidMediaDailyMetrics {
    PaidMediaDailyMetrics {
        spend,
        ..PaidMediaDailyMetrics::zero(provider, date(d))
    }
}

#[derive(Clone)]
pub enum Script<T> {
    Ok(T),
    Fail(fn() -> ProviderError),
}

/// Adapter whose answers and latency are fixed up front
pub struct ScriptedAdapter {
    metadata: ProviderMetadata,
    delay: Duration,
    metrics: Script<Vec<PaidMediaDailyMetrics>>,
    hierarchy: Script<PaidMediaHierarchy>,
    health: Script<PaidMediaDataHealth>,
    pub calls: AtomicUsize,
}

impl ScriptedAdapter {
    pub fn new(name: &str) -> Self {
        Self {
            metadata: ProviderMetadata {
                name: name.to_string(),
                provider_type: name.to_string(),
                version: "0.0.0".to_string(),
                description: "scripted test adapter".to_string(),
                author: None,
                capabilities: ProviderCapabilities::default(),
            },
            delay: Duration::ZERO,
            metrics: Script::Ok(Vec::new()),
            hierarchy: Script::Ok(PaidMediaHierarchy::empty(name)),
            health: Script::Ok(healthy(name, 1.0)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_metrics(mut self, rows: Vec<PaidMediaDailyMetrics>) -> Self {
        self.metrics = Script::Ok(rows);
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: PaidMediaHierarchy) -> Self {
        self.hierarchy = Script::Ok(hierarchy);
        self
    }

    pub fn with_health(mut self, health: PaidMediaDataHealth) -> Self {
        self.health = Script::Ok(health);
        self
    }

    pub fn failing(mut self, error: fn() -> ProviderError) -> Self {
        self.metrics = Script::Fail(error);
        self.hierarchy = Script::Fail(error);
        self.health = Script::Fail(error);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    async fn answer<T: Clone>(&self, script: &Script<T>) -> ProviderResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match script {
            Script::Ok(value) => Ok(value.clone()),
            Script::Fail(error) => Err(error()),
        }
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn fetch_daily_metrics(
        &self, _project_id: &str, _range: &DateRange,
    ) -> ProviderResult<Vec<PaidMediaDailyMetrics>> {
        self.answer(&self.metrics).await
    }

    async fn fetch_hierarchy(&self, _project_id: &str) -> ProviderResult<PaidMediaHierarchy> {
        self.answer(&self.hierarchy).await
    }

    async fn fetch_data_health(
        &self, _project_id: &str, _range: &DateRange,
    ) -> ProviderResult<PaidMediaDataHealth> {
        self.answer(&self.health).await
    }
}

pub fn healthy(provider: &str, confidence: f64) -> PaidMediaDataHealth {
    PaidMediaDataHealth {
        provider: provider.to_string(),
        status: HealthStatus::Healthy,
        last_sync_at: None,
        is_fresh: true,
        error_count: 0,
        backlog_count: 0,
        confidence,
        issues: Vec::new(),
    }
}

pub fn api_error() -> ProviderError {
    ProviderError::ApiError("500 from upstream".to_string())
}

pub fn auth_error() -> ProviderError {
    ProviderError::AuthenticationFailed("token expired".to_string())
}
