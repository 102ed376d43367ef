use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use paidmedia_plugin_api::{
    DateRange,
    ProviderAdapter,
    ProviderRegistry,
};
use tokio::sync::Semaphore;

use super::provider_accessor::ProviderAccessor;
use crate::domain::envelope::collect_failures;
use crate::domain::{
    collect_hierarchies,
    merge_daily_metrics,
    rollup_health,
    validate_project_id,
    AggregateStatus,
    AggregatedDataHealth,
    AggregatedHierarchy,
    AggregatedMetricsReport,
    DomainDataHealthResult,
    DomainHierarchyResult,
    DomainMetricsResult,
    DomainResult,
    MetricTotals,
    ProviderEnvelope,
};
use crate::infrastructure::AggregationConfig;

/// Fans requests out to every registered provider and merges the envelopes.
///
/// Only invalid input fails a call. Provider failures are reported through
/// `AggregateStatus` and the per-provider envelopes.
pub struct PaidMediaService {
    registry: Arc<ProviderRegistry>,
    accessor: ProviderAccessor,
    config: AggregationConfig,
}

impl PaidMediaService {
    /// A zero `max_concurrent_providers` is raised to 1 so fan-outs always make progress
    pub fn new(registry: Arc<ProviderRegistry>, mut config: AggregationConfig) -> Self {
        if config.max_concurrent_providers == 0 {
            tracing::warn!("max_concurrent_providers is 0, using 1");
            config.max_concurrent_providers = 1;
        }

        let accessor = ProviderAccessor::new(Arc::clone(&registry), config.provider_timeout());
        Self {
            registry,
            accessor,
            config,
        }
    }

    pub fn accessor(&self) -> &ProviderAccessor {
        &self.accessor
    }

    pub async fn get_metrics_from_provider(
        &self, provider_name: &str, project_id: &str, range: &DateRange,
    ) -> DomainResult<DomainMetricsResult> {
        validate_project_id(project_id)?;
        Ok(self
            .accessor
            .get_metrics_from_provider(provider_name, project_id, range)
            .await)
    }

    pub async fn get_hierarchy_from_provider(
        &self, provider_name: &str, project_id: &str,
    ) -> DomainResult<DomainHierarchyResult> {
        validate_project_id(project_id)?;
        Ok(self
            .accessor
            .get_hierarchy_from_provider(provider_name, project_id)
            .await)
    }

    pub async fn get_data_health_from_provider(
        &self, provider_name: &str, project_id: &str, range: &DateRange,
    ) -> DomainResult<DomainDataHealthResult> {
        validate_project_id(project_id)?;
        Ok(self
            .accessor
            .get_data_health_from_provider(provider_name, project_id, range)
            .await)
    }

    pub async fn get_metrics_by_provider(
        &self, project_id: &str, range: &DateRange,
    ) -> DomainResult<Vec<DomainMetricsResult>> {
        validate_project_id(project_id)?;
        let accessor = &self.accessor;
        Ok(self
            .fan_out(|name, adapter| async move {
                accessor
                    .metrics_with(&name, Some(adapter), project_id, range)
                    .await
            })
            .await)
    }

    pub async fn get_hierarchy_by_provider(
        &self, project_id: &str,
    ) -> DomainResult<Vec<DomainHierarchyResult>> {
        validate_project_id(project_id)?;
        let accessor = &self.accessor;
        Ok(self
            .fan_out(|name, adapter| async move {
                accessor.hierarchy_with(&name, Some(adapter), project_id).await
            })
            .await)
    }

    pub async fn get_data_health_by_provider(
        &self, project_id: &str, range: &DateRange,
    ) -> DomainResult<Vec<DomainDataHealthResult>> {
        validate_project_id(project_id)?;
        let accessor = &self.accessor;
        Ok(self
            .fan_out(|name, adapter| async move {
                accessor
                    .data_health_with(&name, Some(adapter), project_id, range)
                    .await
            })
            .await)
    }

    pub async fn get_aggregated_metrics(
        &self, project_id: &str, range: &DateRange,
    ) -> DomainResult<AggregatedMetricsReport> {
        let envelopes = self.get_metrics_by_provider(project_id, range).await?;
        let status = AggregateStatus::from_envelopes(&envelopes);
        let days = merge_daily_metrics(&envelopes);
        let totals = MetricTotals::from_days(&days);

        tracing::info!(
            project_id,
            range = %range,
            status = ?status,
            providers = envelopes.len(),
            days = days.len(),
            "Aggregated metrics"
        );

        Ok(AggregatedMetricsReport {
            status,
            days,
            totals,
            failures: collect_failures(&envelopes),
        })
    }

    pub async fn get_aggregated_hierarchy(
        &self, project_id: &str,
    ) -> DomainResult<AggregatedHierarchy> {
        let envelopes = self.get_hierarchy_by_provider(project_id).await?;
        let status = AggregateStatus::from_envelopes(&envelopes);
        let (by_provider, summary) = collect_hierarchies(&envelopes);

        tracing::info!(
            project_id,
            status = ?status,
            accounts = summary.total_accounts,
            campaigns = summary.total_campaigns,
            "Aggregated hierarchy"
        );

        Ok(AggregatedHierarchy {
            status,
            by_provider,
            summary,
            failures: collect_failures(&envelopes),
        })
    }

    pub async fn get_aggregated_data_health(
        &self, project_id: &str, range: &DateRange,
    ) -> DomainResult<AggregatedDataHealth> {
        let by_provider = self.get_data_health_by_provider(project_id, range).await?;
        let status = AggregateStatus::from_envelopes(&by_provider);
        let (overall, overall_confidence) =
            rollup_health(&by_provider, self.config.min_healthy_confidence);

        tracing::info!(
            project_id,
            range = %range,
            overall = %overall,
            overall_confidence,
            "Aggregated data health"
        );

        Ok(AggregatedDataHealth {
            status,
            overall,
            overall_confidence,
            by_provider,
        })
    }

    /// Runs `call` once per provider in a registry snapshot, bounded by
    /// `max_concurrent_providers`, and returns envelopes sorted by provider name.
    async fn fan_out<T, F, Fut>(&self, call: F) -> Vec<ProviderEnvelope<T>>
    where
        F: Fn(String, Arc<dyn ProviderAdapter>) -> Fut,
        Fut: Future<Output = ProviderEnvelope<T>>,
    {
        let snapshot = self.registry.snapshot();
        if snapshot.is_empty() {
            tracing::debug!("No providers registered, nothing to fan out to");
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_providers));

        let futures: Vec<_> = snapshot
            .into_iter()
            .map(|(name, adapter)| {
                let semaphore = Arc::clone(&semaphore);
                let call = call(name, adapter);
                async move {
                    let _permit = semaphore.acquire().await.ok();
                    call.await
                }
            })
            .collect();

        let mut envelopes = join_all(futures).await;
        envelopes.sort_by(|a, b| a.provider.cmp(&b.provider));
        envelopes
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use paidmedia_plugin_api::HealthStatus;
    use paidmedia_plugin_fixture::{
        FailureMode,
        FixtureMetricRow,
        FixturePlugin,
        FixtureSnapshot,
    };

    use super::*;
    use crate::domain::{
        DomainError,
        FetchStatus,
    };

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(date("2024-01-01"), date("2024-01-31")).unwrap()
    }

    fn fixture(rows: &[(&str, f64)]) -> Arc<FixturePlugin> {
        Arc::new(FixturePlugin::from_snapshot(FixtureSnapshot {
            metrics: rows
                .iter()
                .map(|(d, spend)| FixtureMetricRow {
                    date: date(d),
                    spend: *spend,
                    impressions: 0,
                    clicks: 0,
                    conversions: 0.0,
                    revenue: 0.0,
                })
                .collect(),
            ..Default::default()
        }))
    }

    fn service(registry: ProviderRegistry) -> PaidMediaService {
        PaidMediaService::new(
            Arc::new(registry),
            AggregationConfig {
                provider_timeout_secs: 1,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_scenario_meta_and_google() {
        let registry = ProviderRegistry::new();
        registry
            .register("meta", fixture(&[("2024-01-01", 100.0)]))
            .unwrap();
        registry
            .register(
                "google",
                fixture(&[("2024-01-01", 50.0), ("2024-01-02", 20.0)]),
            )
            .unwrap();

        let report = service(registry)
            .get_aggregated_metrics("proj", &range())
            .await
            .unwrap();

        assert_eq!(report.status, AggregateStatus::Complete);
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date, date("2024-01-01"));
        assert_eq!(report.days[0].spend, 150.0);
        assert_eq!(report.days[1].date, date("2024-01-02"));
        assert_eq!(report.days[1].spend, 20.0);
        assert_eq!(report.totals.spend, 170.0);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_isolation() {
        let registry = ProviderRegistry::new();
        registry
            .register(
                "meta",
                Arc::new(FixturePlugin::new().with_failure(FailureMode::Network)),
            )
            .unwrap();
        registry
            .register("google", fixture(&[("2024-01-03", 42.0)]))
            .unwrap();
        let service = service(registry);

        let report = service
            .get_aggregated_metrics("proj", &range())
            .await
            .unwrap();
        assert_eq!(report.status, AggregateStatus::Partial);
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.days[0].spend, 42.0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].provider, "meta");

        let by_provider = service
            .get_metrics_by_provider("proj", &range())
            .await
            .unwrap();
        assert_eq!(by_provider.len(), 2);
        assert_eq!(by_provider[0].provider, "google");
        assert_eq!(by_provider[0].status, FetchStatus::Success);
        assert_eq!(by_provider[1].provider, "meta");
        assert_eq!(by_provider[1].status, FetchStatus::Error);
    }

    #[tokio::test]
    async fn test_all_failed_differs_from_zero_activity() {
        let failing = ProviderRegistry::new();
        failing
            .register(
                "meta",
                Arc::new(FixturePlugin::new().with_failure(FailureMode::Auth)),
            )
            .unwrap();
        let failed = service(failing)
            .get_aggregated_metrics("proj", &range())
            .await
            .unwrap();

        let quiet = ProviderRegistry::new();
        quiet.register("meta", fixture(&[])).unwrap();
        let zero = service(quiet)
            .get_aggregated_metrics("proj", &range())
            .await
            .unwrap();

        assert_eq!(failed.status, AggregateStatus::AllFailed);
        assert!(!failed.is_zero_activity());
        assert_eq!(zero.status, AggregateStatus::Complete);
        assert!(zero.is_zero_activity());
        assert_ne!(failed, zero);
    }

    #[tokio::test]
    async fn test_slow_provider_does_not_block_others() {
        let registry = ProviderRegistry::new();
        registry
            .register(
                "tiktok",
                Arc::new(FixturePlugin::new().with_latency(Duration::from_secs(10))),
            )
            .unwrap();
        registry
            .register("meta", fixture(&[("2024-01-01", 5.0)]))
            .unwrap();

        let started = std::time::Instant::now();
        let report = service(registry)
            .get_aggregated_metrics("proj", &range())
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(report.status, AggregateStatus::Partial);
        assert_eq!(report.days[0].spend, 5.0);
    }

    #[tokio::test]
    async fn test_no_providers_health_is_unhealthy() {
        let health = service(ProviderRegistry::new())
            .get_aggregated_data_health("proj", &range())
            .await
            .unwrap();

        assert_eq!(health.overall, HealthStatus::Unhealthy);
        assert_eq!(health.status, AggregateStatus::NoProviders);
        assert!(health.by_provider.is_empty());
    }

    #[tokio::test]
    async fn test_hierarchy_keyed_by_provider() {
        let registry = ProviderRegistry::new();
        registry.register("meta", fixture(&[])).unwrap();
        registry
            .register(
                "google",
                Arc::new(FixturePlugin::new().with_failure(FailureMode::Timeout)),
            )
            .unwrap();

        let aggregated = service(registry)
            .get_aggregated_hierarchy("proj")
            .await
            .unwrap();

        assert_eq!(aggregated.status, AggregateStatus::Partial);
        assert!(aggregated.by_provider.contains_key("meta"));
        assert!(!aggregated.by_provider.contains_key("google"));
        assert_eq!(aggregated.by_provider["meta"].provider, "meta");
        assert_eq!(aggregated.summary.total_accounts, 0);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_completes() {
        let registry = ProviderRegistry::new();
        registry
            .register("meta", fixture(&[("2024-01-01", 5.0)]))
            .unwrap();
        registry
            .register("google", fixture(&[("2024-01-01", 1.0)]))
            .unwrap();
        let service = PaidMediaService::new(
            Arc::new(registry),
            AggregationConfig {
                max_concurrent_providers: 0,
                ..Default::default()
            },
        );

        let report = tokio::time::timeout(
            Duration::from_secs(3),
            service.get_aggregated_metrics("proj", &range()),
        )
        .await
        .expect("fan-out with zero concurrency hung")
        .unwrap();

        assert_eq!(report.status, AggregateStatus::Complete);
        assert_eq!(report.days[0].spend, 6.0);
    }

    #[tokio::test]
    async fn test_rejects_empty_project() {
        let result = service(ProviderRegistry::new())
            .get_aggregated_metrics("", &range())
            .await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }
}
