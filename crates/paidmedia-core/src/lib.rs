pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod plugins;

use std::sync::Arc;

pub use application::{
    PaidMediaService,
    ProviderAccessor,
};
pub use domain::{
    parse_date_range,
    AggregateStatus,
    AggregatedDailyMetrics,
    AggregatedDataHealth,
    AggregatedHierarchy,
    AggregatedMetricsReport,
    DomainDataHealthResult,
    DomainError,
    DomainHierarchyResult,
    DomainMetricsResult,
    DomainResult,
    FetchStatus,
    HierarchySummary,
    MetricTotals,
    ProviderEnvelope,
    ProviderErrorKind,
    ProviderFailure,
    ProviderFailureSummary,
};
pub use infrastructure::{
    AggregationConfig,
    ConfigLoader,
    LoggingConfig,
    PaidMediaConfig,
};
pub use paidmedia_plugin_api::{
    DateRange,
    HealthStatus,
    PaidMediaDailyMetrics,
    PaidMediaDataHealth,
    PaidMediaHierarchy,
    ProviderAdapter,
    ProviderRegistry,
};

/// Explicit home for the provider registry and the services built on it.
/// Each context is isolated, so tests can run several side by side.
pub struct PaidMediaContext {
    pub config: PaidMediaConfig,

    pub registry: Arc<ProviderRegistry>,

    pub service: Arc<PaidMediaService>,
}

impl PaidMediaContext {
    pub fn new(config: PaidMediaConfig, registry: Arc<ProviderRegistry>) -> Self {
        let service = Arc::new(PaidMediaService::new(
            Arc::clone(&registry),
            config.aggregation.clone(),
        ));

        Self {
            config,
            registry,
            service,
        }
    }

    /// Builds the registry from the `[providers.*]` tables in `config`
    pub fn from_config(config: PaidMediaConfig) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        let registry = plugins::create_provider_registry(&config)?;
        tracing::info!(
            providers = registry.count(),
            timeout_secs = config.aggregation.provider_timeout_secs,
            "Paid media context initialized"
        );

        Ok(Self::new(config, Arc::new(registry)))
    }

    pub fn load_default() -> anyhow::Result<Self> {
        let config = ConfigLoader::load_or_default()?;
        Self::from_config(config)
    }

    /// Installs the global tracing subscriber from the `[logging]` table
    pub fn init_logging(&self) -> anyhow::Result<()> {
        logging::init(&self.config.logging)
    }

    pub fn register_provider(
        &self, name: &str, adapter: Arc<dyn ProviderAdapter>,
    ) -> DomainResult<()> {
        if self.registry.register(name, adapter)?.is_some() {
            tracing::debug!(provider = name, "Replaced registered provider");
        }
        Ok(())
    }

    pub fn get_provider(&self, name: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.registry.get(name)
    }

    pub fn get_registered_providers(&self) -> paidmedia_plugin_api::ProviderSnapshot {
        self.registry.snapshot()
    }

    pub fn get_provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.registry.contains(name)
    }
}
