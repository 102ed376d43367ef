use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{
    Duration,
    Instant,
};

use futures::FutureExt;
use paidmedia_plugin_api::{
    DateRange,
    ProviderAdapter,
    ProviderError,
    ProviderRegistry,
    ProviderResult,
};
use tokio::time::timeout;

use crate::domain::{
    coerce_health,
    coerce_hierarchy,
    coerce_metrics,
    DomainDataHealthResult,
    DomainHierarchyResult,
    DomainMetricsResult,
    ProviderEnvelope,
    ProviderErrorKind,
    ProviderFailure,
};

/// Calls exactly one adapter and always answers with an envelope.
///
/// Adapter errors, timeouts, panics and payloads that fail canonical coercion
/// are all converted into `status: error`; nothing escapes as a panic or `Err`.
pub struct ProviderAccessor {
    registry: Arc<ProviderRegistry>,
    provider_timeout: Duration,
}

impl ProviderAccessor {
    pub fn new(registry: Arc<ProviderRegistry>, provider_timeout: Duration) -> Self {
        Self {
            registry,
            provider_timeout,
        }
    }

    pub async fn get_metrics_from_provider(
        &self, provider_name: &str, project_id: &str, range: &DateRange,
    ) -> DomainMetricsResult {
        let adapter = self.registry.get(provider_name);
        self.metrics_with(provider_name, adapter, project_id, range)
            .await
    }

    pub async fn get_hierarchy_from_provider(
        &self, provider_name: &str, project_id: &str,
    ) -> DomainHierarchyResult {
        let adapter = self.registry.get(provider_name);
        self.hierarchy_with(provider_name, adapter, project_id).await
    }

    pub async fn get_data_health_from_provider(
        &self, provider_name: &str, project_id: &str, range: &DateRange,
    ) -> DomainDataHealthResult {
        let adapter = self.registry.get(provider_name);
        self.data_health_with(provider_name, adapter, project_id, range)
            .await
    }

    pub(crate) async fn metrics_with(
        &self, provider_name: &str, adapter: Option<Arc<dyn ProviderAdapter>>, project_id: &str,
        range: &DateRange,
    ) -> DomainMetricsResult {
        let Some(adapter) = adapter else {
            return not_registered(provider_name);
        };
        if !adapter.metadata().capabilities.metrics {
            return not_supported(provider_name, "fetch_daily_metrics");
        }

        self.guarded(
            provider_name,
            "fetch_daily_metrics",
            adapter.fetch_daily_metrics(project_id, range),
            |rows| coerce_metrics(provider_name, rows, range),
        )
        .await
    }

    pub(crate) async fn hierarchy_with(
        &self, provider_name: &str, adapter: Option<Arc<dyn ProviderAdapter>>, project_id: &str,
    ) -> DomainHierarchyResult {
        let Some(adapter) = adapter else {
            return not_registered(provider_name);
        };
        if !adapter.metadata().capabilities.hierarchy {
            return not_supported(provider_name, "fetch_hierarchy");
        }

        self.guarded(
            provider_name,
            "fetch_hierarchy",
            adapter.fetch_hierarchy(project_id),
            |hierarchy| coerce_hierarchy(provider_name, hierarchy),
        )
        .await
    }

    pub(crate) async fn data_health_with(
        &self, provider_name: &str, adapter: Option<Arc<dyn ProviderAdapter>>, project_id: &str,
        range: &DateRange,
    ) -> DomainDataHealthResult {
        let Some(adapter) = adapter else {
            return not_registered(provider_name);
        };
        if !adapter.metadata().capabilities.data_health {
            return not_supported(provider_name, "fetch_data_health");
        }

        self.guarded(
            provider_name,
            "fetch_data_health",
            adapter.fetch_data_health(project_id, range),
            |health| coerce_health(provider_name, health),
        )
        .await
    }

    async fn guarded<T, F, C>(
        &self, provider_name: &str, operation: &'static str, call: F, coerce: C,
    ) -> ProviderEnvelope<T>
    where
        F: Future<Output = ProviderResult<T>>,
        C: FnOnce(T) -> Result<T, String>,
    {
        let started = Instant::now();
        let outcome = timeout(self.provider_timeout, AssertUnwindSafe(call).catch_unwind()).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Ok(Ok(data))) => coerce(data).map_err(|msg| {
                ProviderFailure::new(ProviderErrorKind::ProviderMalformedResponse, msg)
            }),
            Ok(Ok(Err(e))) => Err(ProviderFailure::from(e)),
            Ok(Err(panic)) => Err(ProviderFailure::new(
                ProviderErrorKind::ProviderUnknownError,
                format!("Adapter panicked: {}", panic_message(panic.as_ref())),
            )),
            Err(_elapsed) => Err(ProviderFailure::new(
                ProviderErrorKind::ProviderTimeout,
                format!(
                    "Provider did not respond within {}ms",
                    self.provider_timeout.as_millis()
                ),
            )),
        };

        match result {
            Ok(data) => {
                tracing::debug!(
                    provider = provider_name,
                    operation,
                    duration_ms,
                    "Provider call succeeded"
                );
                ProviderEnvelope::success(provider_name, data, duration_ms)
            }
            Err(failure) => {
                tracing::warn!(
                    provider = provider_name,
                    operation,
                    duration_ms,
                    kind = %failure.kind,
                    error = %failure.message,
                    "Provider call failed"
                );
                ProviderEnvelope::failure(provider_name, failure, duration_ms)
            }
        }
    }
}

fn not_registered<T>(provider_name: &str) -> ProviderEnvelope<T> {
    tracing::warn!(provider = provider_name, "Provider not registered");
    ProviderEnvelope::failure(provider_name, ProviderFailure::not_registered(provider_name), 0)
}

/// Adapters that declare an operation unsupported are not called for it
fn not_supported<T>(provider_name: &str, operation: &'static str) -> ProviderEnvelope<T> {
    tracing::debug!(provider = provider_name, operation, "Skipped unsupported operation");
    let error = ProviderError::NotSupported(format!("{} not supported by provider", operation));
    ProviderEnvelope::failure(provider_name, ProviderFailure::from(error), 0)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
