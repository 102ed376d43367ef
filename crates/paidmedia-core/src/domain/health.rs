use paidmedia_plugin_api::{
    HealthStatus,
    PaidMediaDataHealth,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::envelope::{
    AggregateStatus,
    DomainDataHealthResult,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDataHealth {
    pub status: AggregateStatus,
    pub overall: HealthStatus,
    /// Minimum confidence across providers; an erroring provider counts as 0
    pub overall_confidence: f64,
    pub by_provider: Vec<DomainDataHealthResult>,
}

/// Reported status, downgraded when the data is stale or not trustworthy enough
pub fn effective_status(health: &PaidMediaDataHealth, min_healthy_confidence: f64) -> HealthStatus {
    match health.status {
        HealthStatus::Healthy if !health.is_fresh || health.confidence < min_healthy_confidence => {
            HealthStatus::Degraded
        }
        status => status,
    }
}

/// Rolls provider health into one verdict and confidence.
///
/// `Healthy` needs every provider healthy. No providers, or nothing but errors
/// and unhealthy reports, is `Unhealthy`. Anything in between is `Degraded`.
pub fn rollup_health(
    envelopes: &[DomainDataHealthResult], min_healthy_confidence: f64,
) -> (HealthStatus, f64) {
    if envelopes.is_empty() {
        return (HealthStatus::Unhealthy, 0.0);
    }

    let mut healthy = 0usize;
    let mut unavailable = 0usize;
    let mut confidence = 1.0_f64;

    for envelope in envelopes {
        match envelope.data.as_ref() {
            Some(health) => {
                confidence = confidence.min(health.confidence);
                match effective_status(health, min_healthy_confidence) {
                    HealthStatus::Healthy => healthy += 1,
                    HealthStatus::Degraded => {}
                    HealthStatus::Unhealthy => unavailable += 1,
                }
            }
            None => {
                confidence = 0.0;
                unavailable += 1;
            }
        }
    }

    let verdict = if healthy == envelopes.len() {
        HealthStatus::Healthy
    } else if unavailable == envelopes.len() {
        HealthStatus::Unhealthy
    } else {
        HealthStatus::Degraded
    };

    (verdict, confidence)
}
