use paidmedia_plugin_api::{
    DateRange,
    HealthStatus,
    PaidMediaDailyMetrics,
    PaidMediaDataHealth,
    PaidMediaHierarchy,
};

use crate::types::{
    FixtureHealth,
    FixtureMetricRow,
    FixtureSnapshot,
};

pub(crate) fn map_metrics(
    provider: &str, rows: &[FixtureMetricRow], range: &DateRange,
) -> Vec<PaidMediaDailyMetrics> {
    rows.iter()
        .filter(|row| range.contains(row.date))
        .map(|row| PaidMediaDailyMetrics {
            provider: provider.to_string(),
            date: row.date,
            spend: row.spend,
            impressions: row.impressions,
            clicks: row.clicks,
            conversions: row.conversions,
            revenue: row.revenue,
        })
        .collect()
}

pub(crate) fn map_hierarchy(provider: &str, snapshot: &FixtureSnapshot) -> PaidMediaHierarchy {
    PaidMediaHierarchy {
        provider: provider.to_string(),
        accounts: snapshot.accounts.clone(),
    }
}

pub(crate) fn map_health(provider: &str, health: Option<&FixtureHealth>) -> PaidMediaDataHealth {
    match health {
        Some(h) => PaidMediaDataHealth {
            provider: provider.to_string(),
            status: h.status,
            last_sync_at: h.last_sync_at,
            is_fresh: h.is_fresh,
            error_count: h.error_count,
            backlog_count: h.backlog_count,
            confidence: h.confidence,
            issues: h.issues.clone(),
        },
        // A snapshot without health data has nothing to vouch for
        None => PaidMediaDataHealth {
            provider: provider.to_string(),
            status: HealthStatus::Unhealthy,
            last_sync_at: None,
            is_fresh: false,
            error_count: 0,
            backlog_count: 0,
            confidence: 0.0,
            issues: vec!["Snapshot has no data health section".to_string()],
        },
    }
}
