use std::collections::{
    BTreeMap,
    HashSet,
};

use chrono::NaiveDate;
use paidmedia_plugin_api::{
    DateRange,
    PaidMediaDailyMetrics,
    PaidMediaDataHealth,
    PaidMediaHierarchy,
};

use super::{
    DomainError,
    DomainResult,
};

const MAX_PROJECT_ID_LENGTH: usize = 128;

pub fn validate_project_id(project_id: &str) -> DomainResult<()> {
    if project_id.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "Project ID cannot be empty".to_string(),
        ));
    }

    if project_id.len() > MAX_PROJECT_ID_LENGTH {
        return Err(DomainError::InvalidInput(format!(
            "Project ID exceeds maximum length of {} characters",
            MAX_PROJECT_ID_LENGTH
        )));
    }

    Ok(())
}

/// Parses caller-supplied `YYYY-MM-DD` bounds into an inclusive range
pub fn parse_date_range(start: &str, end: &str) -> DomainResult<DateRange> {
    let parse = |raw: &str| {
        raw.trim().parse::<NaiveDate>().map_err(|e| {
            DomainError::InvalidDateRange(format!("Invalid date '{}': {}", raw, e))
        })
    };

    DateRange::new(parse(start)?, parse(end)?).map_err(DomainError::InvalidDateRange)
}

/// Brings adapter rows into canonical form: tagged with the registered name,
/// within the window, one row per date, sorted. Errors describe a malformed response.
pub fn coerce_metrics(
    provider: &str, rows: Vec<PaidMediaDailyMetrics>, range: &DateRange,
) -> Result<Vec<PaidMediaDailyMetrics>, String> {
    let mut by_date: BTreeMap<_, PaidMediaDailyMetrics> = BTreeMap::new();
    let mut dropped = 0usize;

    for mut row in rows {
        for (field, value) in [
            ("spend", row.spend),
            ("conversions", row.conversions),
            ("revenue", row.revenue),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{} on {} must be a non-negative number, got {}",
                    field, row.date, value
                ));
            }
        }

        if !range.contains(row.date) {
            dropped += 1;
            continue;
        }

        row.provider = provider.to_string();
        match by_date.get_mut(&row.date) {
            Some(existing) => existing.checked_accumulate(&row).ok_or_else(|| {
                format!("counters on {} overflow when summing duplicate rows", row.date)
            })?,
            None => {
                by_date.insert(row.date, row);
            }
        }
    }

    if dropped > 0 {
        tracing::warn!(
            provider,
            dropped,
            range = %range,
            "Dropped metric rows outside the requested range"
        );
    }

    Ok(by_date.into_values().collect())
}

pub fn coerce_hierarchy(
    provider: &str, mut hierarchy: PaidMediaHierarchy,
) -> Result<PaidMediaHierarchy, String> {
    check_ids("account", hierarchy.accounts.iter().map(|a| a.id.as_str()))?;
    for account in &hierarchy.accounts {
        check_ids("campaign", account.campaigns.iter().map(|c| c.id.as_str()))?;
        for campaign in &account.campaigns {
            check_ids("ad set", campaign.ad_sets.iter().map(|s| s.id.as_str()))?;
            for ad_set in &campaign.ad_sets {
                check_ids("ad", ad_set.ads.iter().map(|a| a.id.as_str()))?;
            }
        }
    }

    hierarchy.provider = provider.to_string();
    Ok(hierarchy)
}

fn check_ids<'a>(level: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(format!("{} with empty id", level));
        }
        if !seen.insert(id) {
            return Err(format!("duplicate {} id '{}'", level, id));
        }
    }
    Ok(())
}

pub fn coerce_health(
    provider: &str, mut health: PaidMediaDataHealth,
) -> Result<PaidMediaDataHealth, String> {
    if !health.confidence.is_finite() || !(0.0..=1.0).contains(&health.confidence) {
        return Err(format!(
            "confidence must be within [0, 1], got {}",
            health.confidence
        ));
    }

    health.provider = provider.to_string();
    Ok(health)
}
