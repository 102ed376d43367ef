use std::collections::{
    BTreeMap,
    BTreeSet,
};

use chrono::NaiveDate;
use paidmedia_plugin_api::PaidMediaDailyMetrics;
use serde::{
    Deserialize,
    Serialize,
};

use super::envelope::{
    AggregateStatus,
    DomainMetricsResult,
    ProviderFailureSummary,
};

/// Element-wise sum of every provider's row for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDailyMetrics {
    pub date: NaiveDate,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: f64,
    pub revenue: f64,
    /// Providers that reported a row for this date
    pub contributing_providers: BTreeSet<String>,
}

impl AggregatedDailyMetrics {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            spend: 0.0,
            impressions: 0,
            clicks: 0,
            conversions: 0.0,
            revenue: 0.0,
            contributing_providers: BTreeSet::new(),
        }
    }

    fn add(&mut self, row: &PaidMediaDailyMetrics) {
        self.spend += row.spend;
        self.impressions = self.impressions.saturating_add(row.impressions);
        self.clicks = self.clicks.saturating_add(row.clicks);
        self.conversions += row.conversions;
        self.revenue += row.revenue;
        self.contributing_providers.insert(row.provider.clone());
    }

    pub fn ctr(&self) -> Option<f64> {
        ratio(self.clicks as f64, self.impressions as f64)
    }

    pub fn cpc(&self) -> Option<f64> {
        ratio(self.spend, self.clicks as f64)
    }

    pub fn roas(&self) -> Option<f64> {
        ratio(self.revenue, self.spend)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTotals {
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: f64,
    pub revenue: f64,
}

impl MetricTotals {
    pub fn from_days(days: &[AggregatedDailyMetrics]) -> Self {
        days.iter().fold(Self::default(), |mut acc, day| {
            acc.spend += day.spend;
            acc.impressions = acc.impressions.saturating_add(day.impressions);
            acc.clicks = acc.clicks.saturating_add(day.clicks);
            acc.conversions += day.conversions;
            acc.revenue += day.revenue;
            acc
        })
    }

    pub fn roas(&self) -> Option<f64> {
        ratio(self.revenue, self.spend)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetricsReport {
    pub status: AggregateStatus,
    pub days: Vec<AggregatedDailyMetrics>,
    pub totals: MetricTotals,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ProviderFailureSummary>,
}

impl AggregatedMetricsReport {
    /// True only when providers answered and every one of them reported nothing
    pub fn is_zero_activity(&self) -> bool {
        !self.status.is_unavailable()
            && self
                .days
                .iter()
                .all(|d| {
                    d.spend == 0.0
                        && d.impressions == 0
                        && d.clicks == 0
                        && d.conversions == 0.0
                        && d.revenue == 0.0
                })
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Sums successful envelopes by calendar date.
///
/// Output dates are the union of dates any successful provider reported; a
/// provider missing a date adds zero and is left out of that date's
/// `contributing_providers`. Envelopes are folded in provider-name order so the
/// result never depends on which provider finished first.
pub fn merge_daily_metrics(envelopes: &[DomainMetricsResult]) -> Vec<AggregatedDailyMetrics> {
    let mut ordered: Vec<&DomainMetricsResult> =
        envelopes.iter().filter(|e| e.is_success()).collect();
    ordered.sort_by(|a, b| a.provider.cmp(&b.provider));

    let mut by_date: BTreeMap<NaiveDate, AggregatedDailyMetrics> = BTreeMap::new();
    for envelope in ordered {
        for row in envelope.data.iter().flatten() {
            by_date
                .entry(row.date)
                .or_insert_with(|| AggregatedDailyMetrics::zero(row.date))
                .add(row);
        }
    }

    by_date.into_values().collect()
}
