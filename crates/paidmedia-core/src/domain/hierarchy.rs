use std::collections::BTreeMap;

use paidmedia_plugin_api::{
    NodeStatus,
    PaidMediaHierarchy,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::envelope::{
    AggregateStatus,
    DomainHierarchyResult,
    ProviderFailureSummary,
};

/// Scalar counts summed across every provider's tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchySummary {
    pub total_accounts: usize,
    pub total_campaigns: usize,
    pub active_campaigns: usize,
    pub total_ad_sets: usize,
    pub total_ads: usize,
}

impl HierarchySummary {
    pub fn of(hierarchy: &PaidMediaHierarchy) -> Self {
        Self {
            total_accounts: hierarchy.accounts.len(),
            total_campaigns: hierarchy.campaigns().count(),
            active_campaigns: hierarchy
                .campaigns()
                .filter(|c| c.status == NodeStatus::Active)
                .count(),
            total_ad_sets: hierarchy.ad_sets().count(),
            total_ads: hierarchy.ads().count(),
        }
    }

    fn add(&mut self, other: &HierarchySummary) {
        self.total_accounts += other.total_accounts;
        self.total_campaigns += other.total_campaigns;
        self.active_campaigns += other.active_campaigns;
        self.total_ad_sets += other.total_ad_sets;
        self.total_ads += other.total_ads;
    }
}

/// Provider trees side by side. Trees are never grafted: campaign ids are
/// only unique within their provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedHierarchy {
    pub status: AggregateStatus,
    pub by_provider: BTreeMap<String, PaidMediaHierarchy>,
    pub summary: HierarchySummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ProviderFailureSummary>,
}

pub fn collect_hierarchies(
    envelopes: &[DomainHierarchyResult],
) -> (BTreeMap<String, PaidMediaHierarchy>, HierarchySummary) {
    let mut by_provider = BTreeMap::new();
    let mut summary = HierarchySummary::default();

    for envelope in envelopes {
        if let Some(hierarchy) = envelope.data.as_ref() {
            summary.add(&HierarchySummary::of(hierarchy));
            by_provider.insert(envelope.provider.clone(), hierarchy.clone());
        }
    }

    (by_provider, summary)
}
