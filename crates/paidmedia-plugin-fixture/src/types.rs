use chrono::{
    DateTime,
    NaiveDate,
    Utc,
};
use paidmedia_plugin_api::{
    AdAccount,
    HealthStatus,
};
use serde::{
    Deserialize,
    Serialize,
};

/// On-disk snapshot served by the fixture adapter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSnapshot {
    /// When set, requests for any other project are rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub metrics: Vec<FixtureMetricRow>,
    #[serde(default)]
    pub accounts: Vec<AdAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_health: Option<FixtureHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureMetricRow {
    pub date: NaiveDate,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: f64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureHealth {
    pub status: HealthStatus,
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
    #[serde(default = "default_fresh")]
    pub is_fresh: bool,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub backlog_count: u64,
    pub confidence: f64,
    #[serde(default)]
    pub issues: Vec<String>,
}

fn default_fresh() -> bool {
    true
}
