use chrono::{
    DateTime,
    NaiveDate,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Inclusive range of project-local calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = String;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Invalid date range: start {} is after end {}",
                start, end
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One provider's numbers for one day. Amounts are currency-neutral at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaDailyMetrics {
    pub provider: String,
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

impl PaidMediaDailyMetrics {
    pub fn zero(provider: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            provider: provider.into(),
            date,
            spend: 0.0,
            impressions: 0,
            clicks: 0,
            conversions: 0.0,
            revenue: 0.0,
        }
    }

    /// Adds another row's counters into this one, keeping this row's identity.
    /// Returns `None` and leaves `self` untouched if a count would overflow.
    pub fn checked_accumulate(&mut self, other: &PaidMediaDailyMetrics) -> Option<()> {
        let impressions = self.impressions.checked_add(other.impressions)?;
        let clicks = self.clicks.checked_add(other.clicks)?;

        self.spend += other.spend;
        self.impressions = impressions;
        self.clicks = clicks;
        self.conversions += other.conversions;
        self.revenue += other.revenue;
        Some(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Active,
    Paused,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: String,
    pub name: String,
    pub status: NodeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSet {
    pub id: String,
    pub name: String,
    pub status: NodeStatus,
    #[serde(default)]
    pub ads: Vec<Ad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: NodeStatus,
    #[serde(default)]
    pub ad_sets: Vec<AdSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: String,
    pub name: String,
    pub status: NodeStatus,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

/// Read-only snapshot of a provider's account tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaHierarchy {
    pub provider: String,
    #[serde(default)]
    pub accounts: Vec<AdAccount>,
}

impl PaidMediaHierarchy {
    pub fn empty(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            accounts: Vec::new(),
        }
    }

    pub fn campaigns(&self) -> impl Iterator<Item = &Campaign> {
        self.accounts.iter().flat_map(|a| a.campaigns.iter())
    }

    pub fn ad_sets(&self) -> impl Iterator<Item = &AdSet> {
        self.campaigns().flat_map(|c| c.ad_sets.iter())
    }

    pub fn ads(&self) -> impl Iterator<Item = &Ad> {
        self.ad_sets().flat_map(|s| s.ads.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Per-provider diagnostic for a requested window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidMediaDataHealth {
    pub provider: String,
    pub status: HealthStatus,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub is_fresh: bool,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub backlog_count: u64,
    /// Confidence in [0, 1] that the window's data is complete
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}
