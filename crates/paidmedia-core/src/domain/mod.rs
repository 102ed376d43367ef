pub mod envelope;
pub mod error;
pub mod health;
pub mod hierarchy;
pub mod metrics;
pub mod validation;

pub use envelope::{
    AggregateStatus,
    DomainDataHealthResult,
    DomainHierarchyResult,
    DomainMetricsResult,
    FetchStatus,
    ProviderEnvelope,
    ProviderErrorKind,
    ProviderFailure,
    ProviderFailureSummary,
};
pub use error::{
    DomainError,
    DomainResult,
};
pub use health::{
    effective_status,
    rollup_health,
    AggregatedDataHealth,
};
pub use hierarchy::{
    collect_hierarchies,
    AggregatedHierarchy,
    HierarchySummary,
};
pub use metrics::{
    merge_daily_metrics,
    AggregatedDailyMetrics,
    AggregatedMetricsReport,
    MetricTotals,
};
pub use validation::{
    coerce_health,
    coerce_hierarchy,
    coerce_metrics,
    parse_date_range,
    validate_project_id,
};
