pub mod loader;
pub mod schema;

pub use loader::{
    ConfigLoadError,
    ConfigLoadResult,
    ConfigLoader,
};
pub use schema::{
    AggregationConfig,
    ConfigKey,
    LoggingConfig,
    PaidMediaConfig,
    ProviderFileConfig,
};
