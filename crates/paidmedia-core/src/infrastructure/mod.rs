pub mod config;

pub use config::{
    AggregationConfig,
    ConfigKey,
    ConfigLoadError,
    ConfigLoader,
    LoggingConfig,
    PaidMediaConfig,
    ProviderFileConfig,
};
