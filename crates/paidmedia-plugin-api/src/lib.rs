pub mod error;
pub mod plugin;
pub mod registry;
pub mod types;

pub use error::{
    ProviderError,
    ProviderResult,
    RegistryError,
};
pub use plugin::{
    ProviderAdapter,
    ProviderCapabilities,
    ProviderMetadata,
};
pub use registry::{
    validate_provider_name,
    ProviderRegistry,
    ProviderSnapshot,
};
pub use types::{
    Ad,
    AdAccount,
    AdSet,
    Campaign,
    DateRange,
    HealthStatus,
    NodeStatus,
    PaidMediaDailyMetrics,
    PaidMediaDataHealth,
    PaidMediaHierarchy,
};

#[macro_export]
macro_rules! register_provider {
    ($adapter_type:ty) => {
        pub fn register(
            registry: &$crate::ProviderRegistry, name: &str,
        ) -> Result<(), $crate::RegistryError> {
            registry
                .register(name, ::std::sync::Arc::new(<$adapter_type>::default()))
                .map(|_| ())
        }
    };
}
