pub mod aggregation_service;
pub mod provider_accessor;

pub use aggregation_service::PaidMediaService;
pub use provider_accessor::ProviderAccessor;
