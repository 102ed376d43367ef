use std::collections::HashMap;
use std::sync::Arc;

use paidmedia_plugin_api::{
    ProviderAdapter,
    ProviderRegistry,
};

use crate::domain::{
    DomainError,
    DomainResult,
};
use crate::infrastructure::PaidMediaConfig;

/// Builds one adapter from its configured type and settings
pub fn create_provider(
    provider_type: &str, config: &HashMap<String, String>,
) -> DomainResult<Arc<dyn ProviderAdapter>> {
    match provider_type {
        "fixture" => paidmedia_plugin_fixture::FixturePlugin::from_config(config)
            .map(|p| Arc::new(p) as Arc<dyn ProviderAdapter>)
            .map_err(|e| DomainError::InvalidConfig(format!("Failed to create provider: {e}"))),
        _ => Err(DomainError::InvalidProviderType(format!(
            "Unknown provider type: {}",
            provider_type
        ))),
    }
}

/// Registry populated from every `[providers.<name>]` table
pub fn create_provider_registry(config: &PaidMediaConfig) -> DomainResult<ProviderRegistry> {
    let registry = ProviderRegistry::new();

    for (name, provider) in &config.providers {
        let adapter = create_provider(&provider.provider_type, &provider.config)?;
        registry.register(name, adapter)?;
        tracing::info!(
            provider = %name,
            provider_type = %provider.provider_type,
            "Registered provider"
        );
    }

    Ok(registry)
}
