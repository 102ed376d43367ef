use paidmedia_plugin_api::*;

pub fn create_metadata() -> ProviderMetadata {
    ProviderMetadata {
        name: "Fixture".to_string(),
        provider_type: "fixture".to_string(),
        version: "0.1.0".to_string(),
        description: "Serves paid media data from a local JSON snapshot".to_string(),
        author: Some("Paidmedia Team".to_string()),
        capabilities: ProviderCapabilities {
            metrics: true,
            hierarchy: true,
            data_health: true,
        },
    }
}
