use std::collections::HashMap;
use std::sync::{
    Arc,
    RwLock,
};

use crate::error::RegistryError;
use crate::plugin::ProviderAdapter;

const MAX_PROVIDER_NAME_LENGTH: usize = 64;

/// Immutable copy of the registry contents at one point in time
pub type ProviderSnapshot = HashMap<String, Arc<dyn ProviderAdapter>>;

/// Provider registry - maps provider names to adapter instances.
///
/// Written during bootstrap, read during request handling. Reads hand out
/// copies so an in-flight fan-out never observes a later registration.
pub struct ProviderRegistry {
    providers: RwLock<ProviderSnapshot>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Register an adapter under `name`, replacing and returning any previous one
    pub fn register(
        &self, name: &str, adapter: Arc<dyn ProviderAdapter>,
    ) -> Result<Option<Arc<dyn ProviderAdapter>>, RegistryError> {
        validate_provider_name(name)?;
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(providers.insert(name.to_string(), adapter))
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(name)
    }

    pub fn snapshot(&self) -> ProviderSnapshot {
        self.providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Registered names in lexicographic order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn count(&self) -> usize {
        self.providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_provider_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }

    if name.len() > MAX_PROVIDER_NAME_LENGTH {
        return Err(RegistryError::NameTooLong(
            name.to_string(),
            MAX_PROVIDER_NAME_LENGTH,
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(RegistryError::InvalidName(name.to_string()));
    }

    Ok(())
}
