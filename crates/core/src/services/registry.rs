use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::config::BridgeConfig;
use crate::host::Execution;
use crate::model::Issue;
use crate::services::provider::{IssueError, IssueProvider, ProviderInfo};
use crate::services::tools::PmdIssueProvider;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("An issue provider with origin '{0}' is already registered")]
    DuplicateOrigin(String),
}

/// Registry of issue providers keyed by origin; populated by explicit calls at startup.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn IssueProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self { providers: HashMap::new() }
    }

    /// Register a provider; origins must be unique.
    pub fn register<P: IssueProvider + 'static>(
        &mut self,
        provider: P,
    ) -> Result<&mut Self, RegistryError> {
        let origin = provider.origin().to_string();
        if self.providers.contains_key(&origin) {
            return Err(RegistryError::DuplicateOrigin(origin));
        }
        self.providers.insert(origin, Box::new(provider));
        Ok(self)
    }

    pub fn get(&self, origin: &str) -> Option<&dyn IssueProvider> {
        self.providers.get(origin).map(|p| &**p)
    }

    /// Remove a provider, returning whether it was registered.
    pub fn unregister(&mut self, origin: &str) -> bool {
        self.providers.remove(origin).is_some()
    }

    /// Return a sorted list of registered origins for error messages/help.
    pub fn origins(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.providers.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Metadata of every registered provider, sorted by origin.
    pub fn infos(&self) -> Vec<&ProviderInfo> {
        let mut infos: Vec<&ProviderInfo> = self.providers.values().map(|p| p.info()).collect();
        infos.sort_by(|a, b| a.origin.cmp(&b.origin));
        infos
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Existing issues of `execution` from every registered provider, keyed by origin.
    ///
    /// Tools that did not run contribute an empty list. The first mapping failure
    /// aborts the whole collection.
    pub fn existing_issues_by_origin(
        &self,
        execution: &dyn Execution,
    ) -> Result<BTreeMap<String, Vec<Issue>>, IssueError> {
        let mut by_origin = BTreeMap::new();
        for origin in self.origins() {
            let provider = &self.providers[&origin];
            by_origin.insert(origin, provider.existing_issues(execution)?);
        }
        Ok(by_origin)
    }
}

/// Registry populated with every built-in provider.
pub fn default_provider_registry() -> Result<ProviderRegistry, RegistryError> {
    let mut registry = ProviderRegistry::new();
    registry.register(PmdIssueProvider::default())?;
    Ok(registry)
}

/// Default registry minus the origins the configuration disables.
pub fn provider_registry_from_config(
    config: &BridgeConfig,
) -> Result<ProviderRegistry, RegistryError> {
    let mut registry = default_provider_registry()?;
    for origin in &config.disabled_origins {
        registry.unregister(origin);
    }
    Ok(registry)
}
