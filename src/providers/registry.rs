use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::descriptor::{ParameterDescriptor, ProviderDescriptor};
use super::provider::{DscHandlerProvider, HandlerProvider, ProviderError};
use crate::checksum::ChecksumAlgorithm;
use crate::config::HandlerSettings;
use crate::handlers::{DscHandler, HandlerKind, IntegTestDscHandler, Ps5DscHandler};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("handler provider not found: {0}")]
    NotFound(String),

    #[error("handler provider already registered: {0}")]
    Duplicate(&'static str),

    #[error("no handler provider configured")]
    NotConfigured,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Built-in handler kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerVariant {
    Ps5,
    IntegTest,
}

impl HandlerVariant {
    pub const ALL: [HandlerVariant; 2] = [HandlerVariant::Ps5, HandlerVariant::IntegTest];

    pub fn name(self) -> &'static str {
        match self {
            HandlerVariant::Ps5 => Ps5DscHandler::NAME,
            HandlerVariant::IntegTest => IntegTestDscHandler::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.name() == name)
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|variant| variant.name()).collect()
    }

    pub fn provider(self, checksum: Arc<dyn ChecksumAlgorithm>) -> Arc<dyn DscHandlerProvider> {
        match self {
            HandlerVariant::Ps5 => Arc::new(HandlerProvider::<Ps5DscHandler>::new(checksum)),
            HandlerVariant::IntegTest => Arc::new(
                HandlerProvider::<IntegTestDscHandler>::with_constructor(checksum, || {
                    Ok(IntegTestDscHandler::with_sample())
                }),
            ),
        }
    }
}

/// Provider name with its bindable parameters, in published order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    #[serde(flatten)]
    pub descriptor: ProviderDescriptor,
    pub parameters: Vec<ParameterDescriptor>,
}

/// Registry mapping provider names to providers
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<&'static str, Arc<dyn DscHandlerProvider>>,
    configured: Option<&'static str>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one provider per built-in variant
    pub fn with_builtin(checksum: Arc<dyn ChecksumAlgorithm>) -> Self {
        let mut registry = Self::new();
        for variant in HandlerVariant::ALL {
            registry.providers.insert(
                variant.name(),
                variant.provider(Arc::clone(&checksum)),
            );
        }
        registry
    }

    /// Built-in registry with the configured provider selected and parameterized
    pub fn from_settings(
        settings: &HandlerSettings,
        checksum: Arc<dyn ChecksumAlgorithm>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::with_builtin(checksum);
        let provider = registry.get(&settings.provider)?;
        let descriptor = provider.describe();

        if !settings.params.is_empty() {
            provider.set_parameters(settings.params.clone())?;
        }

        info!(
            provider = descriptor.name,
            params = settings.params.len(),
            "Handler provider selected"
        );
        registry.configured = Some(descriptor.name);
        Ok(registry)
    }

    pub fn register(&mut self, provider: Arc<dyn DscHandlerProvider>) -> Result<(), RegistryError> {
        let name = provider.describe().name;
        if self.providers.contains_key(name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn DscHandlerProvider>, RegistryError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Provider chosen by [`from_settings`](Self::from_settings)
    pub fn configured(&self) -> Option<&'static str> {
        self.configured
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn DscHandler>, RegistryError> {
        Ok(self.get(name)?.produce()?)
    }

    pub fn resolve_configured(&self) -> Result<Arc<dyn DscHandler>, RegistryError> {
        let name = self.configured.ok_or(RegistryError::NotConfigured)?;
        self.resolve(name)
    }

    /// All providers, sorted by name
    pub fn summaries(&self) -> Vec<ProviderSummary> {
        self.providers
            .values()
            .map(|provider| ProviderSummary {
                descriptor: provider.describe(),
                parameters: provider.describe_parameters(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
