//! Serializer/deserializer configuration.

use crate::error::{Result, SerdeError};
use crate::registry::RegistryClient;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Options for [`crate::serde_pair`].
///
/// `is_key` and `registry_url` can be loaded from YAML; the registry client
/// is a live handle and is attached with [`SerdeConfig::with_registry_client`].
///
/// ```yaml
/// is_key: true
/// registry_url: http://registry:8081
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerdeConfig {
    /// Whether the pair handles message keys rather than values.
    #[serde(default)]
    pub is_key: bool,

    /// Address of a schema registry. Only meaningful together with a
    /// registry client, which owns the transport.
    #[serde(default)]
    pub registry_url: Option<String>,

    #[serde(skip)]
    registry_client: Option<Arc<dyn RegistryClient>>,
}

impl SerdeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn key(mut self) -> Self {
        self.is_key = true;
        self
    }

    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = Some(url.into());
        self
    }

    pub fn with_registry_client(mut self, client: Arc<dyn RegistryClient>) -> Self {
        self.registry_client = Some(client);
        self
    }

    pub fn registry_client(&self) -> Option<&Arc<dyn RegistryClient>> {
        self.registry_client.as_ref()
    }

    /// Check that the options are consistent.
    ///
    /// A registry URL alone is rejected: no network transport is bundled, so
    /// the caller has to provide a [`RegistryClient`] that talks to it.
    pub fn validate(&self) -> Result<()> {
        match (&self.registry_url, &self.registry_client) {
            (Some(url), None) => Err(SerdeError::InvalidConfig(format!(
                "registry_url '{url}' is set but no registry client was provided"
            ))),
            (Some(url), Some(_)) if url.trim().is_empty() => {
                warn!("Empty registry_url ignored; using the provided registry client");
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for SerdeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeConfig")
            .field("is_key", &self.is_key)
            .field("registry_url", &self.registry_url)
            .field("registry_client", &self.registry_client.is_some())
            .finish()
    }
}
