use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::Error;

/// Struct that reads the registry mirror config,
///
/// Example:
///
/// ```toml
/// [mirrors."docker.io"]
/// endpoints = ["http://198.158.0.0", "localhost:5000"]
///
/// [mirrors."*"]
/// endpoints = ["mirror.example.com"]
/// ```
///
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Mirrors keyed by registry host, or `*` for every host w/o its own entry
    ///
    #[serde(default)]
    mirrors: BTreeMap<String, Mirror>,
}

/// Endpoints to try before the upstream registry, in priority order,
///
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Mirror {
    /// Either a full url, ex. http://localhost:5000, or a bare host, ex. 10.0.0.2:5000
    ///
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl RegistryConfig {
    /// Tries to load the config from a toml file,
    ///
    pub async fn try_load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        event!(Level::DEBUG, "Loaded registry config from {:?}", path.as_ref());
        Self::try_load_content(content)
    }

    /// Tries to parse content as a registry config,
    ///
    pub fn try_load_content(content: impl AsRef<str>) -> Result<Self, Error> {
        Ok(toml::from_str(content.as_ref())?)
    }

    /// Sets the mirror endpoints for a host pattern, replacing any existing entry,
    ///
    pub fn with_mirror(
        mut self,
        host: impl Into<String>,
        endpoints: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.mirrors.insert(
            host.into(),
            Mirror {
                endpoints: endpoints.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Returns the mirror configured under exactly this host pattern,
    ///
    pub fn mirror(&self, host: &str) -> Option<&Mirror> {
        self.mirrors.get(host)
    }
}
