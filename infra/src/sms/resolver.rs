//! Connector configuration sources

use async_trait::async_trait;
use serde_json::Value;
use sg_core::{ConfigResolver, ConnectorError, ConnectorResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// In-memory configuration store
#[derive(Default)]
pub struct StaticConfigResolver {
    configs: RwLock<HashMap<String, Value>>,
}

impl StaticConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver holding a single connector configuration
    pub fn with_config(connector_id: impl Into<String>, config: Value) -> Self {
        let resolver = Self::new();
        resolver.insert(connector_id, config);
        resolver
    }

    /// Store or replace the configuration of `connector_id`
    pub fn insert(&self, connector_id: impl Into<String>, config: Value) {
        let mut configs = self
            .configs
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        configs.insert(connector_id.into(), config);
    }
}

#[async_trait]
impl ConfigResolver for StaticConfigResolver {
    async fn resolve(&self, connector_id: &str) -> ConnectorResult<Value> {
        let configs = self
            .configs
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        configs.get(connector_id).cloned().ok_or_else(|| {
            ConnectorError::invalid_config(format!(
                "No configuration stored for connector '{}'",
                connector_id
            ))
        })
    }
}

/// Reads `<dir>/<connector_id>.json` on every resolve
#[derive(Debug, Clone)]
pub struct FileConfigResolver {
    dir: PathBuf,
}

impl FileConfigResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, connector_id: &str) -> ConnectorResult<PathBuf> {
        let valid = !connector_id.is_empty()
            && connector_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConnectorError::invalid_config(format!(
                "Invalid connector id '{}'",
                connector_id
            )));
        }
        Ok(self.dir.join(format!("{}.json", connector_id)))
    }
}

#[async_trait]
impl ConfigResolver for FileConfigResolver {
    async fn resolve(&self, connector_id: &str) -> ConnectorResult<Value> {
        let path = self.path_for(connector_id)?;
        debug!(path = %path.display(), "Reading connector configuration");

        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ConnectorError::invalid_config(format!(
                "Cannot read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            ConnectorError::invalid_config(format!(
                "Malformed configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
