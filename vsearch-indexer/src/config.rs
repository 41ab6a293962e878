//! Configuration for Vector Search indexers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::embedder::EmbedderRef;
use crate::error::{IndexerError, Result};
use crate::store::DocumentStore;

/// Environment variable holding the cloud project id.
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";
/// Environment variable holding the index location.
pub const LOCATION_ENV: &str = "GOOGLE_CLOUD_LOCATION";
/// Location used when none is configured.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// One target index, in serializable form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexDefinition {
    /// The Vector Search index id.
    pub index_id: String,
    /// Human-readable label for the indexer action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Embedder for this index; falls back to the plugin default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedder: Option<EmbedderRef>,
}

/// One target index with its runtime collaborators.
///
/// Built from an [`IndexDefinition`] or directly with [`IndexConfig::new`].
#[derive(Clone)]
pub struct IndexConfig {
    pub index_id: String,
    pub display_name: Option<String>,
    pub embedder: Option<EmbedderRef>,
    /// Overrides the factory's default document store for this index.
    pub document_store: Option<Arc<dyn DocumentStore>>,
}

impl IndexConfig {
    pub fn new(index_id: impl Into<String>) -> Self {
        Self { index_id: index_id.into(), display_name: None, embedder: None, document_store: None }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_embedder(mut self, embedder: EmbedderRef) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.document_store = Some(store);
        self
    }
}

impl std::fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexConfig")
            .field("index_id", &self.index_id)
            .field("display_name", &self.display_name)
            .field("embedder", &self.embedder)
            .field("document_store", &self.document_store.is_some())
            .finish()
    }
}

impl From<IndexDefinition> for IndexConfig {
    fn from(def: IndexDefinition) -> Self {
        Self {
            index_id: def.index_id,
            display_name: def.display_name,
            embedder: def.embedder,
            document_store: None,
        }
    }
}

/// Plugin-level configuration: where the indexes live and which to expose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    pub project_id: String,
    pub location: String,
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    /// Embedder used by indexes that do not name their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_embedder: Option<EmbedderRef>,
}

impl PluginConfig {
    /// Create a new builder for constructing a [`PluginConfig`].
    pub fn builder() -> PluginConfigBuilder {
        PluginConfigBuilder::default()
    }

    /// Read project and location from `GOOGLE_CLOUD_PROJECT` and
    /// `GOOGLE_CLOUD_LOCATION`. The location defaults to `us-central1`.
    /// No indexes are configured.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if the project id is not set.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var(PROJECT_ENV).map_err(|_| {
            IndexerError::ConfigError(format!("{PROJECT_ENV} environment variable not set"))
        })?;
        let location = std::env::var(LOCATION_ENV).unwrap_or_else(|_| DEFAULT_LOCATION.into());
        Self::builder().project_id(project_id).location(location).build()
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| IndexerError::ConfigError(format!("invalid plugin config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that project and location are set and index ids are non-empty
    /// and unique.
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(IndexerError::ConfigError("project_id must not be empty".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(IndexerError::ConfigError("location must not be empty".to_string()));
        }
        if let Some(pos) = self.indexes.iter().position(|i| i.index_id.trim().is_empty()) {
            return Err(IndexerError::ConfigError(format!("index #{pos} has an empty index_id")));
        }
        for (pos, index) in self.indexes.iter().enumerate() {
            if self.indexes[..pos].iter().any(|other| other.index_id == index.index_id) {
                return Err(IndexerError::ConfigError(format!(
                    "index #{pos} repeats index_id '{}'",
                    index.index_id
                )));
            }
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`PluginConfig`].
#[derive(Debug, Clone, Default)]
pub struct PluginConfigBuilder {
    project_id: Option<String>,
    location: Option<String>,
    indexes: Vec<IndexDefinition>,
    default_embedder: Option<EmbedderRef>,
}

impl PluginConfigBuilder {
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the location. Defaults to `us-central1`.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn default_embedder(mut self, embedder: EmbedderRef) -> Self {
        self.default_embedder = Some(embedder);
        self
    }

    /// Build the [`PluginConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if the project id is missing or
    /// any field fails [`PluginConfig::validate`].
    pub fn build(self) -> Result<PluginConfig> {
        let project_id = self
            .project_id
            .ok_or_else(|| IndexerError::ConfigError("project_id is required".to_string()))?;
        let config = PluginConfig {
            project_id,
            location: self.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            indexes: self.indexes,
            default_embedder: self.default_embedder,
        };
        config.validate()?;
        Ok(config)
    }
}
