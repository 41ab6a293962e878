//! Builds one [`VectorSearchIndexer`] per configured index.
//!
//! # Example
//!
//! ```rust,ignore
//! use vsearch_indexer::{IndexerFactory, IndexConfig, EmbedderRef};
//!
//! let factory = IndexerFactory::builder()
//!     .project_id("my-project")
//!     .location("us-central1")
//!     .index(IndexConfig::new("1234567890"))
//!     .default_embedder(EmbedderRef::new("vertexai/text-embedding-005"))
//!     .embedders(registry.embedders())
//!     .document_store(Arc::new(InMemoryDocumentStore::new()))
//!     .upserter(Arc::new(RestUpserter::new()))
//!     .auth(Arc::new(StaticTokenProvider::from_env()?))
//!     .build()?;
//!
//! let names = factory.register(&registry).await?;
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use crate::auth::TokenProvider;
use crate::config::{DEFAULT_LOCATION, IndexConfig, PluginConfig};
use crate::embedder::{EmbedderRef, EmbedderResolver};
use crate::error::{IndexerError, Result};
use crate::indexer::{IndexerAction, VectorSearchIndexer, indexer_name};
use crate::registry::ActionRegistry;
use crate::store::DocumentStore;
use crate::upsert::Upserter;

/// Produces indexer actions from index configurations.
///
/// Construct one via [`IndexerFactory::builder()`] or
/// [`IndexerFactory::from_config`].
pub struct IndexerFactory {
    project_id: String,
    location: String,
    indexes: Vec<IndexConfig>,
    default_embedder: Option<EmbedderRef>,
    embedders: Arc<dyn EmbedderResolver>,
    document_store: Arc<dyn DocumentStore>,
    upserter: Arc<dyn Upserter>,
    auth: Arc<dyn TokenProvider>,
}

impl IndexerFactory {
    /// Create a new [`IndexerFactoryBuilder`].
    pub fn builder() -> IndexerFactoryBuilder {
        IndexerFactoryBuilder::default()
    }

    /// Start a builder from a [`PluginConfig`]. The collaborators still have
    /// to be supplied.
    pub fn from_config(config: PluginConfig) -> IndexerFactoryBuilder {
        let mut builder = Self::builder().project_id(config.project_id).location(config.location);
        builder.indexes = config.indexes.into_iter().map(IndexConfig::from).collect();
        builder.default_embedder = config.default_embedder;
        builder
    }

    /// The configured indexes.
    pub fn indexes(&self) -> &[IndexConfig] {
        &self.indexes
    }

    /// Build one indexer per configured index.
    ///
    /// Returns an empty list when no indexes are configured.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if two indexes share an id, or
    /// if any index has no embedder and there is no default. No indexer is
    /// returned in either case.
    pub fn indexers(&self) -> Result<Vec<VectorSearchIndexer>> {
        let mut seen = HashSet::with_capacity(self.indexes.len());
        if let Some(dup) = self.indexes.iter().find(|i| !seen.insert(i.index_id.as_str())) {
            error!(index_id = %dup.index_id, "duplicate index id");
            return Err(IndexerError::ConfigError(format!(
                "index '{}' is configured more than once",
                dup.index_id
            )));
        }

        self.indexes
            .iter()
            .map(|index| -> Result<VectorSearchIndexer> {
                let embedder =
                    index.embedder.clone().or_else(|| self.default_embedder.clone()).ok_or_else(
                        || {
                            error!(index_id = %index.index_id, "no embedder configured");
                            IndexerError::ConfigError(format!(
                                "index '{}' has no embedder and no default embedder is configured",
                                index.index_id
                            ))
                        },
                    )?;

                Ok(VectorSearchIndexer {
                    name: indexer_name(&index.index_id),
                    display_name: index.display_name.clone(),
                    index_id: index.index_id.clone(),
                    project_id: self.project_id.clone(),
                    location: self.location.clone(),
                    embedder,
                    embedders: Arc::clone(&self.embedders),
                    document_store: index
                        .document_store
                        .clone()
                        .unwrap_or_else(|| Arc::clone(&self.document_store)),
                    upserter: Arc::clone(&self.upserter),
                    auth: Arc::clone(&self.auth),
                })
            })
            .collect()
    }

    /// Build every indexer and register it with `registry`.
    ///
    /// Returns the registered action names, in configuration order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if construction fails or a name
    /// is already registered. Either way nothing is registered.
    pub async fn register(&self, registry: &ActionRegistry) -> Result<Vec<String>> {
        let indexers: Vec<Arc<dyn IndexerAction>> = self
            .indexers()?
            .into_iter()
            .map(|indexer| Arc::new(indexer) as Arc<dyn IndexerAction>)
            .collect();
        let names = registry.register_indexers(indexers).await?;
        info!(count = names.len(), "registered indexers");
        Ok(names)
    }
}

impl std::fmt::Debug for IndexerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexerFactory")
            .field("project_id", &self.project_id)
            .field("location", &self.location)
            .field("indexes", &self.indexes)
            .field("default_embedder", &self.default_embedder)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing an [`IndexerFactory`].
///
/// `project_id` and every collaborator are required; `location` defaults to
/// `us-central1`.
#[derive(Default)]
pub struct IndexerFactoryBuilder {
    project_id: Option<String>,
    location: Option<String>,
    indexes: Vec<IndexConfig>,
    default_embedder: Option<EmbedderRef>,
    embedders: Option<Arc<dyn EmbedderResolver>>,
    document_store: Option<Arc<dyn DocumentStore>>,
    upserter: Option<Arc<dyn Upserter>>,
    auth: Option<Arc<dyn TokenProvider>>,
}

impl IndexerFactoryBuilder {
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add one index.
    pub fn index(mut self, index: IndexConfig) -> Self {
        self.indexes.push(index);
        self
    }

    /// Replace the index list.
    pub fn indexes(mut self, indexes: Vec<IndexConfig>) -> Self {
        self.indexes = indexes;
        self
    }

    /// Embedder for indexes that do not name their own.
    pub fn default_embedder(mut self, embedder: EmbedderRef) -> Self {
        self.default_embedder = Some(embedder);
        self
    }

    /// Where embedder references are looked up at invocation time.
    pub fn embedders(mut self, embedders: Arc<dyn EmbedderResolver>) -> Self {
        self.embedders = Some(embedders);
        self
    }

    /// Document store for indexes without their own.
    pub fn document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.document_store = Some(store);
        self
    }

    pub fn upserter(mut self, upserter: Arc<dyn Upserter>) -> Self {
        self.upserter = Some(upserter);
        self
    }

    pub fn auth(mut self, auth: Arc<dyn TokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the [`IndexerFactory`], validating that all required fields are set.
    ///
    /// Embedder references are checked later, by
    /// [`IndexerFactory::indexers`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if any required field is missing.
    pub fn build(self) -> Result<IndexerFactory> {
        let project_id = self
            .project_id
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| IndexerError::ConfigError("project_id is required".to_string()))?;
        let embedders = self
            .embedders
            .ok_or_else(|| IndexerError::ConfigError("embedders is required".to_string()))?;
        let document_store = self
            .document_store
            .ok_or_else(|| IndexerError::ConfigError("document_store is required".to_string()))?;
        let upserter = self
            .upserter
            .ok_or_else(|| IndexerError::ConfigError("upserter is required".to_string()))?;
        let auth =
            self.auth.ok_or_else(|| IndexerError::ConfigError("auth is required".to_string()))?;

        Ok(IndexerFactory {
            project_id,
            location: self.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            indexes: self.indexes,
            default_embedder: self.default_embedder,
            embedders,
            document_store,
            upserter,
            auth,
        })
    }
}
