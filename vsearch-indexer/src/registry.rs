//! Host-side action table.
//!
//! The [`ActionRegistry`] stands in for a plugin host: it holds the indexer
//! actions a factory registers and the embedders those indexers resolve.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::embedder::{Embedder, EmbedderRegistry, EmbedderResolver};
use crate::error::{IndexerError, Result};
use crate::indexer::IndexerAction;

/// Registered indexer actions plus the embedder table they draw from.
#[derive(Default)]
pub struct ActionRegistry {
    embedders: Arc<EmbedderRegistry>,
    indexers: RwLock<HashMap<String, Arc<dyn IndexerAction>>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedder table, to hand to an
    /// [`IndexerFactoryBuilder`](crate::IndexerFactoryBuilder).
    pub fn embedders(&self) -> Arc<dyn EmbedderResolver> {
        Arc::clone(&self.embedders) as Arc<dyn EmbedderResolver>
    }

    /// Register an embedder under its own name.
    pub async fn register_embedder(&self, embedder: Arc<dyn Embedder>) {
        debug!(embedder = embedder.name(), "registering embedder");
        self.embedders.register(embedder).await;
    }

    /// Register an indexer action.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if the name is already taken.
    pub async fn register_indexer(&self, indexer: Arc<dyn IndexerAction>) -> Result<()> {
        self.register_indexers(vec![indexer]).await.map(|_| ())
    }

    /// Register several indexer actions at once.
    ///
    /// Returns their names in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ConfigError`] if any name is already taken or
    /// appears twice in `batch`. Nothing is registered in that case.
    pub async fn register_indexers(
        &self,
        batch: Vec<Arc<dyn IndexerAction>>,
    ) -> Result<Vec<String>> {
        let mut indexers = self.indexers.write().await;
        let names: Vec<String> = batch.iter().map(|indexer| indexer.name().to_string()).collect();
        for (i, name) in names.iter().enumerate() {
            if indexers.contains_key(name) || names[..i].contains(name) {
                return Err(IndexerError::ConfigError(format!(
                    "indexer '{name}' is already registered"
                )));
            }
        }
        for (name, indexer) in names.iter().zip(batch) {
            debug!(indexer = %name, "registering indexer");
            indexers.insert(name.clone(), indexer);
        }
        Ok(names)
    }

    /// Look up an indexer by its action name.
    pub async fn indexer(&self, name: &str) -> Option<Arc<dyn IndexerAction>> {
        self.indexers.read().await.get(name).cloned()
    }

    /// Names of every registered indexer, sorted.
    pub async fn indexer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indexers.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}
