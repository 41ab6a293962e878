//! Embedder capability and name-based embedder resolution.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::document::Document;
use crate::error::Result;

/// A capability that maps a batch of documents to embedding vectors.
///
/// Implementations must return exactly one vector per input document, in
/// input order. Errors are surfaced to the indexer caller unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use vsearch_indexer::{Document, DocumentData, Embedder};
///
/// let docs = vec![Document::from(DocumentData::from_text("hello"))];
/// let vectors = embedder.embed(&docs, None).await?;
/// assert_eq!(vectors.len(), docs.len());
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// The name this embedder is registered under.
    fn name(&self) -> &str;

    /// Embed a batch of normalized documents.
    async fn embed(&self, documents: &[Document], options: Option<&Value>)
    -> Result<Vec<Vec<f32>>>;
}

/// A reference to an embedder by registered name, plus per-index options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedderRef {
    /// Registered embedder name, e.g. `vertexai/text-embedding-005`.
    pub name: String,
    /// Options passed to every `embed` call made through this reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl EmbedderRef {
    /// Reference an embedder by name with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), options: None }
    }

    /// Set the options passed to the embedder.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// Looks up embedders by name when an indexer runs.
#[async_trait]
pub trait EmbedderResolver: Send + Sync {
    /// Return the embedder registered under `name`, if any.
    async fn resolve(&self, name: &str) -> Option<Arc<dyn Embedder>>;
}

/// A name-keyed table of embedders.
///
/// Embedders may be registered before or after the indexers that reference
/// them are built; lookups happen per invocation.
#[derive(Default)]
pub struct EmbedderRegistry {
    embedders: RwLock<HashMap<String, Arc<dyn Embedder>>>,
}

impl EmbedderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an embedder under its own name, replacing any previous one.
    pub async fn register(&self, embedder: Arc<dyn Embedder>) {
        let name = embedder.name().to_string();
        self.embedders.write().await.insert(name, embedder);
    }

    /// Names of every registered embedder, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.embedders.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl EmbedderResolver for EmbedderRegistry {
    async fn resolve(&self, name: &str) -> Option<Arc<dyn Embedder>> {
        self.embedders.read().await.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl Embedder for Fixed {
        fn name(&self) -> &str {
            "test/fixed"
        }

        async fn embed(
            &self,
            documents: &[Document],
            _options: Option<&Value>,
        ) -> Result<Vec<Vec<f32>>> {
            Ok(documents.iter().map(|_| vec![1.0]).collect())
        }
    }

    #[tokio::test]
    async fn resolves_registered_embedders_by_name() {
        let registry = EmbedderRegistry::new();
        assert!(registry.resolve("test/fixed").await.is_none());

        registry.register(Arc::new(Fixed)).await;
        let embedder = registry.resolve("test/fixed").await.unwrap();
        assert_eq!(embedder.name(), "test/fixed");
        assert_eq!(registry.names().await, vec!["test/fixed".to_string()]);
    }
}
