//! Document storage capability.
//!
//! A vector index only keeps ids and vectors, so the document content and
//! metadata live in a [`DocumentStore`]. The ids it hands back become the
//! datapoint ids.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::DocumentData;
use crate::error::Result;

/// Persists document content and metadata and returns stable ids.
///
/// Implementations must return one id per document, in input order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a batch of documents. `options` are the invocation options the
    /// indexer was called with.
    async fn store(&self, documents: &[DocumentData], options: Option<&Value>)
    -> Result<Vec<String>>;
}

/// A [`DocumentStore`] that keeps documents in memory under UUID v4 ids.
///
/// Suitable for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, DocumentData>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored document by id.
    pub async fn get(&self, id: &str) -> Option<DocumentData> {
        self.documents.read().await.get(id).cloned()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn store(
        &self,
        documents: &[DocumentData],
        _options: Option<&Value>,
    ) -> Result<Vec<String>> {
        let mut stored = self.documents.write().await;
        let ids = documents
            .iter()
            .map(|doc| {
                let id = uuid::Uuid::new_v4().to_string();
                stored.insert(id.clone(), doc.clone());
                id
            })
            .collect::<Vec<_>>();
        debug!(backend = "InMemory", count = ids.len(), "stored documents");
        Ok(ids)
    }
}
