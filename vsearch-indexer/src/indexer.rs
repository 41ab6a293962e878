//! The indexer action: store → embed → upsert.
//!
//! A [`VectorSearchIndexer`] is built by
//! [`IndexerFactory`](crate::IndexerFactory) for one configured index and
//! exposed to the host through the [`IndexerAction`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use vsearch_indexer::{DocumentData, IndexerAction};
//!
//! let indexer = factory.indexers()?.remove(0);
//! indexer.index(vec![DocumentData::from_text("hello")], None).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::auth::TokenProvider;
use crate::datapoint::{Datapoint, Filters};
use crate::document::{Document, DocumentData};
use crate::embedder::{EmbedderRef, EmbedderResolver};
use crate::error::{IndexerError, Result};
use crate::store::DocumentStore;
use crate::upsert::{UpsertRequest, Upserter};

/// Namespace of every indexer action name.
pub const PROVIDER: &str = "vertexai";

/// The action name for an index: `vertexai/<index_id>`.
pub fn indexer_name(index_id: &str) -> String {
    format!("{PROVIDER}/{index_id}")
}

/// A named, invocable unit that indexes a batch of documents.
#[async_trait]
pub trait IndexerAction: Send + Sync {
    /// Namespaced action name.
    fn name(&self) -> &str;

    /// Label shown to users. Defaults to the action name.
    fn display_name(&self) -> &str {
        self.name()
    }

    /// JSON schema for the invocation options, if the action accepts any.
    fn config_schema(&self) -> Option<Value> {
        None
    }

    /// Index a batch of documents.
    async fn index(&self, documents: Vec<DocumentData>, options: Option<Value>) -> Result<()>;
}

/// Indexes documents into one Vector Search index.
///
/// Holds only its configuration and collaborator handles, so concurrent
/// invocations are independent of each other.
pub struct VectorSearchIndexer {
    pub(crate) name: String,
    pub(crate) display_name: Option<String>,
    pub(crate) index_id: String,
    pub(crate) project_id: String,
    pub(crate) location: String,
    pub(crate) embedder: EmbedderRef,
    pub(crate) embedders: Arc<dyn EmbedderResolver>,
    pub(crate) document_store: Arc<dyn DocumentStore>,
    pub(crate) upserter: Arc<dyn Upserter>,
    pub(crate) auth: Arc<dyn TokenProvider>,
}

impl VectorSearchIndexer {
    /// The target index id.
    pub fn index_id(&self) -> &str {
        &self.index_id
    }

    /// The resolved embedder reference.
    pub fn embedder(&self) -> &EmbedderRef {
        &self.embedder
    }

    fn check_len(stage: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(IndexerError::LengthMismatch { stage, expected, actual })
        }
    }
}

impl std::fmt::Debug for VectorSearchIndexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorSearchIndexer")
            .field("name", &self.name)
            .field("index_id", &self.index_id)
            .field("project_id", &self.project_id)
            .field("location", &self.location)
            .field("embedder", &self.embedder.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IndexerAction for VectorSearchIndexer {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    fn config_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "description": "Options forwarded to the document store for this call",
            "additionalProperties": true
        }))
    }

    async fn index(&self, documents: Vec<DocumentData>, options: Option<Value>) -> Result<()> {
        let index_id = self.index_id.as_str();
        if documents.is_empty() {
            info!(index_id, batch_size = 0, "indexed documents (empty batch)");
            return Ok(());
        }
        let batch_size = documents.len();

        // 0. Parse filtering metadata before anything is persisted
        let filters = documents
            .iter()
            .map(|doc| match &doc.metadata {
                Some(metadata) => Filters::from_metadata(metadata),
                None => Ok(Filters::default()),
            })
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| error!(index_id, error = %e, "invalid document metadata"))?;

        // 1. Persist content and metadata, get one id per document
        let ids =
            self.document_store.store(&documents, options.as_ref()).await.map_err(|e| {
                error!(index_id, error = %e, "document store failed");
                IndexerError::DocumentStorage { source: Box::new(e) }
            })?;
        Self::check_len("document store", batch_size, ids.len())?;

        // 2. Resolve the embedder
        let embedder = self.embedders.resolve(&self.embedder.name).await.ok_or_else(|| {
            error!(index_id, embedder = %self.embedder.name, "embedder not registered");
            IndexerError::EmbedderNotFound {
                name: self.embedder.name.clone(),
                index_id: index_id.to_string(),
            }
        })?;

        // 3. Normalize and embed the whole batch at once
        let documents: Vec<Document> = documents.into_iter().map(Document::from).collect();
        debug!(index_id, embedder = embedder.name(), batch_size, "embedding batch");
        let embeddings = embedder.embed(&documents, self.embedder.options.as_ref()).await?;
        Self::check_len("embedder", batch_size, embeddings.len())?;

        // 4. Pair ids with vectors positionally
        let datapoints: Vec<Datapoint> = ids
            .into_iter()
            .zip(embeddings)
            .zip(filters)
            .map(|((id, vector), filters)| Datapoint::new(id, vector).with_filters(filters))
            .collect();

        // 5. Upsert; errors are returned unchanged
        self.upserter
            .upsert(UpsertRequest {
                datapoints,
                auth: Arc::clone(&self.auth),
                project_id: self.project_id.clone(),
                location: self.location.clone(),
                index_id: self.index_id.clone(),
            })
            .await?;

        info!(index_id, batch_size, "indexed documents");
        Ok(())
    }
}
