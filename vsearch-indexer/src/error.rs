//! Error types for the `vsearch-indexer` crate.

use thiserror::Error;

/// Errors that can occur while building or invoking indexers.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// A configuration validation error. Raised before any indexer runs.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The document store failed to persist a batch.
    ///
    /// The store's own error is kept as the source so callers can still
    /// inspect it.
    #[error("error storing document content/metadata: {source}")]
    DocumentStorage {
        /// The error reported by the document store.
        #[source]
        source: Box<IndexerError>,
    },

    /// No embedder is registered under the referenced name.
    #[error("embedder '{name}' is not registered (index '{index_id}')")]
    EmbedderNotFound {
        /// The referenced embedder name.
        name: String,
        /// The index whose indexer looked it up.
        index_id: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({embedder}): {message}")]
    EmbeddingError {
        /// The embedder that produced the error.
        embedder: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the document store backend.
    #[error("Document store error ({backend}): {message}")]
    StoreError {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The vector index rejected or failed an upsert.
    #[error("Upsert error ({index_id}): {message}")]
    UpsertError {
        /// The target index.
        index_id: String,
        /// A description of the failure.
        message: String,
    },

    /// The auth handle could not produce a credential.
    #[error("Auth error: {0}")]
    AuthError(String),

    /// A collaborator returned a different number of results than documents.
    #[error("{stage} returned {actual} results for {expected} documents")]
    LengthMismatch {
        /// Which step produced the mismatched batch.
        stage: &'static str,
        /// The number of documents in the batch.
        expected: usize,
        /// The number of results the step returned.
        actual: usize,
    },

    /// A filtering field in document metadata has the wrong shape.
    #[error("invalid '{field}' metadata: {message}")]
    InvalidMetadata {
        /// The metadata key (`restricts`, `numericRestricts`, `crowdingTag`).
        field: &'static str,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for indexer operations.
pub type Result<T> = std::result::Result<T, IndexerError>;
