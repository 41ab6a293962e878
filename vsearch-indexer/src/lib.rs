//! Vector Search indexer actions.
//!
//! For each configured index, an [`IndexerFactory`] produces a
//! [`VectorSearchIndexer`] that takes a batch of documents and:
//!
//! 0. parses `restricts`, `numericRestricts` and `crowdingTag` from each
//!    document's metadata, rejecting the batch if any is malformed,
//! 1. persists content and metadata through a [`DocumentStore`], getting
//!    back one id per document,
//! 2. embeds the batch with the index's [`Embedder`],
//! 3. pairs ids with vectors into [`Datapoint`]s carrying those filters,
//! 4. hands the datapoints to an [`Upserter`].
//!
//! Storage failures come back wrapped in [`IndexerError::DocumentStorage`];
//! embedding and upsert failures come back exactly as the collaborator
//! returned them.
//!
//! # Features
//!
//! - `rest`: [`rest::RestUpserter`], calling the Vertex AI
//!   `upsertDatapoints` REST endpoint with `reqwest`.

pub mod auth;
pub mod config;
pub mod datapoint;
pub mod document;
pub mod embedder;
pub mod error;
pub mod factory;
pub mod indexer;
pub mod registry;
pub mod store;
pub mod upsert;

#[cfg(feature = "rest")]
pub mod rest;

pub use auth::{StaticTokenProvider, TokenProvider};
pub use config::{IndexConfig, IndexDefinition, PluginConfig, PluginConfigBuilder};
pub use datapoint::{
    CrowdingTag, Datapoint, Filters, NumericOperator, NumericRestrict, Restrict,
};
pub use document::{Document, DocumentData, Part};
pub use embedder::{Embedder, EmbedderRef, EmbedderRegistry, EmbedderResolver};
pub use error::{IndexerError, Result};
pub use factory::{IndexerFactory, IndexerFactoryBuilder};
pub use indexer::{IndexerAction, PROVIDER, VectorSearchIndexer, indexer_name};
pub use registry::ActionRegistry;
pub use store::{DocumentStore, InMemoryDocumentStore};
pub use upsert::{InMemoryIndex, UpsertRequest, Upserter};
