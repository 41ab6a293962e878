//! Upsert capability for vector indexes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::datapoint::Datapoint;
use crate::error::Result;

/// One upsert call: a batch of datapoints and where they go.
///
/// The request owns its datapoints; the upserter is their last consumer.
pub struct UpsertRequest {
    /// Datapoints to insert or replace.
    pub datapoints: Vec<Datapoint>,
    /// Credentials for the call.
    pub auth: Arc<dyn TokenProvider>,
    /// Cloud project id.
    pub project_id: String,
    /// Region of the index, e.g. `us-central1`.
    pub location: String,
    /// Target index id.
    pub index_id: String,
}

impl std::fmt::Debug for UpsertRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpsertRequest")
            .field("datapoints", &self.datapoints.len())
            .field("project_id", &self.project_id)
            .field("location", &self.location)
            .field("index_id", &self.index_id)
            .finish_non_exhaustive()
    }
}

/// Writes datapoints into a vector index.
///
/// Errors are returned to the indexer caller as-is.
#[async_trait]
pub trait Upserter: Send + Sync {
    async fn upsert(&self, request: UpsertRequest) -> Result<()>;
}

/// An [`Upserter`] that keeps datapoints in memory, keyed by index id and
/// datapoint id. A later upsert of the same id replaces the earlier one.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    indexes: RwLock<HashMap<String, HashMap<String, Datapoint>>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every datapoint in `index_id`, sorted by datapoint id.
    pub async fn datapoints(&self, index_id: &str) -> Vec<Datapoint> {
        let indexes = self.indexes.read().await;
        let mut points: Vec<Datapoint> =
            indexes.get(index_id).map(|m| m.values().cloned().collect()).unwrap_or_default();
        points.sort_by(|a, b| a.datapoint_id.cmp(&b.datapoint_id));
        points
    }
}

#[async_trait]
impl Upserter for InMemoryIndex {
    async fn upsert(&self, request: UpsertRequest) -> Result<()> {
        let count = request.datapoints.len();
        let mut indexes = self.indexes.write().await;
        let index = indexes.entry(request.index_id.clone()).or_default();
        for datapoint in request.datapoints {
            index.insert(datapoint.datapoint_id.clone(), datapoint);
        }
        debug!(backend = "InMemory", index_id = %request.index_id, count, "upserted datapoints");
        Ok(())
    }
}
