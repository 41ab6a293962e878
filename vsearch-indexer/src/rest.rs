//! Vertex AI Vector Search upserter over the REST API.
//!
//! This module is only available when the `rest` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::datapoint::Datapoint;
use crate::error::{IndexerError, Result};
use crate::upsert::{UpsertRequest, Upserter};

/// An [`Upserter`] that calls `indexes.upsertDatapoints`.
///
/// Uses `reqwest` against the regional endpoint
/// `https://{location}-aiplatform.googleapis.com/v1/`, authenticating each
/// call with a bearer token from the request's
/// [`TokenProvider`](crate::TokenProvider).
///
/// # Example
///
/// ```rust,ignore
/// use vsearch_indexer::rest::RestUpserter;
///
/// let upserter = Arc::new(RestUpserter::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RestUpserter {
    client: reqwest::Client,
    /// Overrides the regional endpoint; used for emulators and tests.
    base_url: Option<String>,
}

impl RestUpserter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an upserter from an existing HTTP client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client, base_url: None }
    }

    /// Send requests to `base_url` instead of the regional endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The `upsertDatapoints` URL for an index.
    pub fn endpoint(&self, project_id: &str, location: &str, index_id: &str) -> String {
        let base = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{location}-aiplatform.googleapis.com/v1"),
        };
        format!(
            "{base}/projects/{project_id}/locations/{location}/indexes/{index_id}:upsertDatapoints"
        )
    }
}

// ── Vector Search API request/response types ───────────────────────

#[derive(Serialize)]
struct UpsertDatapointsRequest<'a> {
    datapoints: &'a [Datapoint],
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── Upserter implementation ─────────────────────────────────────────

#[async_trait]
impl Upserter for RestUpserter {
    async fn upsert(&self, request: UpsertRequest) -> Result<()> {
        let url = self.endpoint(&request.project_id, &request.location, &request.index_id);
        let index_id = request.index_id.as_str();

        let token = request.auth.access_token().await?;

        debug!(index_id, batch_size = request.datapoints.len(), "upserting datapoints");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&UpsertDatapointsRequest { datapoints: &request.datapoints })
            .send()
            .await
            .map_err(|e| {
                error!(index_id, error = %e, "upsert request failed");
                IndexerError::UpsertError {
                    index_id: index_id.to_string(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(index_id, %status, "Vector Search API error");
            return Err(IndexerError::UpsertError {
                index_id: index_id.to_string(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_regional_endpoint() {
        let upserter = RestUpserter::new();
        assert_eq!(
            upserter.endpoint("proj", "us-central1", "123"),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/proj/locations/us-central1/indexes/123:upsertDatapoints"
        );
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let upserter = RestUpserter::new().with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            upserter.endpoint("p", "eu", "i"),
            "http://localhost:8080/v1/projects/p/locations/eu/indexes/i:upsertDatapoints"
        );
    }
}
