//! Vector Search datapoints and their filtering metadata.
//!
//! The field names follow the Vertex AI Vector Search `IndexDatapoint` JSON
//! shape, so a [`Datapoint`] serializes directly into an
//! `upsertDatapoints` request body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IndexerError, Result};

/// Metadata key holding categorical restricts.
pub const RESTRICTS_KEY: &str = "restricts";
/// Metadata key holding numeric restricts.
pub const NUMERIC_RESTRICTS_KEY: &str = "numericRestricts";
/// Metadata key holding the crowding tag.
pub const CROWDING_TAG_KEY: &str = "crowdingTag";

/// A categorical filter: tokens allowed or denied within a namespace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Restrict {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_list: Vec<String>,
}

/// Comparison used by a [`NumericRestrict`] at query time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericOperator {
    OperatorUnspecified,
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    NotEqual,
}

/// A numeric filter value within a namespace.
///
/// Exactly one of the value fields is normally set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumericRestrict {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_int: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_float: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_double: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<NumericOperator>,
}

/// Diversity tag: results sharing an attribute are capped per query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CrowdingTag {
    pub crowding_attribute: String,
}

/// A vector index record: an id, its embedding, and optional filter tags.
///
/// The optional fields are `None` exactly when the source document's
/// metadata did not carry them, and are then left out of the JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Datapoint {
    pub datapoint_id: String,
    pub feature_vector: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricts: Option<Vec<Restrict>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_restricts: Option<Vec<NumericRestrict>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowding_tag: Option<CrowdingTag>,
}

impl Datapoint {
    /// Create a datapoint with no filtering metadata.
    pub fn new(datapoint_id: impl Into<String>, feature_vector: Vec<f32>) -> Self {
        Self {
            datapoint_id: datapoint_id.into(),
            feature_vector,
            restricts: None,
            numeric_restricts: None,
            crowding_tag: None,
        }
    }

    /// Create a datapoint and copy filtering fields from document metadata.
    ///
    /// A key mapped to JSON `null` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::InvalidMetadata`] if a present field does not
    /// have the expected shape.
    pub fn from_metadata(
        datapoint_id: impl Into<String>,
        feature_vector: Vec<f32>,
        metadata: &Map<String, Value>,
    ) -> Result<Self> {
        Ok(Self::new(datapoint_id, feature_vector).with_filters(Filters::from_metadata(metadata)?))
    }

    /// Attach already-parsed filtering fields.
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.restricts = filters.restricts;
        self.numeric_restricts = filters.numeric_restricts;
        self.crowding_tag = filters.crowding_tag;
        self
    }
}

/// The filtering fields of one document, parsed from its metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub restricts: Option<Vec<Restrict>>,
    pub numeric_restricts: Option<Vec<NumericRestrict>>,
    pub crowding_tag: Option<CrowdingTag>,
}

impl Filters {
    /// Parse `restricts`, `numericRestricts` and `crowdingTag`. A key mapped
    /// to JSON `null` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::InvalidMetadata`] if a present field does not
    /// have the expected shape.
    pub fn from_metadata(metadata: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            restricts: extract(metadata, RESTRICTS_KEY)?,
            numeric_restricts: extract(metadata, NUMERIC_RESTRICTS_KEY)?,
            crowding_tag: extract(metadata, CROWDING_TAG_KEY)?,
        })
    }
}

fn extract<T: DeserializeOwned>(
    metadata: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>> {
    match metadata.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| IndexerError::InvalidMetadata { field, message: e.to_string() }),
    }
}
