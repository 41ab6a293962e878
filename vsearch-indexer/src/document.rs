//! Data types for caller-supplied documents and their normalized form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One piece of document content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// A reference to media content.
    Media {
        /// Location of the media (URL or data URI).
        url: String,
        /// MIME type, when known.
        #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
    },
}

/// A document as handed to an indexer by the caller.
///
/// `metadata` is free-form; the keys `restricts`, `numericRestricts` and
/// `crowdingTag` are copied onto the datapoint built for this document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentData {
    /// The content parts of the document.
    pub content: Vec<Part>,
    /// Key-value metadata associated with the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl DocumentData {
    /// Create a single-part text document without metadata.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { content: vec![Part::Text { text: text.into() }], metadata: None }
    }

    /// Attach a metadata map.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// The normalized document representation passed to embedders.
///
/// Every [`DocumentData`] is converted through [`From`]; there is no other
/// way to construct one, so embedders always see the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    content: Vec<Part>,
    metadata: Map<String, Value>,
}

impl Document {
    /// The content parts.
    pub fn content(&self) -> &[Part] {
        &self.content
    }

    /// Concatenation of every text part.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::Media { .. } => None,
            })
            .collect()
    }

    /// The first media part, if any.
    pub fn media(&self) -> Option<(&str, Option<&str>)> {
        self.content.iter().find_map(|part| match part {
            Part::Media { url, content_type } => Some((url.as_str(), content_type.as_deref())),
            Part::Text { .. } => None,
        })
    }

    /// Metadata; empty when the source document had none.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

impl From<DocumentData> for Document {
    fn from(data: DocumentData) -> Self {
        Self { content: data.content, metadata: data.metadata.unwrap_or_default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_joins_text_parts_and_skips_media() {
        let data = DocumentData {
            content: vec![
                Part::Text { text: "hello ".into() },
                Part::Media { url: "gs://bucket/a.png".into(), content_type: None },
                Part::Text { text: "world".into() },
            ],
            metadata: None,
        };
        let doc = Document::from(data);
        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.media(), Some(("gs://bucket/a.png", None)));
        assert!(doc.metadata().is_empty());
    }

    #[test]
    fn deserializes_caller_json() {
        let data: DocumentData = serde_json::from_value(json!({
            "content": [{ "text": "abc" }, { "url": "https://x/y.jpg", "contentType": "image/jpeg" }],
            "metadata": { "crowdingTag": { "crowdingAttribute": "a" } }
        }))
        .unwrap();
        assert_eq!(data.content.len(), 2);
        assert!(matches!(&data.content[1], Part::Media { content_type: Some(ct), .. } if ct == "image/jpeg"));
        assert!(data.metadata.unwrap().contains_key("crowdingTag"));
    }
}
