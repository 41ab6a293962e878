//! Property tests for datapoint assembly.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use vsearch_indexer::{
    ActionRegistry, Datapoint, Document, DocumentData, DocumentStore, Embedder, EmbedderRef,
    IndexConfig, IndexerAction, IndexerFactory, Result, StaticTokenProvider, UpsertRequest,
    Upserter,
};

/// Metadata carrying a random subset of the three filtering fields plus noise.
fn arb_metadata() -> impl Strategy<Value = (Map<String, Value>, bool, bool, bool)> {
    (any::<bool>(), any::<bool>(), any::<bool>(), "[a-z]{1,8}").prop_map(
        |(restricts, numeric, crowding, noise)| {
            let mut meta = Map::new();
            if restricts {
                meta.insert(
                    "restricts".into(),
                    json!([{ "namespace": "ns", "allowList": [noise.clone()] }]),
                );
            }
            if numeric {
                meta.insert(
                    "numericRestricts".into(),
                    json!([{ "namespace": "n", "valueDouble": 1.5, "op": "GREATER" }]),
                );
            }
            if crowding {
                meta.insert("crowdingTag".into(), json!({ "crowdingAttribute": noise.clone() }));
            }
            meta.insert("source".into(), Value::String(noise));
            (meta, restricts, numeric, crowding)
        },
    )
}

/// **Property: filter fields are present iff the source metadata had them**
mod prop_field_presence {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn optional_fields_mirror_metadata((meta, restricts, numeric, crowding) in arb_metadata()) {
            let dp = Datapoint::from_metadata("id", vec![0.0; 4], &meta).unwrap();
            prop_assert_eq!(dp.restricts.is_some(), restricts);
            prop_assert_eq!(dp.numeric_restricts.is_some(), numeric);
            prop_assert_eq!(dp.crowding_tag.is_some(), crowding);

            let wire = serde_json::to_value(&dp).unwrap();
            prop_assert_eq!(wire.get("restricts").is_some(), restricts);
            prop_assert_eq!(wire.get("numericRestricts").is_some(), numeric);
            prop_assert_eq!(wire.get("crowdingTag").is_some(), crowding);
        }
    }
}

struct HashEmbedder;

#[async_trait]
impl Embedder for HashEmbedder {
    fn name(&self) -> &str {
        "test/hash"
    }

    async fn embed(&self, documents: &[Document], _options: Option<&Value>) -> Result<Vec<Vec<f32>>> {
        Ok(documents
            .iter()
            .map(|d| d.text().bytes().take(3).map(f32::from).collect())
            .collect())
    }
}

struct TextIdStore;

#[async_trait]
impl DocumentStore for TextIdStore {
    async fn store(&self, documents: &[DocumentData], _options: Option<&Value>) -> Result<Vec<String>> {
        Ok(documents.iter().enumerate().map(|(i, _)| format!("id-{i}")).collect())
    }
}

#[derive(Default)]
struct Capture {
    datapoints: Mutex<Vec<Datapoint>>,
}

#[async_trait]
impl Upserter for Capture {
    async fn upsert(&self, request: UpsertRequest) -> Result<()> {
        self.datapoints.lock().unwrap().extend(request.datapoints);
        Ok(())
    }
}

/// **Property: N documents produce N positionally paired datapoints**
mod prop_positional_pairing {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn one_datapoint_per_document_in_order(
            texts in proptest::collection::vec("[a-z]{1,12}", 1..16),
            metas in proptest::collection::vec(arb_metadata(), 16),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let docs: Vec<DocumentData> = texts
                .iter()
                .zip(metas.iter())
                .map(|(t, (m, ..))| DocumentData::from_text(t.clone()).with_metadata(m.clone()))
                .collect();

            let points = rt.block_on(async {
                let registry = ActionRegistry::new();
                registry.register_embedder(Arc::new(HashEmbedder)).await;
                let capture = Arc::new(Capture::default());
                let factory = IndexerFactory::builder()
                    .project_id("p")
                    .index(IndexConfig::new("i").with_embedder(EmbedderRef::new("test/hash")))
                    .embedders(registry.embedders())
                    .document_store(Arc::new(TextIdStore))
                    .upserter(capture.clone())
                    .auth(Arc::new(StaticTokenProvider::new("t")))
                    .build()
                    .unwrap();
                let indexer = factory.indexers().unwrap().remove(0);
                indexer.index(docs.clone(), None).await.unwrap();
                let points = capture.datapoints.lock().unwrap().clone();
                points
            });

            prop_assert_eq!(points.len(), texts.len());
            for (i, (point, text)) in points.iter().zip(&texts).enumerate() {
                prop_assert_eq!(&point.datapoint_id, &format!("id-{i}"));
                let expected: Vec<f32> = text.bytes().take(3).map(f32::from).collect();
                prop_assert_eq!(&point.feature_vector, &expected);
                let (_, restricts, numeric, crowding) = &metas[i];
                prop_assert_eq!(point.restricts.is_some(), *restricts);
                prop_assert_eq!(point.numeric_restricts.is_some(), *numeric);
                prop_assert_eq!(point.crowding_tag.is_some(), *crowding);
            }
        }
    }
}
