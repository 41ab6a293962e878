// @generated by vsearch-bundle. DO NOT EDIT.
pub const OVERVIEW_CONTEXT: &str = "# vsearch overview\n\nvsearch connects document indexing to Vertex AI Vector Search.\n\nEach configured index becomes an indexer action named `vertexai/<indexId>`.\nCalling an indexer with a batch of documents runs three steps:\n\n1. The document store persists content and metadata and returns one id per document.\n2. The index's embedder turns the whole batch into embedding vectors, one per document, in order.\n3. The ids and vectors are paired into datapoints and upserted into the index.\n\nThe vector index only stores ids, vectors and filter tags. Document text and\nmetadata stay in the document store, keyed by the same ids.\n\n## Errors\n\n- A failure in the document store is reported as \"error storing document content/metadata\" with the original error attached.\n- Embedding and upsert failures are reported exactly as the embedder or index returned them.\n- If the store or the embedder returns a different number of results than documents, the call fails before anything is upserted.";
