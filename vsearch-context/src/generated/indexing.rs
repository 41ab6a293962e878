// @generated by vsearch-bundle. DO NOT EDIT.
pub const INDEXING_CONTEXT: &str = "# Configuring indexers\n\nEvery index entry needs an index id and an embedder. The embedder can be set on\nthe entry itself or once as the plugin default; an entry with neither is a\nconfiguration error and no indexers are created.\n\n```json\n{\n  \"projectId\": \"my-project\",\n  \"location\": \"us-central1\",\n  \"defaultEmbedder\": { \"name\": \"vertexai/text-embedding-005\" },\n  \"indexes\": [\n    { \"indexId\": \"1234567890\", \"displayName\": \"Products\" }\n  ]\n}\n```\n\n## Filtering metadata\n\nThree metadata keys on a document are copied onto its datapoint when present:\n\n- `restricts`: categorical filters, e.g. `[{ \"namespace\": \"color\", \"allowList\": [\"red\"] }]`\n- `numericRestricts`: numeric filters, e.g. `[{ \"namespace\": \"price\", \"valueInt\": 10 }]`\n- `crowdingTag`: a diversity tag, e.g. `{ \"crowdingAttribute\": \"brand-a\" }`\n\nKeys that are missing, or set to null, are left off the datapoint.\nOther metadata keys are kept in the document store only.";
