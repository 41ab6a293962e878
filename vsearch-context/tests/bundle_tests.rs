//! Integration tests for context bundling.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use vsearch_context::{
    BundleConfig, BundleError, ContextDocument, GENERATED_MARKER, INDEXING_CONTEXT,
    OVERVIEW_CONTEXT, bundle, render_module,
};

/// Pull the string literal back out of a rendered module.
fn literal_of(module: &str, const_name: &str) -> String {
    let prefix = format!("{GENERATED_MARKER}\npub const {const_name}: &str = ");
    module.strip_prefix(&prefix).unwrap().strip_suffix(";\n").unwrap().to_string()
}

fn two_doc_config(root: &Path) -> BundleConfig {
    let context_dir = root.join("docs");
    BundleConfig {
        documents: vec![
            ContextDocument::new(context_dir.join("a.md"), root.join("out/a.rs"), "A"),
            ContextDocument::new(context_dir.join("b.md"), root.join("out/b.rs"), "B"),
        ],
        context_dir,
    }
}

#[tokio::test]
async fn hello_world_scenario() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs/a.md"), "Hello").unwrap();
    fs::write(root.join("docs/b.md"), "World\n").unwrap();

    let report = bundle(&two_doc_config(root)).await.unwrap();
    assert_eq!(report.written, vec![root.join("out/a.rs"), root.join("out/b.rs")]);

    let a = fs::read_to_string(root.join("out/a.rs")).unwrap();
    let b = fs::read_to_string(root.join("out/b.rs")).unwrap();
    assert_eq!(a, format!("{GENERATED_MARKER}\npub const A: &str = \"Hello\";\n"));
    assert_eq!(b, format!("{GENERATED_MARKER}\npub const B: &str = \"World\";\n"));
    assert_eq!(literal_of(&a, "A"), serde_json::to_string("Hello").unwrap());
}

#[tokio::test]
async fn outputs_are_overwritten() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::create_dir_all(root.join("out")).unwrap();
    fs::write(root.join("docs/a.md"), "new").unwrap();
    fs::write(root.join("docs/b.md"), "new").unwrap();
    fs::write(root.join("out/a.rs"), "stale").unwrap();

    bundle(&two_doc_config(root)).await.unwrap();
    assert_eq!(
        fs::read_to_string(root.join("out/a.rs")).unwrap(),
        render_module("A", "new")
    );
}

#[tokio::test]
async fn missing_directory_fails_before_any_output() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();

    let err = bundle(&two_doc_config(root)).await.unwrap_err();
    assert!(matches!(err, BundleError::MissingDirectory(ref p) if p == &root.join("docs")));
    assert!(!root.join("out").exists());
}

#[tokio::test]
async fn missing_source_fails_before_any_output() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs/a.md"), "present").unwrap();

    let err = bundle(&two_doc_config(root)).await.unwrap_err();
    assert!(matches!(err, BundleError::MissingSource(ref p) if p.ends_with("b.md")));
    assert!(!root.join("out").exists());
}

#[tokio::test]
async fn unreadable_document_fails_the_batch_and_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs/a.md"), "fine").unwrap();
    fs::write(root.join("docs/b.md"), [0xff, 0xfe, 0xfd]).unwrap();

    let err = bundle(&two_doc_config(root)).await.unwrap_err();
    match &err {
        BundleError::Incomplete(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].path.ends_with("b.md"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("failed to bundle 1 context document(s)"));
    assert!(!root.join("out/a.rs").exists());
}

#[tokio::test]
async fn invalid_constant_name_is_a_config_error() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs/a.md"), "x").unwrap();

    let config = BundleConfig {
        context_dir: root.join("docs"),
        documents: vec![ContextDocument::new(root.join("docs/a.md"), root.join("a.rs"), "not-valid")],
    };
    assert!(matches!(bundle(&config).await.unwrap_err(), BundleError::Config(_)));

    let empty = BundleConfig { context_dir: root.join("docs"), documents: Vec::new() };
    assert!(matches!(empty.validate().unwrap_err(), BundleError::Config(_)));
}

#[test]
fn checked_in_modules_match_their_sources() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = BundleConfig::standard(root);
    config.validate().unwrap();

    for doc in &config.documents {
        let source = fs::read_to_string(&doc.source).unwrap();
        let generated = fs::read_to_string(&doc.target).unwrap();
        assert_eq!(
            generated,
            render_module(&doc.const_name, &source),
            "{} is stale; run vsearch-bundle",
            doc.target.display()
        );
    }

    let overview = fs::read_to_string(root.join("context/overview.md")).unwrap();
    let indexing = fs::read_to_string(root.join("context/indexing.md")).unwrap();
    assert_eq!(OVERVIEW_CONTEXT, overview.trim());
    assert_eq!(INDEXING_CONTEXT, indexing.trim());
}

mod unicode_sample {
    include!("fixtures/unicode_sample.rs");
}

/// Non-ASCII text and control characters, surrounded by whitespace to trim.
const UNICODE_SOURCE: &str =
    "\n  naïve café\u{7}\tbell\u{1b}[0m\0 日本語 \"quoted\" back\\slash\u{7f}\r\nend \n\n";

#[test]
fn unicode_and_control_characters_compile_back_to_the_source() {
    let fixture = include_str!("fixtures/unicode_sample.rs");
    assert_eq!(render_module("UNICODE_SAMPLE", UNICODE_SOURCE), fixture);
    assert_eq!(unicode_sample::UNICODE_SAMPLE, UNICODE_SOURCE.trim());

    let literal = literal_of(fixture, "UNICODE_SAMPLE");
    assert!(literal.contains("naïve café"));
    assert!(literal.contains("\\u{1b}"));
    assert!(!literal.chars().any(|c| c.is_control()));
}

/// **Property: the generated literal parses back to the trimmed source**
mod prop_literal_round_trip {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn literal_parses_back_to_trimmed_content(content in "[ -~\n\r\t]{0,200}") {
            let module = render_module("DOC", &content);
            prop_assert!(module.starts_with(GENERATED_MARKER));

            let literal = literal_of(&module, "DOC");
            let parsed: String = serde_json::from_str(&literal).unwrap();
            prop_assert_eq!(parsed.as_str(), content.trim());
        }
    }
}
