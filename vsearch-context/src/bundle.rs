//! Markdown → Rust constant bundling.
//!
//! Each [`ContextDocument`] is read, trimmed, escaped as a string literal and
//! written out as a module exporting one `pub const NAME: &str`.
//!
//! # Example
//!
//! ```rust,ignore
//! use vsearch_context::{BundleConfig, bundle};
//!
//! let report = bundle(&BundleConfig::standard("vsearch-context")).await?;
//! println!("wrote {} modules", report.written.len());
//! ```

use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::error::{BundleError, DocumentFailure, Result};

/// First line of every generated module.
pub const GENERATED_MARKER: &str = "// @generated by vsearch-bundle. DO NOT EDIT.";

/// A Markdown source and the module generated from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Name of the exported constant; must be an uppercase identifier.
    pub const_name: String,
}

impl ContextDocument {
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        const_name: impl Into<String>,
    ) -> Self {
        Self { source: source.into(), target: target.into(), const_name: const_name.into() }
    }
}

/// What to bundle, and the directory that must exist first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    pub context_dir: PathBuf,
    pub documents: Vec<ContextDocument>,
}

impl BundleConfig {
    /// The two documents shipped with this crate, relative to `root`:
    /// `context/overview.md` and `context/indexing.md`, generated into
    /// `src/generated/`.
    pub fn standard(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let context_dir = root.join("context");
        let generated = root.join("src").join("generated");
        Self {
            documents: vec![
                ContextDocument::new(
                    context_dir.join("overview.md"),
                    generated.join("overview.rs"),
                    "OVERVIEW_CONTEXT",
                ),
                ContextDocument::new(
                    context_dir.join("indexing.md"),
                    generated.join("indexing.rs"),
                    "INDEXING_CONTEXT",
                ),
            ],
            context_dir,
        }
    }

    /// Check every precondition before anything is read or written.
    ///
    /// # Errors
    ///
    /// - [`BundleError::MissingDirectory`] if `context_dir` is not a directory
    /// - [`BundleError::MissingSource`] if a source file does not exist
    /// - [`BundleError::Config`] if there are no documents, a constant name is
    ///   not an uppercase identifier, or two documents share a target
    pub fn validate(&self) -> Result<()> {
        if !self.context_dir.is_dir() {
            return Err(BundleError::MissingDirectory(self.context_dir.clone()));
        }
        if self.documents.is_empty() {
            return Err(BundleError::Config("no context documents configured".to_string()));
        }
        for (i, doc) in self.documents.iter().enumerate() {
            if !doc.source.is_file() {
                return Err(BundleError::MissingSource(doc.source.clone()));
            }
            if !is_const_ident(&doc.const_name) {
                return Err(BundleError::Config(format!(
                    "'{}' is not a valid constant name",
                    doc.const_name
                )));
            }
            if self.documents[..i].iter().any(|other| other.target == doc.target) {
                return Err(BundleError::Config(format!(
                    "two documents generate {}",
                    doc.target.display()
                )));
            }
        }
        Ok(())
    }
}

/// Paths written by a successful [`bundle`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleReport {
    pub written: Vec<PathBuf>,
}

fn is_const_ident(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase() || c == '_')
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && name != "_"
}

/// Quote `content` as a Rust string literal.
///
/// Uses the `Debug` encoding of `str`: `"`, `\`, and control characters are
/// escaped. For printable text this matches JSON string escaping.
pub fn escape_literal(content: &str) -> String {
    format!("{content:?}")
}

/// Render the generated module for one document.
pub fn render_module(const_name: &str, content: &str) -> String {
    format!(
        "{GENERATED_MARKER}\npub const {const_name}: &str = {};\n",
        escape_literal(content.trim())
    )
}

async fn read_and_render(doc: &ContextDocument) -> std::result::Result<String, DocumentFailure> {
    let content = tokio::fs::read_to_string(&doc.source)
        .await
        .map_err(|source| DocumentFailure { path: doc.source.clone(), source })?;
    debug!(path = %doc.source.display(), bytes = content.len(), "read context document");
    Ok(render_module(&doc.const_name, &content))
}

async fn write_module(target: &Path, module: &str) -> std::result::Result<(), DocumentFailure> {
    let fail = |source| DocumentFailure { path: target.to_path_buf(), source };
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(fail)?;
    }
    tokio::fs::write(target, module).await.map_err(fail)
}

/// Generate every configured module.
///
/// Documents are read concurrently. A failure on one document does not stop
/// the others from being read, but if any read failed nothing is written.
/// Outputs are overwritten unconditionally.
///
/// # Errors
///
/// Returns the [`BundleConfig::validate`] error, or
/// [`BundleError::Incomplete`] listing every document that failed.
pub async fn bundle(config: &BundleConfig) -> Result<BundleReport> {
    config.validate()?;

    let rendered = join_all(config.documents.iter().map(|doc| read_and_render(doc))).await;

    let mut modules = Vec::with_capacity(rendered.len());
    let mut failures = Vec::new();
    for (doc, result) in config.documents.iter().zip(rendered) {
        match result {
            Ok(module) => modules.push((doc.target.as_path(), module)),
            Err(failure) => {
                error!(
                    path = %failure.path.display(),
                    error = %failure.source,
                    "failed to read context document"
                );
                failures.push(failure);
            }
        }
    }
    if !failures.is_empty() {
        return Err(BundleError::Incomplete(failures));
    }

    let written =
        join_all(modules.iter().map(|(target, module)| write_module(target, module))).await;
    let failures: Vec<DocumentFailure> = written
        .into_iter()
        .filter_map(|result| result.err())
        .inspect(|failure| {
            error!(
                path = %failure.path.display(),
                error = %failure.source,
                "failed to write generated module"
            );
        })
        .collect();
    if !failures.is_empty() {
        return Err(BundleError::Incomplete(failures));
    }

    let written: Vec<PathBuf> =
        modules.into_iter().map(|(target, _)| target.to_path_buf()).collect();
    info!(count = written.len(), "bundled context documents");
    Ok(BundleReport { written })
}
