//! Error types for the `vsearch-context` crate.

use std::path::PathBuf;

use thiserror::Error;

/// One document that could not be read or written.
#[derive(Debug)]
pub struct DocumentFailure {
    /// The file that failed.
    pub path: PathBuf,
    /// The underlying I/O error.
    pub source: std::io::Error,
}

impl std::fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

/// Errors that can occur while bundling context documents.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The designated context directory is missing or not a directory.
    #[error("context directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// A source document does not exist.
    #[error("context document not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// Any other configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// At least one document failed to read or write.
    #[error("failed to bundle {} context document(s): {}", .0.len(), join(.0))]
    Incomplete(Vec<DocumentFailure>),
}

fn join(failures: &[DocumentFailure]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// A convenience result type for bundling operations.
pub type Result<T> = std::result::Result<T, BundleError>;
