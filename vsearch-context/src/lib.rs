//! Context documents bundled as Rust string constants.
//!
//! The Markdown files under `context/` are turned into generated modules by
//! the `vsearch-bundle` binary, which is a thin wrapper around [`bundle`].
//! The generated constants are re-exported from [`generated`].

pub mod bundle;
pub mod error;
pub mod generated;

pub use bundle::{
    BundleConfig, BundleReport, ContextDocument, GENERATED_MARKER, bundle, escape_literal,
    render_module,
};
pub use error::{BundleError, DocumentFailure, Result};
pub use generated::{INDEXING_CONTEXT, OVERVIEW_CONTEXT};
