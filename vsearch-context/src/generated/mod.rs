//! Constants generated from `context/*.md` by `vsearch-bundle`.
//!
//! Regenerate with `cargo run -p vsearch-context --bin vsearch-bundle -- --root vsearch-context`.

mod indexing;
mod overview;

pub use indexing::INDEXING_CONTEXT;
pub use overview::OVERVIEW_CONTEXT;
