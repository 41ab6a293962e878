use std::path::PathBuf;

use clap::Parser;
use vsearch_context::{BundleConfig, bundle};

/// Regenerate the context constants from their Markdown sources.
#[derive(Parser, Debug)]
#[command(name = "vsearch-bundle", version, about)]
struct Args {
    /// Crate directory containing `context/` and `src/generated/`.
    #[arg(long, env = "VSEARCH_CONTEXT_ROOT", default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let report = bundle(&BundleConfig::standard(&args.root)).await?;
    for path in &report.written {
        tracing::info!(path = %path.display(), "wrote generated module");
    }
    Ok(())
}
