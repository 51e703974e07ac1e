//! sprout-import binary.
//!
//! Reads the `dummy_<collection>.json` fixture files from a directory and
//! upserts their items into the document service, one at a time. The run is
//! best-effort: failures are logged and the batch keeps going.

use std::path::PathBuf;

use clap::Parser;
use sprout_import::{import::import_all, sink::HttpSink};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Import dummy fixture data into the document store")]
struct Cli {
  /// Directory holding the dummy_<collection>.json fixture files.
  #[arg(short, long, default_value = "data")]
  data_dir: PathBuf,

  /// Base URL of the document store's REST endpoint.
  #[arg(short, long)]
  base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let sink = HttpSink::new(&cli.base_url);

  let total = import_all(&cli.data_dir, &sink).await;
  tracing::info!(
    imported = total.imported,
    failed = total.failed,
    "import finished"
  );

  Ok(())
}
