//! docsnap CLI — flatten versioned documentation into one text bundle per version.
//!
//! Produces `version-v<x.y.z>.txt` bundles for LLM ingestion plus an index
//! page linking them, newest version first.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
