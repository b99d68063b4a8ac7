//! linklift CLI — import browser bookmark exports as tag-organized uploads.
//!
//! Parses a browser's exported bookmark file, lets you filter the folder
//! tree and tune tag derivation, and emits the upload payload.

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
