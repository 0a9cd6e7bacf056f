//! marq - a CLI viewer for marketplace catalogs
//!
//! marq provides:
//! - Category filtering over a catalog of listings
//! - Case-insensitive free-text search across names and descriptions
//! - Stable sorting by price or timestamp
//! - Upload preview helpers (file type detection, image data URIs)
//! - Unified output format (jsonl/json/md/table/raw)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod preview;
mod view;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
