use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tse_core::cli::{init_logging, parse_args};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a word index from a crawler page directory", long_about = None)]
struct Cli {
    /// Directory written by the crawler
    page_directory: PathBuf,
    /// Index file to create
    index_filename: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let cli: Cli = parse_args();
    indexer::build_index(&cli.page_directory, &cli.index_filename)?;
    Ok(())
}
