use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tse_core::cli::{init_logging, parse_args};

#[derive(Parser)]
#[command(name = "indextest")]
#[command(about = "Load an index file and save it again", long_about = None)]
struct Cli {
    /// Index file produced by the indexer
    old_index_filename: PathBuf,
    /// Where to write the reloaded index
    new_index_filename: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let cli: Cli = parse_args();
    indexer::retest_index(&cli.old_index_filename, &cli.new_index_filename)?;
    Ok(())
}
