use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tse_core::cli::{init_logging, parse_args};
use tse_core::persist::load_index;
use tse_core::PageDir;

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer and/or queries from stdin against a saved index", long_about = None)]
struct Cli {
    /// Directory written by the crawler
    page_directory: PathBuf,
    /// Index file written by the indexer
    index_filename: PathBuf,
    /// Print each answer as a JSON line
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli: Cli = parse_args();

    let pages = PageDir::open(&cli.page_directory).context("cannot answer queries")?;
    let index = load_index(&cli.index_filename)
        .with_context(|| format!("cannot load index file {}", cli.index_filename.display()))?;
    tracing::info!(words = index.len(), index = %cli.index_filename.display(), "index loaded");

    let stdin = io::stdin();
    let opts = querier::Options { prompt: stdin.is_terminal() && !cli.json, json: cli.json };
    let mut stdout = io::stdout().lock();
    querier::run(&index, &pages, stdin.lock(), &mut stdout, opts)?;
    Ok(())
}
