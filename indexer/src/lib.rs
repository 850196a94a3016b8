use anyhow::{Context, Result};
use std::path::Path;
use tse_core::builder::{build_with_stats, BuildStats};
use tse_core::persist::{load_index, save_index};
use tse_core::PageDir;

/// Index the crawler output in `page_dir` and write the index to `index_file`.
pub fn build_index(page_dir: &Path, index_file: &Path) -> Result<BuildStats> {
    let pages = PageDir::open(page_dir).context("cannot index pages")?;
    let (index, stats) = build_with_stats(&pages);
    save_index(index_file, &index).with_context(|| format!("cannot write index file {}", index_file.display()))?;
    tracing::info!(output = %index_file.display(), words = stats.words, "index saved");
    Ok(stats)
}

/// Load `old` and save it again as `new`; the two files should hold the same lines.
pub fn retest_index(old: &Path, new: &Path) -> Result<usize> {
    let index = load_index(old).with_context(|| format!("cannot load index file {}", old.display()))?;
    save_index(new, &index).with_context(|| format!("cannot write index file {}", new.display()))?;
    tracing::info!(input = %old.display(), output = %new.display(), words = index.len(), "index rewritten");
    Ok(index.len())
}
