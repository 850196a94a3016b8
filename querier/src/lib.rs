use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};
use tse_core::query::parse;
use tse_core::rank::evaluate;
use tse_core::{DocId, DocumentSource, Index, RankedResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print `Query? ` before each read.
    pub prompt: bool,
    /// One JSON object per answered line instead of the text report.
    pub json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub answered: usize,
    pub rejected: usize,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: u32,
    pub url: Option<String>,
}

/// Answer queries from `input` until it ends. A bad query is reported and skipped;
/// a failed read or write ends the loop with an error.
pub fn run<S, R, W>(index: &Index, pages: &S, mut input: R, out: &mut W, opts: Options) -> Result<Summary>
where
    S: DocumentSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut summary = Summary::default();
    let mut line = String::new();
    loop {
        if opts.prompt {
            write!(out, "Query? ")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line).context("failed to read query")? == 0 {
            break;
        }
        match answer(line.trim_end_matches(['\n', '\r']), index, pages, out, opts)? {
            Some(true) => summary.answered += 1,
            Some(false) => summary.rejected += 1,
            None => {}
        }
    }
    if opts.prompt {
        writeln!(out)?;
    }
    tracing::debug!(answered = summary.answered, rejected = summary.rejected, "input ended");
    Ok(summary)
}

/// Answer one line. `None` for a blank line, `Some(false)` for a syntax error.
pub fn answer<S, W>(line: &str, index: &Index, pages: &S, out: &mut W, opts: Options) -> Result<Option<bool>>
where
    S: DocumentSource + ?Sized,
    W: Write,
{
    let query = match parse(line) {
        Ok(Some(query)) => query,
        Ok(None) => return Ok(None),
        Err(e) => {
            tracing::debug!(query = line, error = %e, "rejected query");
            if opts.json {
                let response = SearchResponse {
                    query: line.trim().to_string(),
                    error: Some(e.to_string()),
                    total_hits: 0,
                    results: vec![],
                };
                writeln!(out, "{}", serde_json::to_string(&response)?)?;
            } else {
                writeln!(out, "Error: {e}")?;
            }
            return Ok(Some(false));
        }
    };

    let ranked = evaluate(&query, index);
    if opts.json {
        let response = SearchResponse {
            query: query.to_string(),
            error: None,
            total_hits: ranked.len(),
            results: ranked.iter().map(|r| SearchHit { doc_id: r.doc_id, score: r.score, url: lookup_url(pages, r.doc_id) }).collect(),
        };
        writeln!(out, "{}", serde_json::to_string(&response)?)?;
    } else {
        writeln!(out, "Query: {query}")?;
        write_ranked(&ranked, pages, out)?;
        writeln!(out, "{}", "-".repeat(47))?;
    }
    Ok(Some(true))
}

fn write_ranked<S, W>(ranked: &[RankedResult], pages: &S, out: &mut W) -> Result<()>
where
    S: DocumentSource + ?Sized,
    W: Write,
{
    if ranked.is_empty() {
        writeln!(out, "No documents match.")?;
        return Ok(());
    }
    writeln!(out, "Matches {} documents (ranked):", ranked.len())?;
    let width = ranked[0].score.to_string().len();
    for r in ranked {
        let url = lookup_url(pages, r.doc_id);
        writeln!(out, "score {:>width$} doc {:>4}: {}", r.score, r.doc_id, url.as_deref().unwrap_or("<unknown>"))?;
    }
    Ok(())
}

fn lookup_url<S: DocumentSource + ?Sized>(pages: &S, doc_id: DocId) -> Option<String> {
    match pages.url(doc_id) {
        Ok(Some(url)) => Some(url),
        Ok(None) => {
            tracing::warn!(doc_id, "document is missing from the page directory");
            None
        }
        Err(e) => {
            tracing::warn!(doc_id, error = %e, "cannot read document url");
            None
        }
    }
}
