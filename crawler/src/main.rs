use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::{header, Client};
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tse_core::cli::{init_logging, parse_args};
use tse_core::{DocId, PageDir};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl pages reachable from a seed URL into a page directory")]
struct Cli {
    /// URL to start from; only pages on the same host are followed
    seed_url: String,
    /// Existing directory to save numbered page files in
    page_directory: PathBuf,
    /// How many links away from the seed to crawl
    max_depth: u32,
    /// Pause between fetches, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = "tse-crawler/0.1")]
    user_agent: String,
}

struct Pending {
    url: Url,
    depth: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let args: Cli = parse_args();

    let seed = Url::parse(&args.seed_url).with_context(|| format!("invalid seed URL {}", args.seed_url))?;
    if !matches!(seed.scheme(), "http" | "https") || seed.host_str().is_none() {
        bail!("seed URL {} is not an http(s) URL", args.seed_url);
    }
    let pages = PageDir::create(&args.page_directory).context("cannot use page directory")?;

    let client = Client::builder()
        .user_agent(args.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let saved = crawl(&client, &pages, norm(&seed), args.max_depth, Duration::from_millis(args.delay_ms)).await?;
    tracing::info!(saved, dir = %args.page_directory.display(), "crawl complete");
    Ok(())
}

/// Breadth-first crawl from `seed`, saving each fetched page under the next id.
async fn crawl(client: &Client, pages: &PageDir, seed: Url, max_depth: u32, delay: Duration) -> Result<DocId> {
    let mut seen: HashSet<Url> = HashSet::from([seed.clone()]);
    let mut frontier = VecDeque::from([Pending { url: seed.clone(), depth: 0 }]);
    let mut next_id: DocId = 1;
    let mut first = true;

    while let Some(page) = frontier.pop_front() {
        if !first {
            sleep(delay).await;
        }
        first = false;

        let html = match fetch(client, &page.url).await {
            Ok(Some(html)) => html,
            Ok(None) => {
                tracing::debug!(url = %page.url, "skipping non-html page");
                continue;
            }
            Err(e) => {
                tracing::warn!(url = %page.url, error = %e, "fetch failed");
                continue;
            }
        };
        pages.save_page(next_id, page.url.as_str(), page.depth, &html)?;
        tracing::info!(id = next_id, depth = page.depth, url = %page.url, "fetched");
        next_id += 1;

        if page.depth >= max_depth {
            continue;
        }
        for link in extract_links(&page.url, &html) {
            if !is_internal(&seed, &link) {
                tracing::debug!(url = %link, "ignoring external link");
            } else if seen.insert(link.clone()) {
                tracing::debug!(url = %link, depth = page.depth + 1, "added");
                frontier.push_back(Pending { url: link, depth: page.depth + 1 });
            }
        }
    }
    Ok(next_id - 1)
}

/// `Ok(None)` for a successful response that is not HTML.
async fn fetch(client: &Client, url: &Url) -> Result<Option<String>> {
    let resp = client.get(url.clone()).send().await?;
    if !resp.status().is_success() {
        bail!("HTTP {}", resp.status());
    }
    if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
        if let Ok(v) = ct.to_str() {
            if !v.starts_with("text/html") {
                return Ok(None);
            }
        }
    }
    let bytes = resp.bytes().await?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Absolute http(s) targets of every `<a href>` on the page, without fragments.
fn extract_links(base: &Url, html: &str) -> Vec<Url> {
    let sel_a = Selector::parse("a[href]").expect("valid selector");
    let doc = Html::parse_document(html);
    let mut links = Vec::new();
    for a in doc.select(&sel_a) {
        if let Some(href) = a.value().attr("href") {
            if let Ok(u) = base.join(href.trim()) {
                if matches!(u.scheme(), "http" | "https") {
                    links.push(norm(&u));
                }
            }
        }
    }
    links
}

fn norm(u: &Url) -> Url {
    let mut s = u.clone();
    s.set_fragment(None);
    s
}

/// Same scheme, host and port as the seed.
fn is_internal(seed: &Url, url: &Url) -> bool {
    seed.scheme() == url.scheme() && seed.host_str() == url.host_str() && seed.port_or_known_default() == url.port_or_known_default()
}
