//! Crawler page directories and the document source the index builder reads from.
//!
//! A page directory holds one file per document, named by its id, plus a
//! `.crawler` marker:
//!
//! ```text
//! <url>
//! <depth>
//! <body ...>
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::PageError;
use crate::DocId;

const MARKER: &str = ".crawler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocId,
    pub url: String,
    pub depth: u32,
    pub body: String,
}

/// Documents addressed by sequential id, starting at 1.
pub trait DocumentSource {
    /// `Ok(None)` means there is no document with this id, which ends the corpus.
    /// `Err` means the document exists but cannot be read.
    fn fetch(&self, id: DocId) -> Result<Option<Document>, PageError>;

    fn url(&self, id: DocId) -> Result<Option<String>, PageError> {
        Ok(self.fetch(id)?.map(|doc| doc.url))
    }
}

pub struct PageDir {
    root: PathBuf,
}

impl PageDir {
    /// Mark an existing directory as a crawler directory.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self, PageError> {
        let root = root.as_ref().to_path_buf();
        let marker = root.join(MARKER);
        fs::write(&marker, "This directory holds pages saved by the crawler\n")
            .map_err(|e| PageError::io(marker, e))?;
        Ok(Self { root })
    }

    /// Open a directory previously marked by [`PageDir::create`].
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, PageError> {
        let root = root.as_ref().to_path_buf();
        if !root.join(MARKER).is_file() {
            return Err(PageError::NotCrawlerDir { path: root });
        }
        Ok(Self { root })
    }

    fn page(&self, id: DocId) -> PathBuf { self.root.join(id.to_string()) }

    pub fn save_page(&self, id: DocId, url: &str, depth: u32, body: &str) -> Result<(), PageError> {
        let path = self.page(id);
        let mut contents = String::with_capacity(url.len() + body.len() + 16);
        contents.push_str(url);
        contents.push('\n');
        contents.push_str(&depth.to_string());
        contents.push('\n');
        contents.push_str(body);
        fs::write(&path, contents).map_err(|e| PageError::io(path, e))
    }
}

impl DocumentSource for PageDir {
    fn fetch(&self, id: DocId) -> Result<Option<Document>, PageError> {
        let path = self.page(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PageError::io(path, e)),
        };
        let text = String::from_utf8_lossy(&bytes);
        let mut parts = text.splitn(3, '\n');

        let url = match parts.next().map(|l| l.trim_end_matches('\r')) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return Err(PageError::MissingHeader { path, field: "URL" }),
        };
        let depth_line = match parts.next() {
            Some(line) => line.trim(),
            None => return Err(PageError::MissingHeader { path, field: "depth" }),
        };
        let depth = depth_line
            .parse()
            .map_err(|_| PageError::InvalidDepth { path: path.clone(), value: depth_line.to_string() })?;
        let body = parts.next().unwrap_or_default().to_string();
        Ok(Some(Document { id, url, depth, body }))
    }

    /// Reads only the first line of the page file.
    fn url(&self, id: DocId) -> Result<Option<String>, PageError> {
        let path = self.page(id);
        let f = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PageError::io(path, e)),
        };
        let mut line = String::new();
        BufReader::new(f).read_line(&mut line).map_err(|e| PageError::io(&path, e))?;
        let url = line.trim_end_matches(['\n', '\r']);
        if url.is_empty() {
            return Err(PageError::MissingHeader { path, field: "URL" });
        }
        Ok(Some(url.to_string()))
    }
}

/// An in-memory corpus. Ids are assigned sequentially from 1 as documents are pushed.
#[derive(Debug, Default)]
pub struct MemorySource {
    docs: BTreeMap<DocId, Document>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    /// Append a document at depth 0 and return its id.
    pub fn push(&mut self, url: impl Into<String>, body: impl Into<String>) -> DocId {
        let id = self.docs.keys().next_back().map_or(1, |last| last + 1);
        self.insert(Document { id, url: url.into(), depth: 0, body: body.into() });
        id
    }

    /// Insert a document under its own id, which may leave gaps.
    pub fn insert(&mut self, doc: Document) -> Option<Document> { self.docs.insert(doc.id, doc) }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, id: DocId) -> Result<Option<Document>, PageError> { Ok(self.docs.get(&id).cloned()) }
}
