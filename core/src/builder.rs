use crate::pagedir::DocumentSource;
use crate::tokenizer::tokenize;
use crate::{DocId, Index};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Documents indexed.
    pub documents: u32,
    /// Documents that existed but could not be read.
    pub skipped: u32,
    /// Distinct words in the finished index.
    pub words: usize,
}

/// Index every document of `source`, from id 1 up to the first missing id.
pub fn build<S: DocumentSource + ?Sized>(source: &S) -> Index { build_with_stats(source).0 }

pub fn build_with_stats<S: DocumentSource + ?Sized>(source: &S) -> (Index, BuildStats) {
    let mut index = Index::new();
    let mut stats = BuildStats::default();
    let mut id: DocId = 1;
    loop {
        match source.fetch(id) {
            Ok(Some(doc)) => {
                let words = index_document(&mut index, id, &doc.body);
                tracing::debug!(doc_id = id, url = %doc.url, words, "indexed document");
                stats.documents += 1;
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(doc_id = id, error = %e, "skipping unreadable document");
                stats.skipped += 1;
            }
        }
        id = match id.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }
    stats.words = index.len();
    tracing::info!(documents = stats.documents, skipped = stats.skipped, words = stats.words, "index built");
    (index, stats)
}

/// Add the words of one body to `index`, returning how many occurrences were counted.
pub fn index_document(index: &mut Index, doc_id: DocId, body: &str) -> usize {
    let mut n = 0;
    for word in tokenize(body) {
        index.increment(&word, doc_id);
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;
    use crate::pagedir::{Document, MemorySource};
    use std::path::PathBuf;

    #[test]
    fn counts_words_per_document() {
        let mut source = MemorySource::new();
        source.push("http://a/", "The cat saw the CAT.");
        source.push("http://b/", "cat dog dog");
        let (index, stats) = build_with_stats(&source);
        assert_eq!(index.count("cat", 1), 2);
        assert_eq!(index.count("the", 1), 2);
        assert_eq!(index.count("cat", 2), 1);
        assert_eq!(index.count("dog", 2), 2);
        assert_eq!(stats, BuildStats { documents: 2, skipped: 0, words: 4 });
    }

    #[test]
    fn url_is_not_indexed() {
        let mut source = MemorySource::new();
        source.push("http://example.com/zebra", "giraffe");
        let index = build(&source);
        assert!(index.counters("zebra").is_none());
        assert!(index.counters("example").is_none());
        assert_eq!(index.count("giraffe", 1), 1);
    }

    #[test]
    fn stops_at_first_gap() {
        let mut source = MemorySource::new();
        for id in [1, 2, 3, 5] {
            source.insert(Document { id, url: format!("u{id}"), depth: 0, body: format!("page{id} common") });
        }
        let (index, stats) = build_with_stats(&source);
        assert_eq!(stats.documents, 3);
        let docs: Vec<DocId> = index.counters("common").unwrap().iter().map(|(id, _)| id).collect();
        assert_eq!(docs, vec![1, 2, 3]);
    }

    struct Flaky;

    impl DocumentSource for Flaky {
        fn fetch(&self, id: DocId) -> Result<Option<Document>, PageError> {
            match id {
                1 | 3 => Ok(Some(Document { id, url: String::new(), depth: 0, body: "word".into() })),
                2 => Err(PageError::MissingHeader { path: PathBuf::from("2"), field: "depth" }),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn unreadable_document_is_skipped() {
        let (index, stats) = build_with_stats(&Flaky);
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(index.counters("word").unwrap().iter().collect::<Vec<_>>(), vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn empty_corpus() {
        let (index, stats) = build_with_stats(&MemorySource::new());
        assert!(index.is_empty());
        assert_eq!(stats, BuildStats::default());
    }
}
