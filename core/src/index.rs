use std::collections::btree_map::{BTreeMap, Entry};

pub type DocId = u32;

/// Occurrence counts of one word, keyed by document id. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSet {
    counts: BTreeMap<DocId, u32>,
}

impl CounterSet {
    pub fn new() -> Self { Self::default() }

    /// Add one occurrence for `doc_id`, returning the new count.
    pub fn increment(&mut self, doc_id: DocId) -> u32 {
        let count = self.counts.entry(doc_id).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Remove one occurrence; the entry disappears when it reaches zero.
    pub fn decrement(&mut self, doc_id: DocId) -> u32 {
        match self.counts.entry(doc_id) {
            Entry::Occupied(mut e) if *e.get() > 1 => {
                *e.get_mut() -= 1;
                *e.get()
            }
            Entry::Occupied(e) => {
                e.remove();
                0
            }
            Entry::Vacant(_) => 0,
        }
    }

    /// Count for `doc_id`, 0 when absent.
    pub fn get(&self, doc_id: DocId) -> u32 { self.counts.get(&doc_id).copied().unwrap_or(0) }

    /// Set the count for `doc_id` and return the previous one. A count of 0 removes the entry.
    pub fn set(&mut self, doc_id: DocId, count: u32) -> Option<u32> {
        if count == 0 { self.counts.remove(&doc_id) } else { self.counts.insert(doc_id, count) }
    }

    pub fn contains(&self, doc_id: DocId) -> bool { self.counts.contains_key(&doc_id) }
    pub fn len(&self) -> usize { self.counts.len() }
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// `(doc_id, count)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }
}

impl FromIterator<(DocId, u32)> for CounterSet {
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        let mut set = CounterSet::new();
        for (doc_id, count) in iter {
            set.set(doc_id, count);
        }
        set
    }
}

/// Inverted index from word to the documents containing it.
///
/// Words and document ids are kept sorted, so iteration (and therefore the
/// saved file) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    words: BTreeMap<String, CounterSet>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    /// Count one occurrence of `word` in `doc_id`.
    pub fn increment(&mut self, word: &str, doc_id: DocId) -> u32 {
        debug_assert!(crate::tokenizer::is_word(word), "unnormalized word {word:?}");
        match self.words.get_mut(word) {
            Some(counters) => counters.increment(doc_id),
            None => self.words.entry(word.to_string()).or_default().increment(doc_id),
        }
    }

    pub fn counters(&self, word: &str) -> Option<&CounterSet> { self.words.get(word) }

    /// Occurrences of `word` in `doc_id`, 0 when either is unknown.
    pub fn count(&self, word: &str, doc_id: DocId) -> u32 {
        self.words.get(word).map_or(0, |c| c.get(doc_id))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize { self.words.len() }
    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CounterSet)> + '_ {
        self.words.iter().map(|(w, c)| (w.as_str(), c))
    }

    /// Every `(word, doc_id, count)` triple.
    pub fn triples(&self) -> impl Iterator<Item = (&str, DocId, u32)> + '_ {
        self.iter().flat_map(|(word, counters)| counters.iter().map(move |(id, n)| (word, id, n)))
    }

    /// Insert a whole counter set, returning any set previously stored for `word`.
    /// Empty sets are not stored.
    pub(crate) fn insert(&mut self, word: String, counters: CounterSet) -> Option<CounterSet> {
        if counters.is_empty() { return self.words.remove(&word); }
        self.words.insert(word, counters)
    }
}

impl<'a> FromIterator<(&'a str, DocId, u32)> for Index {
    fn from_iter<I: IntoIterator<Item = (&'a str, DocId, u32)>>(iter: I) -> Self {
        let mut index = Index::new();
        for (word, doc_id, count) in iter {
            if count > 0 {
                index.words.entry(word.to_string()).or_default().set(doc_id, count);
            }
        }
        index
    }
}
