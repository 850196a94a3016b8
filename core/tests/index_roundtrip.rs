use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use tse_core::builder::build;
use tse_core::persist::{load_index, read_index, save_index, write_index};
use tse_core::{DocId, Index, IndexError, MemorySource};

fn triples(index: &Index) -> BTreeSet<(String, DocId, u32)> {
    index.triples().map(|(w, id, n)| (w.to_string(), id, n)).collect()
}

#[test]
fn saved_file_loads_back() {
    let mut source = MemorySource::new();
    source.push("http://example.com/1", "<title>Cats</title> cats and dogs, cats!");
    source.push("http://example.com/2", "dogs chase cats");
    let index = build(&source);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.dat");
    save_index(&path, &index).unwrap();
    let loaded = load_index(&path).unwrap();
    assert_eq!(triples(&loaded), triples(&index));
    assert_eq!(loaded.count("cats", 1), 2);
}

#[test]
fn line_order_does_not_matter() {
    let forward = read_index("cat 1 2 2 1\ndog 2 3\n".as_bytes()).unwrap();
    let backward = read_index("dog 2 3\ncat 2 1 1 2\n".as_bytes()).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn malformed_file_is_rejected_whole() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.dat");
    fs::write(&path, "cat 1 2\ndog 2\nbird 1 1\n").unwrap();
    match load_index(&path) {
        Err(IndexError::Format(e)) => assert_eq!(e.line, 2),
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_index(dir.path().join("absent")), Err(IndexError::Io(_))));
}

proptest! {
    #[test]
    fn load_of_save_preserves_triples(
        docs in prop::collection::vec(prop::collection::vec("[a-zA-Z]{1,6}", 0..20), 0..15)
    ) {
        let mut source = MemorySource::new();
        for (i, words) in docs.iter().enumerate() {
            source.push(format!("http://example.com/{i}"), words.join(" "));
        }
        let index = build(&source);
        let mut buf = Vec::new();
        write_index(&mut buf, &index).unwrap();
        let loaded = read_index(buf.as_slice()).unwrap();
        prop_assert_eq!(triples(&loaded), triples(&index));
    }
}
