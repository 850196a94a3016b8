use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tse_core::PageDir;

fn crawl_fixture(dir: &Path) {
    let pages = PageDir::create(dir).unwrap();
    pages.save_page(1, "http://example.com/", 0, "<html><body>Cats and dogs</body></html>").unwrap();
    pages.save_page(2, "http://example.com/cats.html", 1, "<p>cats cats CATS</p>").unwrap();
    pages.save_page(3, "http://example.com/dogs.html", 1, "<p>dogs</p>").unwrap();
    // Unreachable: id 4 is missing.
    pages.save_page(5, "http://example.com/birds.html", 1, "birds").unwrap();
}

fn lines(path: &Path) -> BTreeSet<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn builds_index_file_from_pages() {
    let dir = tempfile::tempdir().unwrap();
    crawl_fixture(dir.path());
    let out = dir.path().join("index.dat");

    let stats = indexer::build_index(dir.path(), &out).unwrap();
    assert_eq!(stats.documents, 3);

    let got = lines(&out);
    assert!(got.contains("cats 1 1 2 3"));
    assert!(got.contains("dogs 1 1 3 1"));
    assert!(got.contains("html 1 2"));
    assert!(!got.iter().any(|l| l.starts_with("birds ")));
    assert!(!got.iter().any(|l| l.starts_with("example ")));
}

#[test]
fn rejects_directory_without_marker() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.dat");
    let err = indexer::build_index(dir.path(), &out).unwrap_err();
    assert!(format!("{err:#}").contains("not a crawler directory"));
    assert!(!out.exists());
}

#[test]
fn retest_rewrites_same_lines() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.dat");
    let new = dir.path().join("new.dat");
    fs::write(&old, "dog 2 3\ncat 2 1 1 2\n").unwrap();

    let words = indexer::retest_index(&old, &new).unwrap();
    assert_eq!(words, 2);
    assert_eq!(lines(&new), ["cat 1 2 2 1", "dog 2 3"].into_iter().map(String::from).collect::<BTreeSet<String>>());
}

#[test]
fn retest_fails_on_malformed_index() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.dat");
    fs::write(&old, "cat one 2\n").unwrap();
    assert!(indexer::retest_index(&old, &dir.path().join("new.dat")).is_err());
}
