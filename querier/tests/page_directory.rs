use querier::{run, Options};
use tse_core::builder::build;
use tse_core::persist::{load_index, save_index};
use tse_core::PageDir;

#[test]
fn answers_from_saved_index_and_pages() {
    let dir = tempfile::tempdir().unwrap();
    let pages = PageDir::create(dir.path()).unwrap();
    pages.save_page(1, "http://example.com/", 0, "<p>home of the search engine</p>").unwrap();
    pages.save_page(2, "http://example.com/search.html", 1, "search search engine").unwrap();

    let index_file = dir.path().join("index.dat");
    save_index(&index_file, &build(&pages)).unwrap();

    let pages = PageDir::open(dir.path()).unwrap();
    let index = load_index(&index_file).unwrap();
    let mut out = Vec::new();
    run(&index, &pages, "search engine or home\n".as_bytes(), &mut out, Options::default()).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Query: search and engine or home\n"));
    assert!(out.contains("score 2 doc    1: http://example.com/\n"));
    assert!(out.contains("score 1 doc    2: http://example.com/search.html\n"));
}
