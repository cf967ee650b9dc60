use std::fs;
use tempfile::tempdir;
use tfidf_core::report::{save_inverted_index, save_score_list};
use tfidf_core::{build_from_collection, Collection, InvertedIndex};

fn solar_index(dir: &std::path::Path) -> InvertedIndex {
    fs::write(dir.join("a.txt"), "mars mars moon").unwrap();
    fs::write(dir.join("b.txt"), "mars sun").unwrap();
    fs::write(dir.join("c.txt"), "sun sun sun").unwrap();
    fs::write(dir.join("collection.txt"), "a.txt b.txt\nc.txt\n").unwrap();
    let collection = Collection::open(dir.join("collection.txt")).unwrap();
    build_from_collection(&collection).unwrap()
}

fn pairs(list: &tfidf_core::ScoreList) -> Vec<(String, f64)> {
    list.iter().map(|r| (r.filename.clone(), r.score)).collect()
}

#[test]
fn single_word_queries() {
    let dir = tempdir().unwrap();
    let index = solar_index(dir.path());
    let idf_mars = (3.0f64 / 2.0).log10();

    let mars = index.query("mars", 3);
    assert_eq!(
        pairs(&mars),
        vec![("a.txt".to_string(), (2.0 / 3.0) * idf_mars), ("b.txt".to_string(), (1.0 / 2.0) * idf_mars)]
    );

    let moon = index.query("moon", 3);
    assert_eq!(pairs(&moon), vec![("a.txt".to_string(), (1.0 / 3.0) * 3.0f64.log10())]);

    assert!(index.query("venus", 3).is_empty());
}

#[test]
fn multi_word_query_keeps_partial_matches() {
    let dir = tempdir().unwrap();
    let index = solar_index(dir.path());
    let idf_mars = (3.0f64 / 2.0).log10();

    let list = index.query_multi(&["mars", "moon"], 3);
    let a = (2.0 / 3.0) * idf_mars + (1.0 / 3.0) * 3.0f64.log10();
    let b = (1.0 / 2.0) * idf_mars;
    assert_eq!(pairs(&list), vec![("a.txt".to_string(), a), ("b.txt".to_string(), b)]);
}

#[test]
fn multi_word_equals_sum_of_single_words() {
    let dir = tempdir().unwrap();
    let index = solar_index(dir.path());
    let words = ["sun", "moon", "mars", "pluto"];
    let combined = index.query_multi(&words, index.num_documents());

    for r in &combined {
        let expected: f64 = words
            .iter()
            .flat_map(|w| index.query(w, 3).into_iter().filter(|s| s.filename == r.filename))
            .map(|s| s.score)
            .sum();
        assert!((r.score - expected).abs() < 1e-12, "{}: {} vs {}", r.filename, r.score, expected);
    }
    assert_eq!(combined.len(), 3);
    for pair in combined.as_slice().windows(2) {
        assert!(pair[0].score > pair[1].score || (pair[0].score == pair[1].score && pair[0].filename < pair[1].filename));
    }
}

#[test]
fn reports_are_written_to_disk() {
    let dir = tempdir().unwrap();
    let index = solar_index(dir.path());
    let out = dir.path().join("out");

    save_inverted_index(&index.tree, out.join("invertedIndex.txt")).unwrap();
    let dump = fs::read_to_string(out.join("invertedIndex.txt")).unwrap();
    assert_eq!(dump, "mars a.txt b.txt\nmoon a.txt\nsun b.txt c.txt\n");

    save_score_list(&index.query("sun", 3), out.join("sun.txt")).unwrap();
    let sun = fs::read_to_string(out.join("sun.txt")).unwrap();
    // c: 1.0 * log10(1.5), b: 0.5 * log10(1.5)
    assert_eq!(sun, "0.176091  c.txt\n0.088046  b.txt\n");
}
