use crate::collection::{Collection, DocumentSource};
use crate::score::ScoreList;
use crate::tfidf::{score_word, score_words};
use crate::tree::WordIndexTree;
use anyhow::{bail, Result};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub tree: WordIndexTree,
    /// Indexed filenames in collection order.
    pub documents: Vec<String>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Default `total_documents` for queries: the collection size.
    pub fn num_documents(&self) -> usize { self.documents.len() }

    pub fn query(&self, word: &str, total_documents: usize) -> ScoreList {
        score_word(&self.tree, word, total_documents)
    }

    pub fn query_multi<S: AsRef<str>>(&self, words: &[S], total_documents: usize) -> ScoreList {
        score_words(&self.tree, words, total_documents)
    }
}

/// Index every document of `filenames`, then convert counts to relative term frequencies.
/// Any read failure aborts the whole build.
pub fn build_index<D: DocumentSource>(source: &D, filenames: &[String]) -> Result<InvertedIndex> {
    let mut tree = WordIndexTree::new();
    for filename in filenames {
        let tokens = source.tokens(filename)?;
        tracing::debug!(filename = %filename, tokens = tokens.len(), "indexing document");
        for word in &tokens {
            tree.insert(word, filename);
        }
    }
    apply_term_frequencies(&mut tree, source)?;
    tracing::info!(num_docs = filenames.len(), num_words = tree.len(), height = tree.height(), "index built");
    Ok(InvertedIndex { tree, documents: filenames.to_vec() })
}

pub fn build_from_collection(collection: &Collection) -> Result<InvertedIndex> {
    build_index(&collection.source, &collection.filenames)
}

/// Rewrite every raw occurrence count as `count / total_tokens_in_file`. Refuses to run twice.
pub fn apply_term_frequencies<D: DocumentSource>(tree: &mut WordIndexTree, source: &D) -> Result<()> {
    if tree.relative_frequencies {
        bail!("term frequencies already applied to this index");
    }
    let mut totals: HashMap<String, usize> = HashMap::new();
    tree.try_for_each_list_mut(|word, docs| -> Result<()> {
        for entry in docs.iter_mut() {
            let total = match totals.get(&entry.filename) {
                Some(&n) => n,
                None => {
                    let n = source.total_token_count(&entry.filename)?;
                    totals.insert(entry.filename.clone(), n);
                    n
                }
            };
            if total == 0 {
                bail!("{} has no tokens but is indexed under {word:?}", entry.filename);
            }
            entry.frequency /= total as f64;
        }
        Ok(())
    })?;
    tree.relative_frequencies = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    struct MemSource {
        docs: HashMap<&'static str, &'static str>,
        reads: Cell<usize>,
    }

    impl MemSource {
        fn new(docs: &[(&'static str, &'static str)]) -> Self {
            Self { docs: docs.iter().copied().collect(), reads: Cell::new(0) }
        }
    }

    impl DocumentSource for MemSource {
        fn read_document(&self, filename: &str) -> Result<String> {
            self.reads.set(self.reads.get() + 1);
            self.docs.get(filename).map(|s| s.to_string()).ok_or_else(|| anyhow!("no such document {filename}"))
        }
    }

    fn names(docs: &[&str]) -> Vec<String> { docs.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn frequencies_become_relative() {
        let src = MemSource::new(&[("a.txt", "mars mars moon"), ("b.txt", "Mars. sun")]);
        let index = build_index(&src, &names(&["a.txt", "b.txt"])).unwrap();
        let mars = index.tree.find("mars").unwrap();
        assert_eq!(mars.get("a.txt").unwrap().frequency, 2.0 / 3.0);
        assert_eq!(mars.get("b.txt").unwrap().frequency, 1.0 / 2.0);
        assert!(index.tree.has_relative_frequencies());
        assert_eq!(index.num_documents(), 2);
    }

    #[test]
    fn second_pass_is_rejected() {
        let src = MemSource::new(&[("a.txt", "one two")]);
        let mut index = build_index(&src, &names(&["a.txt"])).unwrap();
        assert!(apply_term_frequencies(&mut index.tree, &src).is_err());
        assert_eq!(index.tree.find("one").unwrap().get("a.txt").unwrap().frequency, 0.5);
    }

    #[test]
    fn each_file_is_counted_once_per_pass() {
        let src = MemSource::new(&[("a.txt", "x y z"), ("b.txt", "x y")]);
        build_index(&src, &names(&["a.txt", "b.txt"])).unwrap();
        // two reads to tokenize plus one total per file
        assert_eq!(src.reads.get(), 4);
    }

    #[test]
    fn missing_document_fails_the_build() {
        let src = MemSource::new(&[("a.txt", "x")]);
        let err = build_index(&src, &names(&["a.txt", "b.txt"])).unwrap_err();
        assert!(err.to_string().contains("b.txt"));
    }

    #[test]
    fn empty_documents_index_nothing() {
        let src = MemSource::new(&[("a.txt", "   "), ("b.txt", "sun")]);
        let index = build_index(&src, &names(&["a.txt", "b.txt"])).unwrap();
        assert_eq!(index.tree.len(), 1);
        assert_eq!(index.num_documents(), 2);
    }
}
