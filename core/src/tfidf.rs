//! TF-IDF scoring over a built [`WordIndexTree`].
//!
//! `idf = log10(total_documents / document_frequency)` and a (word, document)
//! score is `relative_tf * idf`. Multi-word queries sum per-document scores
//! over the queried words; documents matching none of them are left out.

use crate::score::{ScoreList, ScoreResult};
use crate::tree::WordIndexTree;
use std::collections::BTreeMap;

/// Inverse document frequency. Only meaningful for words present in at least one document.
pub fn idf(doc_frequency: usize, total_documents: usize) -> f64 {
    debug_assert!(doc_frequency >= 1, "idf of a word absent from every document");
    (total_documents as f64 / doc_frequency as f64).log10()
}

/// Rank the documents containing `word`. An unknown word yields an empty list.
pub fn score_word(tree: &WordIndexTree, word: &str, total_documents: usize) -> ScoreList {
    let Some(docs) = tree.find(word) else { return ScoreList::new() };
    let idf = idf(docs.len(), total_documents);
    let mut list = ScoreList::new();
    for entry in docs {
        list.insert_ranked(ScoreResult::new(entry.filename.clone(), entry.frequency * idf));
    }
    list
}

/// Rank documents by the summed score of every queried word they contain.
/// Words are taken as given, so a repeated word contributes once per repetition.
pub fn score_words<S: AsRef<str>>(tree: &WordIndexTree, words: &[S], total_documents: usize) -> ScoreList {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for word in words {
        let Some(docs) = tree.find(word.as_ref()) else {
            tracing::debug!(word = word.as_ref(), "query word not indexed");
            continue;
        };
        let idf = idf(docs.len(), total_documents);
        for entry in docs {
            *sums.entry(entry.filename.clone()).or_insert(0.0) += entry.frequency * idf;
        }
    }
    ScoreList::merge_sorted(sums.into_iter().map(|(filename, score)| ScoreResult::new(filename, score)))
}
