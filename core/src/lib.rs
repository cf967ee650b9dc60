//! In-memory inverted index over a small, static document collection, ranked with TF-IDF.
//!
//! Build once with [`build_index`], then query with [`InvertedIndex::query`] or
//! [`InvertedIndex::query_multi`].

pub mod collection;
pub mod doclist;
pub mod index;
pub mod report;
pub mod score;
pub mod tfidf;
pub mod tokenizer;
pub mod tree;

pub use collection::{Collection, DocumentSource, FileSource};
pub use doclist::{DocList, DocumentEntry};
pub use index::{apply_term_frequencies, build_from_collection, build_index, InvertedIndex};
pub use score::{ScoreList, ScoreResult};
pub use tree::WordIndexTree;
